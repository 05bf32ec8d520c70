use std::sync::RwLock;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::tours::dtos::{CreateTourDto, TourStatsDto, UpdateTourDto};
use crate::features::tours::models::{Tour, TourStatus};
use crate::shared::types::PaginationQuery;

/// In-memory store for tour packages
pub struct TourService {
    tours: RwLock<Vec<Tour>>,
}

impl TourService {
    pub fn new() -> Self {
        Self {
            tours: RwLock::new(Vec::new()),
        }
    }

    pub fn with_tours(tours: Vec<Tour>) -> Self {
        Self {
            tours: RwLock::new(tours),
        }
    }

    /// List one page of tours plus the total count
    pub fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<Tour>, i64)> {
        let tours = self.read()?;
        let total = tours.len() as i64;
        let page = tours
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    /// Full ordered collection, as consumed by the map feature
    pub fn list_all(&self) -> Result<Vec<Tour>> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: Uuid) -> Result<Tour> {
        self.read()?
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))
    }

    pub fn create(&self, data: CreateTourDto) -> Result<Tour> {
        let now = Utc::now();
        let tour = Tour {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            location: data.location,
            duration: data.duration,
            price: data.price,
            status: data.status,
            image: data.image,
            category: data.category,
            created_at: now,
            updated_at: now,
        };

        self.write()?.push(tour.clone());
        tracing::info!("Created tour: {} ({})", tour.name, tour.id);

        Ok(tour)
    }

    pub fn update(&self, id: Uuid, data: UpdateTourDto) -> Result<Tour> {
        let mut tours = self.write()?;
        let tour = tours
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Tour {} not found", id)))?;

        if let Some(name) = data.name {
            tour.name = name;
        }
        if let Some(description) = data.description {
            tour.description = description;
        }
        if let Some(location) = data.location {
            tour.location = location;
        }
        if let Some(duration) = data.duration {
            tour.duration = duration;
        }
        if let Some(price) = data.price {
            tour.price = price;
        }
        if let Some(status) = data.status {
            tour.status = status;
        }
        if let Some(image) = data.image {
            tour.image = image;
        }
        if let Some(category) = data.category {
            tour.category = Some(category);
        }
        tour.updated_at = Utc::now();

        Ok(tour.clone())
    }

    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut tours = self.write()?;
        let before = tours.len();
        tours.retain(|t| t.id != id);

        if tours.len() == before {
            return Err(AppError::NotFound(format!("Tour {} not found", id)));
        }

        tracing::info!("Removed tour: {}", id);
        Ok(())
    }

    pub fn stats(&self) -> Result<TourStatsDto> {
        let tours = self.read()?;

        let average_price = if tours.is_empty() {
            None
        } else {
            let sum: Decimal = tours.iter().map(|t| t.price).sum();
            Some(sum / Decimal::from(tours.len() as i64))
        };

        Ok(TourStatsDto {
            total: tours.len() as i64,
            active: tours
                .iter()
                .filter(|t| t.status == TourStatus::Active)
                .count() as i64,
            inactive: tours
                .iter()
                .filter(|t| t.status == TourStatus::Inactive)
                .count() as i64,
            average_price,
        })
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Tour>>> {
        self.tours
            .read()
            .map_err(|_| AppError::Internal("Tour store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Tour>>> {
        self.tours
            .write()
            .map_err(|_| AppError::Internal("Tour store lock poisoned".to_string()))
    }
}

impl Default for TourService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn create_dto(name: &str, location: &str, price: i64) -> CreateTourDto {
        CreateTourDto {
            name: name.to_string(),
            description: "A guided day trip".to_string(),
            location: location.to_string(),
            duration: "1 day".to_string(),
            price: Decimal::from(price),
            status: TourStatus::Active,
            image: "https://example.com/tour.jpg".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_create_preserves_free_text_location() {
        let service = TourService::new();
        let tour = service
            .create(create_dto("Cave circuit", "Aurangabad → Ellora Caves", 120))
            .unwrap();

        assert_eq!(tour.location, "Aurangabad → Ellora Caves");
    }

    #[test]
    fn test_update_and_remove() {
        let service = TourService::new();
        let tour = service.create(create_dto("City walk", "Aurangabad", 40)).unwrap();

        let updated = service
            .update(
                tour.id,
                UpdateTourDto {
                    name: None,
                    description: None,
                    location: None,
                    duration: Some("2 days".to_string()),
                    price: Some(Decimal::from(60)),
                    status: None,
                    image: None,
                    category: None,
                },
            )
            .unwrap();
        assert_eq!(updated.duration, "2 days");
        assert_eq!(updated.price, Decimal::from(60));

        service.remove(tour.id).unwrap();
        assert!(matches!(service.get(tour.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_stats_average_price() {
        let service = TourService::new();
        assert_eq!(service.stats().unwrap().average_price, None);

        service.create(create_dto("A", "Mumbai", 100)).unwrap();
        service.create(create_dto("B", "Pune", 200)).unwrap();

        let stats = service.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_price, Some(Decimal::from(150)));
    }
}
