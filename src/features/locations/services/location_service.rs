use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::dtos::{
    CreateLocationDto, KindCountDto, LocationStatsDto, UpdateLocationDto,
};
use crate::features::locations::models::{Location, LocationKind, LocationStatus};
use crate::shared::types::PaginationQuery;

/// In-memory store for destination records.
///
/// Holds the authoritative ordered collection; the map feature reads it but
/// never writes back.
pub struct LocationService {
    locations: RwLock<Vec<Location>>,
}

impl LocationService {
    pub fn new() -> Self {
        Self {
            locations: RwLock::new(Vec::new()),
        }
    }

    pub fn with_locations(locations: Vec<Location>) -> Self {
        Self {
            locations: RwLock::new(locations),
        }
    }

    /// List one page of locations plus the total count
    pub fn list(&self, pagination: &PaginationQuery) -> Result<(Vec<Location>, i64)> {
        let locations = self.read()?;
        let total = locations.len() as i64;
        let page = locations
            .iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    /// Full ordered collection, as consumed by the map feature
    pub fn list_all(&self) -> Result<Vec<Location>> {
        Ok(self.read()?.clone())
    }

    pub fn get(&self, id: Uuid) -> Result<Location> {
        self.read()?
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    pub fn create(&self, data: CreateLocationDto) -> Result<Location> {
        let now = Utc::now();
        let location = Location {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            coordinates: data.coordinates.into(),
            address: data.address,
            kind: data.kind,
            status: data.status,
            image: data.image,
            category: data.category,
            created_at: now,
            updated_at: now,
        };

        self.write()?.push(location.clone());
        tracing::info!("Created location: {} ({})", location.name, location.id);

        Ok(location)
    }

    pub fn update(&self, id: Uuid, data: UpdateLocationDto) -> Result<Location> {
        let mut locations = self.write()?;
        let location = locations
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))?;

        if let Some(name) = data.name {
            location.name = name;
        }
        if let Some(description) = data.description {
            location.description = description;
        }
        if let Some(coordinates) = data.coordinates {
            location.coordinates = coordinates.into();
        }
        if let Some(address) = data.address {
            location.address = address;
        }
        if let Some(kind) = data.kind {
            location.kind = kind;
        }
        if let Some(status) = data.status {
            location.status = status;
        }
        if let Some(image) = data.image {
            location.image = image;
        }
        if let Some(category) = data.category {
            location.category = Some(category);
        }
        location.updated_at = Utc::now();

        Ok(location.clone())
    }

    pub fn remove(&self, id: Uuid) -> Result<()> {
        let mut locations = self.write()?;
        let before = locations.len();
        locations.retain(|l| l.id != id);

        if locations.len() == before {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }

        tracing::info!("Removed location: {}", id);
        Ok(())
    }

    pub fn stats(&self) -> Result<LocationStatsDto> {
        let locations = self.read()?;

        let by_kind = LocationKind::ALL
            .iter()
            .map(|&kind| KindCountDto {
                kind,
                count: locations.iter().filter(|l| l.kind == kind).count() as i64,
            })
            .collect();

        Ok(LocationStatsDto {
            total: locations.len() as i64,
            active: locations
                .iter()
                .filter(|l| l.status == LocationStatus::Active)
                .count() as i64,
            inactive: locations
                .iter()
                .filter(|l| l.status == LocationStatus::Inactive)
                .count() as i64,
            by_kind,
        })
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Location>>> {
        self.locations
            .read()
            .map_err(|_| AppError::Internal("Location store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<Location>>> {
        self.locations
            .write()
            .map_err(|_| AppError::Internal("Location store lock poisoned".to_string()))
    }
}

impl Default for LocationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use fake::faker::address::en::CityName;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    use super::*;
    use crate::features::locations::dtos::CoordinatesDto;

    fn create_dto(kind: LocationKind) -> CreateLocationDto {
        CreateLocationDto {
            name: CityName().fake(),
            description: Sentence(3..8).fake(),
            coordinates: CoordinatesDto {
                lat: 19.8762,
                lng: 75.3433,
            },
            address: format!("{}, {}", CityName().fake::<String>(), "Maharashtra"),
            kind,
            status: LocationStatus::Active,
            image: "https://example.com/image.jpg".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let service = LocationService::new();
        let created = service.create(create_dto(LocationKind::Cave)).unwrap();

        let fetched = service.get(created.id).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.kind, LocationKind::Cave);
    }

    #[test]
    fn test_get_missing_returns_not_found() {
        let service = LocationService::new();
        let err = service.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_update_patches_only_provided_fields() {
        let service = LocationService::new();
        let created = service.create(create_dto(LocationKind::Fort)).unwrap();

        let updated = service
            .update(
                created.id,
                UpdateLocationDto {
                    name: Some("Daulatabad Fort".to_string()),
                    description: None,
                    coordinates: None,
                    address: None,
                    kind: None,
                    status: Some(LocationStatus::Inactive),
                    image: None,
                    category: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Daulatabad Fort");
        assert_eq!(updated.status, LocationStatus::Inactive);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.kind, LocationKind::Fort);
    }

    #[test]
    fn test_remove() {
        let service = LocationService::new();
        let created = service.create(create_dto(LocationKind::City)).unwrap();

        service.remove(created.id).unwrap();
        assert!(service.get(created.id).is_err());
        assert!(matches!(
            service.remove(created.id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_paginates_in_insertion_order() {
        let service = LocationService::new();
        for _ in 0..15 {
            service.create(create_dto(LocationKind::Temple)).unwrap();
        }

        let (page, total) = service
            .list(&PaginationQuery {
                page: 2,
                page_size: 10,
            })
            .unwrap();

        assert_eq!(total, 15);
        assert_eq!(page.len(), 5);

        let all = service.list_all().unwrap();
        assert_eq!(page[0].id, all[10].id);
    }

    #[test]
    fn test_stats_counts_by_kind_and_status() {
        let service = LocationService::new();
        service.create(create_dto(LocationKind::Cave)).unwrap();
        service.create(create_dto(LocationKind::Cave)).unwrap();
        let fort = service.create(create_dto(LocationKind::Fort)).unwrap();
        service
            .update(
                fort.id,
                UpdateLocationDto {
                    name: None,
                    description: None,
                    coordinates: None,
                    address: None,
                    kind: None,
                    status: Some(LocationStatus::Inactive),
                    image: None,
                    category: None,
                },
            )
            .unwrap();

        let stats = service.stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.inactive, 1);

        let caves = stats
            .by_kind
            .iter()
            .find(|c| c.kind == LocationKind::Cave)
            .unwrap();
        assert_eq!(caves.count, 2);
    }
}
