use std::sync::Arc;

use crate::core::error::Result;
use crate::features::dashboard::dtos::DashboardSummaryDto;
use crate::features::locations::services::LocationService;
use crate::features::tours::services::TourService;

/// Service for public dashboard queries
pub struct DashboardService {
    locations: Arc<LocationService>,
    tours: Arc<TourService>,
}

impl DashboardService {
    pub fn new(locations: Arc<LocationService>, tours: Arc<TourService>) -> Self {
        Self { locations, tours }
    }

    /// Get lightweight summary for dashboard header
    pub fn get_summary(&self) -> Result<DashboardSummaryDto> {
        Ok(DashboardSummaryDto {
            locations: self.locations.stats()?,
            tours: self.tours.stats()?,
        })
    }
}
