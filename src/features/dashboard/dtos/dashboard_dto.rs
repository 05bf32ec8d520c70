use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::locations::dtos::LocationStatsDto;
use crate::features::tours::dtos::TourStatsDto;

/// Lightweight header stats for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub locations: LocationStatsDto,
    pub tours: TourStatsDto,
}
