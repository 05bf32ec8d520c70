use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::locations::models::{Coordinates, Location, LocationKind, LocationStatus};

/// Coordinates as accepted from clients, with range checks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate, ToSchema)]
pub struct CoordinatesDto {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be within [-90, 90]"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be within [-180, 180]"))]
    pub lng: f64,
}

impl From<CoordinatesDto> for Coordinates {
    fn from(c: CoordinatesDto) -> Self {
        Coordinates { lat: c.lat, lng: c.lng }
    }
}

/// Request DTO for creating a location
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    #[validate(nested)]
    pub coordinates: CoordinatesDto,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    pub address: String,

    pub kind: LocationKind,

    #[serde(default = "default_status")]
    pub status: LocationStatus,

    #[validate(length(max = 1000, message = "Image URL must not exceed 1000 characters"))]
    pub image: String,

    #[validate(length(max = 255, message = "Category must not exceed 255 characters"))]
    pub category: Option<String>,
}

fn default_status() -> LocationStatus {
    LocationStatus::Active
}

/// Request DTO for updating a location; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: Option<String>,

    #[validate(nested)]
    pub coordinates: Option<CoordinatesDto>,

    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    pub address: Option<String>,

    pub kind: Option<LocationKind>,

    pub status: Option<LocationStatus>,

    #[validate(length(max = 1000, message = "Image URL must not exceed 1000 characters"))]
    pub image: Option<String>,

    #[validate(length(max = 255, message = "Category must not exceed 255 characters"))]
    pub category: Option<String>,
}

/// Response DTO for a location
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: String,
    pub kind: LocationKind,
    pub status: LocationStatus,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Location> for LocationResponseDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            description: l.description,
            coordinates: l.coordinates,
            address: l.address,
            kind: l.kind,
            status: l.status,
            image: l.image,
            category: l.category,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Per-kind location count
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct KindCountDto {
    pub kind: LocationKind,
    pub count: i64,
}

/// Store-level statistics for the locations collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationStatsDto {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub by_kind: Vec<KindCountDto>,
}
