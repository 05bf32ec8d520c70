use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::tours::models::{Tour, TourStatus};

/// Request DTO for creating a tour
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTourDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    /// Free-text destination, optionally hierarchical ("Aurangabad → Ellora Caves")
    #[validate(length(min = 1, max = 500, message = "Location must be 1-500 characters"))]
    pub location: String,

    #[validate(length(min = 1, max = 100, message = "Duration must be 1-100 characters"))]
    pub duration: String,

    pub price: Decimal,

    #[serde(default = "default_status")]
    pub status: TourStatus,

    #[validate(length(max = 1000, message = "Image URL must not exceed 1000 characters"))]
    pub image: String,

    #[validate(length(max = 255, message = "Category must not exceed 255 characters"))]
    pub category: Option<String>,
}

fn default_status() -> TourStatus {
    TourStatus::Active
}

/// Request DTO for updating a tour; absent fields are left unchanged
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Location must be 1-500 characters"))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Duration must be 1-100 characters"))]
    pub duration: Option<String>,

    pub price: Option<Decimal>,

    pub status: Option<TourStatus>,

    #[validate(length(max = 1000, message = "Image URL must not exceed 1000 characters"))]
    pub image: Option<String>,

    #[validate(length(max = 255, message = "Category must not exceed 255 characters"))]
    pub category: Option<String>,
}

/// Response DTO for a tour
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub price: Decimal,
    pub status: TourStatus,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tour> for TourResponseDto {
    fn from(t: Tour) -> Self {
        Self {
            id: t.id,
            name: t.name,
            description: t.description,
            location: t.location,
            duration: t.duration,
            price: t.price,
            status: t.status,
            image: t.image,
            category: t.category,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Store-level statistics for the tours collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourStatsDto {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    pub average_price: Option<Decimal>,
}
