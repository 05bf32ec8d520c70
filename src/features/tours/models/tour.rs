use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    Active,
    Inactive,
}

/// A bookable tour package.
///
/// `location` is human-authored free text, not a reference into the location
/// store; it may encode a hierarchy such as "Aurangabad → Ellora Caves". The
/// relationship to destinations is inferred at query time by the map feature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub duration: String,
    pub price: Decimal,
    pub status: TourStatus,
    pub image: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
