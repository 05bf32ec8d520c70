use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Geographic point (WGS84). Valid latitudes are [-90, 90], longitudes [-180, 180];
/// the bounds are enforced at the DTO boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Destination kind shown as the marker badge and used by the map filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Cave,
    Temple,
    Heritage,
    Fort,
    City,
}

impl LocationKind {
    pub const ALL: [LocationKind; 5] = [
        LocationKind::Cave,
        LocationKind::Temple,
        LocationKind::Heritage,
        LocationKind::Fort,
        LocationKind::City,
    ];

    /// Human-readable badge label
    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::Cave => "Cave",
            LocationKind::Temple => "Temple",
            LocationKind::Heritage => "Heritage",
            LocationKind::Fort => "Fort",
            LocationKind::City => "City",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Active,
    Inactive,
}

/// A bookable destination rendered on the admin map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub coordinates: Coordinates,
    pub address: String,
    pub kind: LocationKind,
    pub status: LocationStatus,
    pub image: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
