use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::locations::models::LocationKind;
use crate::features::map::models::ViewportPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MapPhaseDto {
    AwaitingCredential,
    Initializing,
    Ready,
    Error,
}

/// Snapshot of the map feature state as the dashboard renders it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapStateDto {
    pub phase: MapPhaseDto,
    /// Human-readable engine failure, present only in the error phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub marker_count: usize,
    pub visible_location_ids: Vec<Uuid>,
    pub active_kinds: Vec<LocationKind>,
    pub query: String,
    pub search_open: bool,
}

impl From<&ViewportPhase> for MapPhaseDto {
    fn from(phase: &ViewportPhase) -> Self {
        match phase {
            ViewportPhase::AwaitingCredential => MapPhaseDto::AwaitingCredential,
            ViewportPhase::Initializing => MapPhaseDto::Initializing,
            ViewportPhase::Ready => MapPhaseDto::Ready,
            ViewportPhase::Error { .. } => MapPhaseDto::Error,
        }
    }
}

/// Request DTO for replacing the active kind filter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetFiltersDto {
    pub kinds: Vec<LocationKind>,
}

/// Request DTO for the live search box
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDto {
    #[validate(length(max = 255, message = "Query must not exceed 255 characters"))]
    pub query: String,
}

/// Request DTO for a marker/search-result click
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FlyToDto {
    pub location_id: Uuid,
}

/// Request DTO for saving the map access credential
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialDto {
    #[validate(length(min = 1, max = 500, message = "Token must be 1-500 characters"))]
    pub token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EngineEventKind {
    Load,
    Error,
}

/// Renderer lifecycle event relayed by the frontend shim
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineEventDto {
    pub event: EngineEventKind,
    #[serde(default)]
    pub message: Option<String>,
}

/// Seed index for the paged image viewer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryIndexDto {
    pub index: usize,
}
