use axum::{
    extract::{Path, State},
    response::{sse::Event, IntoResponse, Response, Sse},
    Json,
};
use tokio_stream::{wrappers::UnboundedReceiverStream, StreamExt};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::map::dtos::{
    CredentialDto, EngineEventDto, EngineEventKind, FlyToDto, GalleryIndexDto, MapStateDto,
    SearchDto, SetFiltersDto,
};
use crate::features::map::engine::SessionSignal;
use crate::features::map::routes::MapState;
use crate::features::map::services::{gallery_service, linker_service};
use crate::features::tours::dtos::TourResponseDto;
use crate::shared::types::{ApiResponse, Meta};

/// Current map feature state
#[utoipa::path(
    get,
    path = "/api/map/state",
    responses(
        (status = 200, description = "Map state", body = ApiResponse<MapStateDto>),
    ),
    tag = "map"
)]
pub async fn get_map_state(
    State(state): State<MapState>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    let snapshot = state.viewport.state().await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Replace the active kind filter
#[utoipa::path(
    put,
    path = "/api/map/filters",
    request_body = SetFiltersDto,
    responses(
        (status = 200, description = "Filter applied", body = ApiResponse<MapStateDto>),
    ),
    tag = "map"
)]
pub async fn set_filters(
    State(state): State<MapState>,
    Json(payload): Json<SetFiltersDto>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    let kinds = payload.kinds.into_iter().collect();
    let snapshot = state.viewport.set_active_kinds(kinds).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Update the live search query
#[utoipa::path(
    put,
    path = "/api/map/search",
    request_body = SearchDto,
    responses(
        (status = 200, description = "Search applied", body = ApiResponse<MapStateDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "map"
)]
pub async fn set_search(
    State(state): State<MapState>,
    Json(payload): Json<SearchDto>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    payload.validate()?;
    let snapshot = state.viewport.set_search(payload.query).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Move the camera to a location (marker or search-result click)
#[utoipa::path(
    post,
    path = "/api/map/fly-to",
    request_body = FlyToDto,
    responses(
        (status = 200, description = "Camera move issued", body = ApiResponse<MapStateDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "map"
)]
pub async fn fly_to(
    State(state): State<MapState>,
    Json(payload): Json<FlyToDto>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    let snapshot = state.viewport.fly_to(payload.location_id).await?;
    Ok(Json(ApiResponse::success(Some(snapshot), None, None)))
}

/// Tours inferred to belong to a location
#[utoipa::path(
    get,
    path = "/api/map/locations/{id}/tours",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, description = "Linked tours", body = ApiResponse<Vec<TourResponseDto>>),
        (status = 404, description = "Location not found")
    ),
    tag = "map"
)]
pub async fn linked_tours(
    State(state): State<MapState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TourResponseDto>>>> {
    let location = state.locations.get(id)?;
    let tours = state.tours.list_all()?;

    let linked: Vec<TourResponseDto> = linker_service::linked_tours(&location, &tours)
        .into_iter()
        .cloned()
        .map(|t| t.into())
        .collect();
    let total = linked.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(linked),
        None,
        Some(Meta { total }),
    )))
}

/// Seed index for the location's paged image viewer
#[utoipa::path(
    get,
    path = "/api/map/locations/{id}/gallery-index",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, description = "Gallery index", body = ApiResponse<GalleryIndexDto>),
    ),
    tag = "map"
)]
pub async fn gallery_index(
    State(state): State<MapState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<GalleryIndexDto>>> {
    let locations = state.locations.list_all()?;
    let index = gallery_service::image_index(&locations, id);
    Ok(Json(ApiResponse::success(
        Some(GalleryIndexDto { index }),
        None,
        None,
    )))
}

/// Save the map access credential and open a session with it
#[utoipa::path(
    put,
    path = "/api/map/credential",
    request_body = CredentialDto,
    responses(
        (status = 200, description = "Credential saved", body = ApiResponse<MapStateDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "map"
)]
pub async fn save_credential(
    State(state): State<MapState>,
    Json(payload): Json<CredentialDto>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    payload.validate()?;
    let snapshot = state.viewport.save_credential(&payload.token).await?;
    Ok(Json(ApiResponse::success(
        Some(snapshot),
        Some("Credential saved".to_string()),
        None,
    )))
}

/// Clear the map access credential and dispose the session
#[utoipa::path(
    delete,
    path = "/api/map/credential",
    responses(
        (status = 200, description = "Credential cleared", body = ApiResponse<MapStateDto>),
    ),
    tag = "map"
)]
pub async fn clear_credential(
    State(state): State<MapState>,
) -> Result<Json<ApiResponse<MapStateDto>>> {
    let snapshot = state.viewport.clear_credential().await?;
    Ok(Json(ApiResponse::success(
        Some(snapshot),
        Some("Credential cleared".to_string()),
        None,
    )))
}

/// Engine command stream for the frontend renderer shim.
///
/// One consumer per session: the stream is claimed on first subscribe and
/// replays every queued command in order.
#[utoipa::path(
    get,
    path = "/api/map/commands",
    responses(
        (status = 200, description = "SSE stream of engine commands"),
        (status = 404, description = "No active session or stream already claimed")
    ),
    tag = "map"
)]
pub async fn command_stream(State(state): State<MapState>) -> Result<Response> {
    let rx = state.bridge.take_command_stream().ok_or_else(|| {
        AppError::NotFound("No active map session command stream".to_string())
    })?;

    let stream = UnboundedReceiverStream::new(rx).map(|command| {
        Event::default()
            .json_data(&command)
            .map_err(|e| AppError::Internal(format!("Failed to encode engine command: {}", e)))
    });

    let sse = Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    );

    Ok(sse.into_response())
}

/// Renderer lifecycle event (load/error) relayed by the frontend shim
#[utoipa::path(
    post,
    path = "/api/map/events",
    request_body = EngineEventDto,
    responses(
        (status = 200, description = "Event delivered"),
        (status = 404, description = "No active session")
    ),
    tag = "map"
)]
pub async fn engine_event(
    State(state): State<MapState>,
    Json(payload): Json<EngineEventDto>,
) -> Result<Json<ApiResponse<()>>> {
    let signal = match payload.event {
        EngineEventKind::Load => SessionSignal::Ready,
        EngineEventKind::Error => SessionSignal::Failed(
            payload
                .message
                .unwrap_or_else(|| "Map engine reported an error".to_string()),
        ),
    };

    if !state.bridge.dispatch_signal(signal) {
        return Err(AppError::NotFound("No active map session".to_string()));
    }

    Ok(Json(ApiResponse::success(None, None, None)))
}
