use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::locations::dtos::{
    CreateLocationDto, LocationResponseDto, LocationStatsDto, UpdateLocationDto,
};
use crate::features::locations::services::LocationService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List locations (paginated)
#[utoipa::path(
    get,
    path = "/api/locations",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of locations", body = ApiResponse<Vec<LocationResponseDto>>),
    ),
    tag = "locations"
)]
pub async fn list_locations(
    State(service): State<Arc<LocationService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<LocationResponseDto>>>> {
    let (locations, total) = service.list(&pagination)?;
    let data = locations.into_iter().map(|l| l.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Store-level statistics for the locations collection
#[utoipa::path(
    get,
    path = "/api/locations/stats",
    responses(
        (status = 200, description = "Location statistics", body = ApiResponse<LocationStatsDto>),
    ),
    tag = "locations"
)]
pub async fn location_stats(
    State(service): State<Arc<LocationService>>,
) -> Result<Json<ApiResponse<LocationStatsDto>>> {
    let stats = service.stats()?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Get a location by id
#[utoipa::path(
    get,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location found", body = ApiResponse<LocationResponseDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn get_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    let location = service.get(id)?;
    Ok(Json(ApiResponse::success(Some(location.into()), None, None)))
}

/// Create a location
#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = CreateLocationDto,
    responses(
        (status = 200, description = "Location created", body = ApiResponse<LocationResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "locations"
)]
pub async fn create_location(
    State(service): State<Arc<LocationService>>,
    Json(payload): Json<CreateLocationDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    payload.validate()?;
    let location = service.create(payload)?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Location created".to_string()),
        None,
    )))
}

/// Update a location
#[utoipa::path(
    put,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location id")),
    request_body = UpdateLocationDto,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationResponseDto>),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn update_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLocationDto>,
) -> Result<Json<ApiResponse<LocationResponseDto>>> {
    payload.validate()?;
    let location = service.update(id, payload)?;
    Ok(Json(ApiResponse::success(
        Some(location.into()),
        Some("Location updated".to_string()),
        None,
    )))
}

/// Delete a location
#[utoipa::path(
    delete,
    path = "/api/locations/{id}",
    params(("id" = Uuid, Path, description = "Location id")),
    responses(
        (status = 200, description = "Location deleted"),
        (status = 404, description = "Location not found")
    ),
    tag = "locations"
)]
pub async fn delete_location(
    State(service): State<Arc<LocationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove(id)?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Location deleted".to_string()),
        None,
    )))
}
