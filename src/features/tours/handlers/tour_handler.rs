use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::features::tours::dtos::{CreateTourDto, TourResponseDto, TourStatsDto, UpdateTourDto};
use crate::features::tours::services::TourService;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List tours (paginated)
#[utoipa::path(
    get,
    path = "/api/tours",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of tours", body = ApiResponse<Vec<TourResponseDto>>),
    ),
    tag = "tours"
)]
pub async fn list_tours(
    State(service): State<Arc<TourService>>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<TourResponseDto>>>> {
    let (tours, total) = service.list(&pagination)?;
    let data = tours.into_iter().map(|t| t.into()).collect();
    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Store-level statistics for the tours collection
#[utoipa::path(
    get,
    path = "/api/tours/stats",
    responses(
        (status = 200, description = "Tour statistics", body = ApiResponse<TourStatsDto>),
    ),
    tag = "tours"
)]
pub async fn tour_stats(
    State(service): State<Arc<TourService>>,
) -> Result<Json<ApiResponse<TourStatsDto>>> {
    let stats = service.stats()?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Get a tour by id
#[utoipa::path(
    get,
    path = "/api/tours/{id}",
    params(("id" = Uuid, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Tour found", body = ApiResponse<TourResponseDto>),
        (status = 404, description = "Tour not found")
    ),
    tag = "tours"
)]
pub async fn get_tour(
    State(service): State<Arc<TourService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TourResponseDto>>> {
    let tour = service.get(id)?;
    Ok(Json(ApiResponse::success(Some(tour.into()), None, None)))
}

/// Create a tour
#[utoipa::path(
    post,
    path = "/api/tours",
    request_body = CreateTourDto,
    responses(
        (status = 200, description = "Tour created", body = ApiResponse<TourResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "tours"
)]
pub async fn create_tour(
    State(service): State<Arc<TourService>>,
    Json(payload): Json<CreateTourDto>,
) -> Result<Json<ApiResponse<TourResponseDto>>> {
    payload.validate()?;
    let tour = service.create(payload)?;
    Ok(Json(ApiResponse::success(
        Some(tour.into()),
        Some("Tour created".to_string()),
        None,
    )))
}

/// Update a tour
#[utoipa::path(
    put,
    path = "/api/tours/{id}",
    params(("id" = Uuid, Path, description = "Tour id")),
    request_body = UpdateTourDto,
    responses(
        (status = 200, description = "Tour updated", body = ApiResponse<TourResponseDto>),
        (status = 404, description = "Tour not found")
    ),
    tag = "tours"
)]
pub async fn update_tour(
    State(service): State<Arc<TourService>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTourDto>,
) -> Result<Json<ApiResponse<TourResponseDto>>> {
    payload.validate()?;
    let tour = service.update(id, payload)?;
    Ok(Json(ApiResponse::success(
        Some(tour.into()),
        Some("Tour updated".to_string()),
        None,
    )))
}

/// Delete a tour
#[utoipa::path(
    delete,
    path = "/api/tours/{id}",
    params(("id" = Uuid, Path, description = "Tour id")),
    responses(
        (status = 200, description = "Tour deleted"),
        (status = 404, description = "Tour not found")
    ),
    tag = "tours"
)]
pub async fn delete_tour(
    State(service): State<Arc<TourService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.remove(id)?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Tour deleted".to_string()),
        None,
    )))
}
