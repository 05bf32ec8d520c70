use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::tours::handlers;
use crate::features::tours::services::TourService;

/// Create routes for the tours feature
pub fn routes(service: Arc<TourService>) -> Router {
    Router::new()
        .route(
            "/api/tours",
            post(handlers::create_tour).get(handlers::list_tours),
        )
        .route("/api/tours/stats", get(handlers::tour_stats))
        .route(
            "/api/tours/{id}",
            get(handlers::get_tour)
                .put(handlers::update_tour)
                .delete(handlers::delete_tour),
        )
        .with_state(service)
}
