use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::locations::handlers;
use crate::features::locations::services::LocationService;

/// Create routes for the locations feature
pub fn routes(service: Arc<LocationService>) -> Router {
    Router::new()
        .route(
            "/api/locations",
            post(handlers::create_location).get(handlers::list_locations),
        )
        .route("/api/locations/stats", get(handlers::location_stats))
        .route(
            "/api/locations/{id}",
            get(handlers::get_location)
                .put(handlers::update_location)
                .delete(handlers::delete_location),
        )
        .with_state(service)
}
