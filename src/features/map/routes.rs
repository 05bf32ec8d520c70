use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::locations::services::LocationService;
use crate::features::map::engine::BridgeEngine;
use crate::features::map::handlers;
use crate::features::map::services::ViewportService;
use crate::features::tours::services::TourService;

/// Shared state for the map feature handlers
#[derive(Clone)]
pub struct MapState {
    pub viewport: Arc<ViewportService>,
    pub locations: Arc<LocationService>,
    pub tours: Arc<TourService>,
    pub bridge: Arc<BridgeEngine>,
}

/// Create routes for the map feature
pub fn routes(state: MapState) -> Router {
    Router::new()
        .route("/api/map/state", get(handlers::get_map_state))
        .route("/api/map/filters", put(handlers::set_filters))
        .route("/api/map/search", put(handlers::set_search))
        .route("/api/map/fly-to", post(handlers::fly_to))
        .route("/api/map/locations/{id}/tours", get(handlers::linked_tours))
        .route(
            "/api/map/locations/{id}/gallery-index",
            get(handlers::gallery_index),
        )
        .route(
            "/api/map/credential",
            put(handlers::save_credential).delete(handlers::clear_credential),
        )
        .route("/api/map/commands", get(handlers::command_stream))
        .route("/api/map/events", post(handlers::engine_event))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use super::*;
    use crate::features::map::services::credential_store::InMemoryCredentialStore;
    use crate::features::map::services::CredentialStore;

    fn test_server() -> TestServer {
        test_server_with_store().0
    }

    fn test_server_with_store() -> (TestServer, Arc<LocationService>) {
        let locations = Arc::new(LocationService::with_locations(
            crate::shared::seed::demo_locations(),
        ));
        let tours = Arc::new(TourService::with_tours(crate::shared::seed::demo_tours()));
        let bridge = Arc::new(BridgeEngine::new());
        let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::empty());

        let viewport = Arc::new(ViewportService::new(
            Arc::clone(&bridge) as _,
            Arc::clone(&locations),
            credentials,
            crate::core::config::MapConfig {
                style_ref: "streets-v12".to_string(),
                default_center: (19.8762, 75.3433),
                default_zoom: 9.0,
                default_pitch: 0.0,
                credential_path: std::path::PathBuf::from("/tmp/unused"),
            },
        ));

        let state = MapState {
            viewport,
            locations: Arc::clone(&locations),
            tours,
            bridge,
        };
        (TestServer::new(routes(state)).unwrap(), locations)
    }

    async fn phase(server: &TestServer) -> String {
        let body: Value = server.get("/api/map/state").await.json();
        body["data"]["phase"].as_str().unwrap().to_string()
    }

    async fn wait_for_phase(server: &TestServer, expected: &str) {
        for _ in 0..100 {
            if phase(server).await == expected {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("map never reached phase {}", expected);
    }

    #[tokio::test]
    async fn test_full_session_flow_over_http() {
        let server = test_server();

        // No credential yet
        assert_eq!(phase(&server).await, "awaiting_credential");

        // Enter a credential; the session starts initializing
        let response = server
            .put("/api/map/credential")
            .json(&json!({"token": "pk.test"}))
            .await;
        response.assert_status_ok();
        assert_eq!(phase(&server).await, "initializing");

        // The renderer reports load; markers appear
        server
            .post("/api/map/events")
            .json(&json!({"event": "load"}))
            .await
            .assert_status_ok();
        wait_for_phase(&server, "ready").await;

        let body: Value = server.get("/api/map/state").await.json();
        assert_eq!(body["data"]["markerCount"], 6);
        assert_eq!(body["data"]["visibleLocationIds"].as_array().unwrap().len(), 6);

        // Narrow the filter to caves
        let body: Value = server
            .put("/api/map/filters")
            .json(&json!({"kinds": ["cave"]}))
            .await
            .json();
        assert_eq!(body["data"]["visibleLocationIds"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["markerCount"], 6);

        // Clear the credential; everything tears down
        let body: Value = server.delete("/api/map/credential").await.json();
        assert_eq!(body["data"]["phase"], "awaiting_credential");
        assert_eq!(body["data"]["markerCount"], 0);
    }

    #[tokio::test]
    async fn test_engine_error_event_surfaces_error_phase() {
        let server = test_server();
        server
            .put("/api/map/credential")
            .json(&json!({"token": "pk.expired"}))
            .await
            .assert_status_ok();

        server
            .post("/api/map/events")
            .json(&json!({"event": "error", "message": "Invalid access token"}))
            .await
            .assert_status_ok();
        wait_for_phase(&server, "error").await;

        let body: Value = server.get("/api/map/state").await.json();
        assert_eq!(body["data"]["error"], "Map engine runtime failure: Invalid access token");
    }

    #[tokio::test]
    async fn test_event_without_session_is_not_found() {
        let server = test_server();
        server
            .post("/api/map/events")
            .json(&json!({"event": "load"}))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_linked_tours_and_gallery_index() {
        let (server, locations) = test_server_with_store();
        let all = locations.list_all().unwrap();
        let ellora = all.iter().find(|l| l.name == "Ellora Caves").unwrap();

        let body: Value = server
            .get(&format!("/api/map/locations/{}/tours", ellora.id))
            .await
            .json();
        let linked = body["data"].as_array().unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0]["location"], "Aurangabad → Ellora Caves");
        assert_eq!(body["meta"]["total"], 1);

        let body: Value = server
            .get(&format!("/api/map/locations/{}/gallery-index", ellora.id))
            .await
            .json();
        assert_eq!(body["data"]["index"], 0);

        // Unknown id falls back to the first page
        let body: Value = server
            .get(&format!(
                "/api/map/locations/{}/gallery-index",
                uuid::Uuid::new_v4()
            ))
            .await
            .json();
        assert_eq!(body["data"]["index"], 0);
    }

    #[tokio::test]
    async fn test_search_and_fly_to_round_trip() {
        let server = test_server();
        server
            .put("/api/map/credential")
            .json(&json!({"token": "pk.test"}))
            .await
            .assert_status_ok();
        server
            .post("/api/map/events")
            .json(&json!({"event": "load"}))
            .await
            .assert_status_ok();
        wait_for_phase(&server, "ready").await;

        let body: Value = server
            .put("/api/map/search")
            .json(&json!({"query": "ellora"}))
            .await
            .json();
        assert_eq!(body["data"]["searchOpen"], true);
        let visible = body["data"]["visibleLocationIds"].as_array().unwrap().clone();
        assert_eq!(visible.len(), 2);

        let target = visible[0].as_str().unwrap();
        let body: Value = server
            .post("/api/map/fly-to")
            .json(&json!({"locationId": target}))
            .await
            .json();
        assert_eq!(body["data"]["query"], "");
        assert_eq!(body["data"]["searchOpen"], false);
    }

    #[tokio::test]
    async fn test_blank_credential_is_rejected() {
        let server = test_server();
        server
            .put("/api/map/credential")
            .json(&json!({"token": ""}))
            .await
            .assert_status_bad_request();
    }
}
