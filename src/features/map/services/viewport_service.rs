use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::config::MapConfig;
use crate::core::error::{AppError, Result};
use crate::features::locations::models::{Location, LocationKind};
use crate::features::locations::services::LocationService;
use crate::features::map::dtos::MapStateDto;
use crate::features::map::engine::{
    CameraMove, ControlKind, ControlPosition, EngineError, EngineSession, FitOptions, LngLat,
    LngLatBounds, MapEngine, MarkerSpec, SessionOptions,
};
use crate::features::map::models::{MarkerHandle, ViewportPhase};
use crate::features::map::services::{credential_store::CredentialStore, filter_service};

const FIT_PADDING: f64 = 60.0;
const FIT_MAX_ZOOM: f64 = 10.0;
const FLY_TO_ZOOM: f64 = 14.0;
const FLY_TO_PITCH: f64 = 45.0;
const FLY_TO_DURATION_MS: u64 = 2000;
const POPUP_DESCRIPTION_LIMIT: usize = 100;

struct ViewportInner {
    phase: ViewportPhase,
    session: Option<Box<dyn EngineSession>>,
    markers: Vec<MarkerHandle>,
    active_kinds: HashSet<LocationKind>,
    query: String,
    search_open: bool,
    /// Bumped on every session teardown so a superseded session's ready
    /// signal cannot touch the replacement
    generation: u64,
}

/// Owns the lifecycle of the one map session: opens it when a credential is
/// available, creates each location's marker exactly once after the session
/// reports ready, keeps marker visibility in sync with the filter state, and
/// drives camera moves.
///
/// Engine failures never leave this service; they surface as the error phase
/// with a message and the credential re-entry affordance.
pub struct ViewportService {
    engine: Arc<dyn MapEngine>,
    locations: Arc<LocationService>,
    credentials: Arc<dyn CredentialStore>,
    config: MapConfig,
    inner: Mutex<ViewportInner>,
}

impl ViewportService {
    pub fn new(
        engine: Arc<dyn MapEngine>,
        locations: Arc<LocationService>,
        credentials: Arc<dyn CredentialStore>,
        config: MapConfig,
    ) -> Self {
        Self {
            engine,
            locations,
            credentials,
            config,
            inner: Mutex::new(ViewportInner {
                phase: ViewportPhase::AwaitingCredential,
                session: None,
                markers: Vec::new(),
                active_kinds: LocationKind::ALL.into_iter().collect(),
                query: String::new(),
                search_open: false,
                generation: 0,
            }),
        }
    }

    /// One-time startup: read the stored credential and open the session if
    /// one is present. The credential is not re-read afterwards; changes
    /// arrive only through save/clear.
    pub async fn bootstrap(self: &Arc<Self>) {
        match self.credentials.load().await {
            Ok(Some(token)) => {
                tracing::info!("Map credential found, opening session");
                self.open_session(token).await;
            }
            Ok(None) => {
                tracing::info!("No map credential stored; awaiting entry");
            }
            Err(e) => {
                tracing::warn!("Failed to load map credential: {}", e);
            }
        }
    }

    pub async fn state(&self) -> Result<MapStateDto> {
        let locations = self.locations.list_all()?;
        let inner = self.inner.lock().await;
        Ok(Self::snapshot(&inner, &locations))
    }

    /// Replace the active kind set and re-derive marker visibility
    pub async fn set_active_kinds(&self, kinds: HashSet<LocationKind>) -> Result<MapStateDto> {
        let locations = self.locations.list_all()?;
        let mut inner = self.inner.lock().await;
        inner.active_kinds = kinds;
        Self::apply_visibility(&mut inner, &locations);
        Ok(Self::snapshot(&inner, &locations))
    }

    /// Update the live search query and re-derive marker visibility
    pub async fn set_search(&self, query: String) -> Result<MapStateDto> {
        let locations = self.locations.list_all()?;
        let mut inner = self.inner.lock().await;
        inner.query = query;
        inner.search_open = true;
        Self::apply_visibility(&mut inner, &locations);
        Ok(Self::snapshot(&inner, &locations))
    }

    /// Move the camera to a location. Always clears the search query and
    /// closes the search panel; the camera move itself needs a ready session.
    pub async fn fly_to(&self, location_id: Uuid) -> Result<MapStateDto> {
        let location = self.locations.get(location_id)?;
        let locations = self.locations.list_all()?;

        let mut inner = self.inner.lock().await;
        inner.query.clear();
        inner.search_open = false;

        if inner.phase == ViewportPhase::Ready {
            if let Some(session) = inner.session.as_mut() {
                session.fly_to(CameraMove {
                    center: LngLat {
                        lng: location.coordinates.lng,
                        lat: location.coordinates.lat,
                    },
                    zoom: FLY_TO_ZOOM,
                    pitch: FLY_TO_PITCH,
                    duration_ms: FLY_TO_DURATION_MS,
                });
            }
        }

        Self::apply_visibility(&mut inner, &locations);
        Ok(Self::snapshot(&inner, &locations))
    }

    /// Persist a new credential and open a fresh session with it
    pub async fn save_credential(self: &Arc<Self>, token: &str) -> Result<MapStateDto> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::Validation(
                "Credential must not be empty".to_string(),
            ));
        }

        self.credentials.save(token).await?;
        self.open_session(token.to_string()).await;
        self.state().await
    }

    /// Drop the credential and tear the session down; every marker handle is
    /// released with it
    pub async fn clear_credential(&self) -> Result<MapStateDto> {
        self.credentials.clear().await?;

        let locations = self.locations.list_all()?;
        let mut inner = self.inner.lock().await;
        Self::teardown_session(&mut inner);
        inner.phase = ViewportPhase::AwaitingCredential;
        tracing::info!("Map credential cleared, session disposed");

        Ok(Self::snapshot(&inner, &locations))
    }

    async fn open_session(self: &Arc<Self>, credential: String) {
        let mut inner = self.inner.lock().await;
        Self::teardown_session(&mut inner);
        inner.phase = ViewportPhase::Initializing;
        let generation = inner.generation;

        let locations = match self.locations.list_all() {
            Ok(locations) => locations,
            Err(e) => {
                inner.phase = ViewportPhase::Error {
                    message: e.to_string(),
                };
                return;
            }
        };

        let center = Self::centroid(&locations).unwrap_or(LngLat {
            lng: self.config.default_center.1,
            lat: self.config.default_center.0,
        });

        let options = SessionOptions {
            credential,
            style_ref: self.config.style_ref.clone(),
            center,
            zoom: self.config.default_zoom,
            pitch: self.config.default_pitch,
        };

        match self.engine.open(options) {
            Ok(mut session) => {
                session.add_control(ControlKind::Navigation, ControlPosition::TopRight);
                session.add_control(ControlKind::Fullscreen, ControlPosition::TopRight);
                let ready = session.ready_signal();
                inner.session = Some(session);
                drop(inner);

                let service = Arc::clone(self);
                tokio::spawn(async move {
                    match ready.await {
                        Ok(()) => service.on_session_ready(generation).await,
                        Err(e) => service.on_session_error(generation, e).await,
                    }
                });
            }
            Err(e) => {
                tracing::warn!("Map session failed to open: {}", e);
                inner.phase = ViewportPhase::Error {
                    message: e.to_string(),
                };
            }
        }
    }

    /// Runs once per session, when the engine reports load: create one marker
    /// per location, fit the viewport around them, apply the current filter.
    async fn on_session_ready(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            return;
        }

        let locations = match self.locations.list_all() {
            Ok(locations) => locations,
            Err(e) => {
                inner.phase = ViewportPhase::Error {
                    message: e.to_string(),
                };
                return;
            }
        };

        {
            let ViewportInner {
                session, markers, ..
            } = &mut *inner;
            let Some(session) = session.as_mut() else {
                return;
            };

            let mut bounds = LngLatBounds::new();
            for location in &locations {
                let position = LngLat {
                    lng: location.coordinates.lng,
                    lat: location.coordinates.lat,
                };
                session.add_marker(MarkerSpec {
                    id: location.id,
                    position,
                    popup_html: popup_html(location),
                });
                markers.push(MarkerHandle {
                    location_id: location.id,
                    visible: true,
                });
                bounds.extend(position);
            }

            if !bounds.is_empty() {
                session.fit_bounds(
                    bounds,
                    FitOptions {
                        padding: FIT_PADDING,
                        max_zoom: FIT_MAX_ZOOM,
                    },
                );
            }
        }

        inner.phase = ViewportPhase::Ready;
        tracing::info!("Map session ready with {} markers", inner.markers.len());
        Self::apply_visibility(&mut inner, &locations);
    }

    async fn on_session_error(&self, generation: u64, error: EngineError) {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            return;
        }

        tracing::warn!("Map engine reported failure: {}", error);
        Self::teardown_session(&mut inner);
        inner.phase = ViewportPhase::Error {
            message: error.to_string(),
        };
    }

    /// Toggle each existing marker by membership in the freshly derived
    /// visible set. Markers are never destroyed or recreated here; the latest
    /// filter state always wins and reapplication is idempotent.
    fn apply_visibility(inner: &mut ViewportInner, locations: &[Location]) {
        if inner.phase != ViewportPhase::Ready {
            return;
        }

        let visible: HashSet<Uuid> =
            filter_service::visible(locations, &inner.active_kinds, &inner.query)
                .iter()
                .map(|l| l.id)
                .collect();

        let ViewportInner {
            session, markers, ..
        } = inner;
        let Some(session) = session.as_mut() else {
            return;
        };

        for marker in markers.iter_mut() {
            let show = visible.contains(&marker.location_id);
            if marker.visible != show {
                marker.visible = show;
                session.set_marker_visible(marker.location_id, show);
            }
        }
    }

    fn teardown_session(inner: &mut ViewportInner) {
        if let Some(mut session) = inner.session.take() {
            session.dispose();
        }
        inner.markers.clear();
        inner.generation += 1;
    }

    fn snapshot(inner: &ViewportInner, locations: &[Location]) -> MapStateDto {
        let error = match &inner.phase {
            ViewportPhase::Error { message } => Some(message.clone()),
            _ => None,
        };

        let visible_location_ids =
            filter_service::visible(locations, &inner.active_kinds, &inner.query)
                .iter()
                .map(|l| l.id)
                .collect();

        let active_kinds = LocationKind::ALL
            .into_iter()
            .filter(|k| inner.active_kinds.contains(k))
            .collect();

        MapStateDto {
            phase: (&inner.phase).into(),
            error,
            marker_count: inner.markers.len(),
            visible_location_ids,
            active_kinds,
            query: inner.query.clone(),
            search_open: inner.search_open,
        }
    }

    /// Mean of all location coordinates; `None` for an empty list
    fn centroid(locations: &[Location]) -> Option<LngLat> {
        if locations.is_empty() {
            return None;
        }
        let count = locations.len() as f64;
        let (lat_sum, lng_sum) = locations.iter().fold((0.0, 0.0), |(lat, lng), l| {
            (lat + l.coordinates.lat, lng + l.coordinates.lng)
        });
        Some(LngLat {
            lng: lng_sum / count,
            lat: lat_sum / count,
        })
    }
}

/// Popup body: thumbnail, name, truncated description, kind badge
fn popup_html(location: &Location) -> String {
    format!(
        concat!(
            r#"<div class="marker-popup">"#,
            r#"<img src="{image}" alt="{name}" class="popup-thumb"/>"#,
            r#"<h3>{name}</h3>"#,
            r#"<p>{description}</p>"#,
            r#"<span class="badge badge-{kind}">{label}</span>"#,
            r#"</div>"#
        ),
        image = location.image,
        name = location.name,
        description = truncate(&location.description, POPUP_DESCRIPTION_LIMIT),
        kind = location.kind.label().to_lowercase(),
        label = location.kind.label(),
    )
}

/// Character-boundary-safe prefix with an ellipsis when shortened
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::features::locations::dtos::{CoordinatesDto, CreateLocationDto};
    use crate::features::locations::models::LocationStatus;
    use crate::features::map::dtos::MapPhaseDto;
    use crate::features::map::engine::{BridgeEngine, EngineCommand, SessionSignal};
    use crate::features::map::services::credential_store::InMemoryCredentialStore;

    fn map_config() -> MapConfig {
        MapConfig {
            style_ref: "streets-v12".to_string(),
            default_center: (19.8762, 75.3433),
            default_zoom: 9.0,
            default_pitch: 0.0,
            credential_path: std::path::PathBuf::from("/tmp/unused"),
        }
    }

    fn seeded_locations() -> Arc<LocationService> {
        Arc::new(LocationService::with_locations(
            crate::shared::seed::demo_locations(),
        ))
    }

    fn service_with(
        locations: Arc<LocationService>,
        credential: Option<&str>,
    ) -> (Arc<ViewportService>, Arc<BridgeEngine>) {
        let engine = Arc::new(BridgeEngine::new());
        let credentials: Arc<dyn CredentialStore> = match credential {
            Some(token) => Arc::new(InMemoryCredentialStore::with_token(token)),
            None => Arc::new(InMemoryCredentialStore::empty()),
        };
        let service = Arc::new(ViewportService::new(
            Arc::clone(&engine) as Arc<dyn MapEngine>,
            locations,
            credentials,
            map_config(),
        ));
        (service, engine)
    }

    async fn wait_for_phase(service: &ViewportService, phase: MapPhaseDto) {
        for _ in 0..100 {
            if service.state().await.unwrap().phase == phase {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("viewport never reached {:?}", phase);
    }

    fn drain(stream: &mut tokio::sync::mpsc::UnboundedReceiver<EngineCommand>) -> Vec<EngineCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = stream.try_recv() {
            commands.push(command);
        }
        commands
    }

    #[tokio::test]
    async fn test_bootstrap_without_credential_awaits_entry() {
        let (service, engine) = service_with(seeded_locations(), None);
        service.bootstrap().await;

        let state = service.state().await.unwrap();
        assert_eq!(state.phase, MapPhaseDto::AwaitingCredential);
        assert_eq!(state.marker_count, 0);
        assert!(engine.take_command_stream().is_none());
    }

    #[tokio::test]
    async fn test_ready_creates_one_marker_per_location_and_fits_once() {
        let locations = seeded_locations();
        let total = locations.list_all().unwrap().len();
        let (service, engine) = service_with(Arc::clone(&locations), Some("pk.token"));

        service.bootstrap().await;
        assert_eq!(service.state().await.unwrap().phase, MapPhaseDto::Initializing);

        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;

        let state = service.state().await.unwrap();
        assert_eq!(state.marker_count, total);

        let commands = drain(&mut stream);
        let added = commands
            .iter()
            .filter(|c| matches!(c, EngineCommand::AddMarker { .. }))
            .count();
        let fits = commands
            .iter()
            .filter(|c| matches!(c, EngineCommand::FitBounds { .. }))
            .count();
        assert_eq!(added, total);
        assert_eq!(fits, 1);
    }

    #[tokio::test]
    async fn test_filter_changes_toggle_visibility_without_recreating_markers() {
        let locations = seeded_locations();
        let total = locations.list_all().unwrap().len();
        let (service, engine) = service_with(Arc::clone(&locations), Some("pk.token"));

        service.bootstrap().await;
        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;
        drain(&mut stream);

        let caves: HashSet<LocationKind> = [LocationKind::Cave].into_iter().collect();
        let state = service.set_active_kinds(caves.clone()).await.unwrap();
        assert_eq!(state.marker_count, total);
        assert_eq!(state.visible_location_ids.len(), 2);

        let commands = drain(&mut stream);
        assert!(!commands.is_empty());
        assert!(commands
            .iter()
            .all(|c| matches!(c, EngineCommand::SetMarkerVisible { .. })));

        // Reapplying the same set is idempotent
        let again = service.set_active_kinds(caves).await.unwrap();
        assert_eq!(again.visible_location_ids, state.visible_location_ids);
    }

    #[tokio::test]
    async fn test_marker_count_is_fixed_for_the_session_lifetime() {
        let locations = seeded_locations();
        let total = locations.list_all().unwrap().len();
        let (service, engine) = service_with(Arc::clone(&locations), Some("pk.token"));

        service.bootstrap().await;
        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;
        drain(&mut stream);

        // A location added mid-session gets no marker until a new session opens
        locations
            .create(CreateLocationDto {
                name: "Pitalkhora Caves".to_string(),
                description: "Early Buddhist caves northwest of Ellora".to_string(),
                coordinates: CoordinatesDto { lat: 20.5, lng: 75.1 },
                address: "Pitalkhora, Maharashtra".to_string(),
                kind: LocationKind::Cave,
                status: LocationStatus::Active,
                image: String::new(),
                category: None,
            })
            .unwrap();

        let state = service
            .set_search("caves".to_string())
            .await
            .unwrap();
        assert_eq!(state.marker_count, total);

        let commands = drain(&mut stream);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, EngineCommand::AddMarker { .. })));
    }

    #[tokio::test]
    async fn test_search_narrows_visible_set() {
        let (service, engine) = service_with(seeded_locations(), Some("pk.token"));
        service.bootstrap().await;
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;

        let state = service.set_search("ellora".to_string()).await.unwrap();
        assert!(state.search_open);
        assert_eq!(state.visible_location_ids.len(), 2); // Ellora Caves + Grishneshwar description
    }

    #[tokio::test]
    async fn test_fly_to_clears_search_and_moves_camera() {
        let locations = seeded_locations();
        let target = locations.list_all().unwrap()[0].clone();
        let (service, engine) = service_with(Arc::clone(&locations), Some("pk.token"));

        service.bootstrap().await;
        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;
        service.set_search("ellora".to_string()).await.unwrap();
        drain(&mut stream);

        let state = service.fly_to(target.id).await.unwrap();
        assert_eq!(state.query, "");
        assert!(!state.search_open);

        let commands = drain(&mut stream);
        let fly = commands
            .iter()
            .find_map(|c| match c {
                EngineCommand::FlyTo {
                    center,
                    zoom,
                    pitch,
                    duration_ms,
                } => Some((*center, *zoom, *pitch, *duration_ms)),
                _ => None,
            })
            .expect("fly_to command emitted");
        assert_eq!(fly.1, 14.0);
        assert_eq!(fly.2, 45.0);
        assert_eq!(fly.3, 2000);
        assert_eq!(fly.0.lat, target.coordinates.lat);
    }

    #[tokio::test]
    async fn test_fly_to_unknown_location_is_not_found() {
        let (service, _engine) = service_with(seeded_locations(), Some("pk.token"));
        service.bootstrap().await;

        let err = service.fly_to(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clear_credential_drops_markers_and_session() {
        let (service, engine) = service_with(seeded_locations(), Some("pk.token"));
        service.bootstrap().await;
        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;
        drain(&mut stream);

        let state = service.clear_credential().await.unwrap();
        assert_eq!(state.phase, MapPhaseDto::AwaitingCredential);
        assert_eq!(state.marker_count, 0);

        let commands = drain(&mut stream);
        assert!(commands.iter().any(|c| matches!(c, EngineCommand::Remove)));
    }

    #[tokio::test]
    async fn test_engine_failure_surfaces_error_phase_and_recovers_on_reentry() {
        let (service, engine) = service_with(seeded_locations(), Some("pk.expired"));
        service.bootstrap().await;

        engine.dispatch_signal(SessionSignal::Failed("Unauthorized: invalid token".to_string()));
        wait_for_phase(&service, MapPhaseDto::Error).await;

        let state = service.state().await.unwrap();
        assert!(state.error.as_deref().unwrap().contains("invalid token"));
        assert_eq!(state.marker_count, 0);

        // Re-entering a credential opens a fresh session
        let state = service.save_credential("pk.fresh").await.unwrap();
        assert_eq!(state.phase, MapPhaseDto::Initializing);
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;
    }

    #[tokio::test]
    async fn test_empty_location_list_uses_default_center_and_skips_fit() {
        let locations = Arc::new(LocationService::new());
        let (service, engine) = service_with(locations, Some("pk.token"));

        service.bootstrap().await;
        let mut stream = engine.take_command_stream().unwrap();
        engine.dispatch_signal(SessionSignal::Ready);
        wait_for_phase(&service, MapPhaseDto::Ready).await;

        let commands = drain(&mut stream);
        let init_center = commands
            .iter()
            .find_map(|c| match c {
                EngineCommand::Init { center, .. } => Some(*center),
                _ => None,
            })
            .expect("init command emitted");
        assert_eq!(init_center.lat, 19.8762);
        assert_eq!(init_center.lng, 75.3433);
        assert!(!commands
            .iter()
            .any(|c| matches!(c, EngineCommand::FitBounds { .. })));
    }

    #[tokio::test]
    async fn test_save_blank_credential_is_rejected() {
        let (service, _engine) = service_with(seeded_locations(), None);
        service.bootstrap().await;

        let err = service.save_credential("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_centroid_is_coordinate_mean() {
        let locations = crate::shared::seed::demo_locations();
        let centroid = ViewportService::centroid(&locations).unwrap();

        let lat_mean =
            locations.iter().map(|l| l.coordinates.lat).sum::<f64>() / locations.len() as f64;
        assert!((centroid.lat - lat_mean).abs() < 1e-9);
        assert_eq!(ViewportService::centroid(&[]), None);
    }

    #[test]
    fn test_popup_html_contains_thumbnail_name_and_badge() {
        let location = &crate::shared::seed::demo_locations()[0];
        let html = popup_html(location);

        assert!(html.contains(&location.image));
        assert!(html.contains("Ellora Caves"));
        assert!(html.contains("badge-cave"));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 100), "short");
        let long = "x".repeat(150);
        let cut = truncate(&long, 100);
        assert_eq!(cut.chars().count(), 101);
        assert!(cut.ends_with('…'));
        // multi-byte input must not split a character
        let marathi = "वेरूळ".repeat(40);
        assert!(truncate(&marathi, 100).ends_with('…'));
    }
}
