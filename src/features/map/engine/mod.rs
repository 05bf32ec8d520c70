pub mod bridge;

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use bridge::{BridgeEngine, EngineCommand, SessionSignal};

/// Errors reported by the map engine boundary. These never cross a handler
/// boundary; the viewport controller absorbs them into its error phase.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error("Map credential is invalid or expired")]
    InvalidCredential,

    #[error("Map session failed to initialize: {0}")]
    Init(String),

    #[error("Map engine runtime failure: {0}")]
    Runtime(String),
}

/// Longitude/latitude pair in the engine's native order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Bounding box grown point by point, as the engine's bounds builder does
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LngLatBounds {
    pub sw: Option<LngLat>,
    pub ne: Option<LngLat>,
}

impl LngLatBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, point: LngLat) {
        match (&mut self.sw, &mut self.ne) {
            (Some(sw), Some(ne)) => {
                sw.lng = sw.lng.min(point.lng);
                sw.lat = sw.lat.min(point.lat);
                ne.lng = ne.lng.max(point.lng);
                ne.lat = ne.lat.max(point.lat);
            }
            _ => {
                self.sw = Some(point);
                self.ne = Some(point);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sw.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Navigation,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Parameters for opening one engine session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub credential: String,
    pub style_ref: String,
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
}

/// One marker with its popup, addressed by the owning location's id
#[derive(Debug, Clone)]
pub struct MarkerSpec {
    pub id: Uuid,
    pub position: LngLat,
    pub popup_html: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CameraMove {
    pub center: LngLat,
    pub zoom: f64,
    pub pitch: f64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub padding: f64,
    pub max_zoom: f64,
}

/// One-shot readiness signal: resolves exactly once, when the engine reports
/// load or error for the session. All later session calls are synchronous
/// against stored handles.
pub type ReadyFuture = Pin<Box<dyn Future<Output = Result<(), EngineError>> + Send>>;

/// Provider-agnostic map engine. Rendering internals (tiles, projection) stay
/// behind this seam.
pub trait MapEngine: Send + Sync {
    fn open(&self, options: SessionOptions) -> Result<Box<dyn EngineSession>, EngineError>;
}

/// An open map session. Exclusively owned by the viewport controller; dropped
/// handles must not outlive it.
pub trait EngineSession: Send + Sync + std::fmt::Debug {
    /// Readiness future for this session; see [`ReadyFuture`]
    fn ready_signal(&self) -> ReadyFuture;

    fn add_control(&mut self, kind: ControlKind, position: ControlPosition);

    fn add_marker(&mut self, marker: MarkerSpec);

    fn set_marker_visible(&mut self, id: Uuid, visible: bool);

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitOptions);

    fn fly_to(&mut self, camera: CameraMove);

    /// Tear the session down; further calls are no-ops
    fn dispose(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_extend_grows_box() {
        let mut bounds = LngLatBounds::new();
        assert!(bounds.is_empty());

        bounds.extend(LngLat { lng: 75.1, lat: 20.0 });
        bounds.extend(LngLat { lng: 75.7, lat: 19.9 });
        bounds.extend(LngLat { lng: 75.3, lat: 20.5 });

        let sw = bounds.sw.unwrap();
        let ne = bounds.ne.unwrap();
        assert_eq!(sw.lng, 75.1);
        assert_eq!(sw.lat, 19.9);
        assert_eq!(ne.lng, 75.7);
        assert_eq!(ne.lat, 20.5);
    }
}
