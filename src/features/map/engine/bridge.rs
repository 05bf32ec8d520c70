use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use super::{
    CameraMove, ControlKind, ControlPosition, EngineError, EngineSession, FitOptions, LngLat,
    LngLatBounds, MapEngine, MarkerSpec, ReadyFuture, SessionOptions,
};

/// Lifecycle signal relayed from the browser-side renderer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSignal {
    Loading,
    Ready,
    Failed(String),
}

/// One serialized engine call. The browser shim drains these in order and
/// replays them against the real GL renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineCommand {
    Init {
        style_ref: String,
        center: LngLat,
        zoom: f64,
        pitch: f64,
    },
    AddControl {
        kind: ControlKind,
        position: ControlPosition,
    },
    AddMarker {
        id: Uuid,
        position: LngLat,
        popup_html: String,
    },
    SetMarkerVisible {
        id: Uuid,
        visible: bool,
    },
    FitBounds {
        bounds: LngLatBounds,
        padding: f64,
        max_zoom: f64,
    },
    FlyTo {
        center: LngLat,
        zoom: f64,
        pitch: f64,
        duration_ms: u64,
    },
    Remove,
}

struct ActiveSession {
    signal_tx: watch::Sender<SessionSignal>,
    /// Command stream held here until the relay claims it
    stream: Option<mpsc::UnboundedReceiver<EngineCommand>>,
}

/// Shipped [`MapEngine`]: forwards every session call as an [`EngineCommand`]
/// to the frontend relay and resolves the session's ready signal from the
/// renderer's load/error events.
pub struct BridgeEngine {
    active: Mutex<Option<ActiveSession>>,
}

impl BridgeEngine {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    /// Claim the active session's command stream. Yields once per session;
    /// `None` when no session is open or the stream was already claimed.
    pub fn take_command_stream(&self) -> Option<mpsc::UnboundedReceiver<EngineCommand>> {
        self.lock_active().as_mut().and_then(|s| s.stream.take())
    }

    /// Deliver a renderer signal to the active session. Returns false when no
    /// session is open to receive it (never opened, or already disposed).
    pub fn dispatch_signal(&self, signal: SessionSignal) -> bool {
        let mut guard = self.lock_active();
        match guard.as_ref() {
            Some(session) if session.signal_tx.receiver_count() > 0 => {
                session.signal_tx.send_replace(signal);
                true
            }
            Some(_) => {
                *guard = None;
                false
            }
            None => false,
        }
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<ActiveSession>> {
        // A poisoned lock only means a panicked writer; the state is a plain
        // Option swap and stays usable.
        match self.active.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for BridgeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEngine for BridgeEngine {
    fn open(&self, options: SessionOptions) -> Result<Box<dyn EngineSession>, EngineError> {
        if options.credential.trim().is_empty() {
            return Err(EngineError::InvalidCredential);
        }

        let (signal_tx, signal_rx) = watch::channel(SessionSignal::Loading);
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let session = BridgeSession {
            commands: command_tx,
            signal_rx,
            disposed: false,
        };
        session.send(EngineCommand::Init {
            style_ref: options.style_ref,
            center: options.center,
            zoom: options.zoom,
            pitch: options.pitch,
        });

        *self.lock_active() = Some(ActiveSession {
            signal_tx,
            stream: Some(command_rx),
        });

        Ok(Box::new(session))
    }
}

#[derive(Debug)]
struct BridgeSession {
    commands: mpsc::UnboundedSender<EngineCommand>,
    signal_rx: watch::Receiver<SessionSignal>,
    disposed: bool,
}

impl BridgeSession {
    fn send(&self, command: EngineCommand) {
        if self.disposed {
            return;
        }
        // A closed receiver means the relay is gone; the renderer will replay
        // from a fresh session, so dropped commands are harmless here.
        let _ = self.commands.send(command);
    }
}

impl EngineSession for BridgeSession {
    fn ready_signal(&self) -> ReadyFuture {
        let mut rx = self.signal_rx.clone();
        Box::pin(async move {
            loop {
                let current = rx.borrow().clone();
                match current {
                    SessionSignal::Ready => return Ok(()),
                    SessionSignal::Failed(message) => return Err(EngineError::Runtime(message)),
                    SessionSignal::Loading => {
                        if rx.changed().await.is_err() {
                            return Err(EngineError::Runtime(
                                "Session closed before load".to_string(),
                            ));
                        }
                    }
                }
            }
        })
    }

    fn add_control(&mut self, kind: ControlKind, position: ControlPosition) {
        self.send(EngineCommand::AddControl { kind, position });
    }

    fn add_marker(&mut self, marker: MarkerSpec) {
        self.send(EngineCommand::AddMarker {
            id: marker.id,
            position: marker.position,
            popup_html: marker.popup_html,
        });
    }

    fn set_marker_visible(&mut self, id: Uuid, visible: bool) {
        self.send(EngineCommand::SetMarkerVisible { id, visible });
    }

    fn fit_bounds(&mut self, bounds: LngLatBounds, options: FitOptions) {
        self.send(EngineCommand::FitBounds {
            bounds,
            padding: options.padding,
            max_zoom: options.max_zoom,
        });
    }

    fn fly_to(&mut self, camera: CameraMove) {
        self.send(EngineCommand::FlyTo {
            center: camera.center,
            zoom: camera.zoom,
            pitch: camera.pitch,
            duration_ms: camera.duration_ms,
        });
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.send(EngineCommand::Remove);
        self.disposed = true;
    }
}
