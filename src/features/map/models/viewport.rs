use uuid::Uuid;

/// Lifecycle of the one map session the viewport controller owns.
///
/// A missing credential is a state, not an error: the dashboard renders the
/// credential-entry affordance and no engine call is made.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewportPhase {
    AwaitingCredential,
    Initializing,
    Ready,
    Error { message: String },
}

/// Process-local handle to one created marker. Markers are created exactly
/// once per session; afterwards only the visibility flag changes.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerHandle {
    pub location_id: Uuid,
    pub visible: bool,
}
