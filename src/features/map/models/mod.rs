mod viewport;

pub use viewport::{MarkerHandle, ViewportPhase};
