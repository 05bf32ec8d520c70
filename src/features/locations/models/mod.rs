mod location;

pub use location::{Coordinates, Location, LocationKind, LocationStatus};
