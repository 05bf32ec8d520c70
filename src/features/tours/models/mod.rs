mod tour;

pub use tour::{Tour, TourStatus};
