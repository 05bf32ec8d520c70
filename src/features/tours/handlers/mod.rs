mod tour_handler;

pub use tour_handler::*;
