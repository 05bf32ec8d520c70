use uuid::Uuid;

use crate::features::locations::models::Location;

/// Index of the selected location within the ordered collection, used to seed
/// the paged image viewer. Falls back to the first page when the id is gone
/// (e.g. deleted between click and lookup).
pub fn image_index(locations: &[Location], selected: Uuid) -> usize {
    locations
        .iter()
        .position(|l| l.id == selected)
        .unwrap_or(0)
}
