use std::collections::HashSet;

use crate::features::locations::models::{Location, LocationKind};

/// Derive the visible subset of locations from the active kind set and the
/// free-text search query.
///
/// Total and deterministic; recomputed in full on every input change. The
/// collection is admin-dashboard sized, so the O(n) pass is fine.
pub fn visible<'a>(
    locations: &'a [Location],
    active_kinds: &HashSet<LocationKind>,
    query: &str,
) -> Vec<&'a Location> {
    let query = query.trim().to_lowercase();

    locations
        .iter()
        .filter(|l| active_kinds.contains(&l.kind))
        .filter(|l| {
            if query.is_empty() {
                return true;
            }
            l.name.to_lowercase().contains(&query)
                || l.description.to_lowercase().contains(&query)
        })
        .collect()
}
