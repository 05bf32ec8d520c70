use crate::features::locations::models::Location;
use crate::features::tours::models::Tour;

/// Delimiter used in hierarchical tour destinations ("Aurangabad → Ellora Caves")
const HIERARCHY_DELIMITER: char = '→';

/// Infer the tours associated with a location.
///
/// The two collections carry no foreign key; association is a best-effort
/// text heuristic evaluated at query time:
/// - the tour's destination text contains the location name, or
/// - the location name contains the tour's leaf destination (the segment
///   after the last '→'), or
/// - the tour's destination text contains the first comma-delimited segment
///   of the location address.
///
/// The first-comma rule assumes the most specific locality leads the address,
/// which does not hold for every address format; it is kept as-is because
/// changing it would change matches for existing data.
///
/// Matches keep the tours collection's original order. A tour may match zero
/// or many locations and vice versa.
pub fn linked_tours<'a>(location: &Location, tours: &'a [Tour]) -> Vec<&'a Tour> {
    let name = location.name.trim().to_lowercase();
    let address_head = location
        .address
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    tours
        .iter()
        .filter(|tour| {
            let destination = tour.location.trim().to_lowercase();

            if !name.is_empty() && destination.contains(&name) {
                return true;
            }

            if let Some(leaf) = leaf_destination(&destination) {
                if !leaf.is_empty() && name.contains(leaf) {
                    return true;
                }
            }

            !address_head.is_empty() && destination.contains(&address_head)
        })
        .collect()
}

/// Trailing segment of a hierarchical destination string, if it has one
fn leaf_destination(destination: &str) -> Option<&str> {
    if !destination.contains(HIERARCHY_DELIMITER) {
        return None;
    }
    destination
        .rsplit(HIERARCHY_DELIMITER)
        .next()
        .map(str::trim)
}
