use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::features::locations::models::{Coordinates, Location, LocationKind, LocationStatus};
use crate::features::tours::models::{Tour, TourStatus};

/// Demo dataset for local development and the marketing site preview.
/// Loaded at boot when TOURDESK_SEED_DEMO is set.
pub fn demo_locations() -> Vec<Location> {
    let now = Utc::now();
    let location = |name: &str, description: &str, lat: f64, lng: f64, address: &str, kind| Location {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        coordinates: Coordinates { lat, lng },
        address: address.to_string(),
        kind,
        status: LocationStatus::Active,
        image: format!(
            "https://cdn.tourdesk.example/destinations/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        ),
        category: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        location(
            "Ellora Caves",
            "Rock-cut cave monasteries and temples spanning Buddhist, Hindu and Jain traditions.",
            20.0268,
            75.1771,
            "Ellora, Aurangabad, Maharashtra",
            LocationKind::Cave,
        ),
        location(
            "Ajanta Caves",
            "Buddhist cave monuments famous for their ancient murals and sculpture.",
            20.5519,
            75.7033,
            "Ajanta, Aurangabad, Maharashtra",
            LocationKind::Cave,
        ),
        location(
            "Grishneshwar Temple",
            "One of the twelve Jyotirlinga shrines, a short walk from the Ellora caves.",
            20.0245,
            75.1693,
            "Verul, Aurangabad, Maharashtra",
            LocationKind::Temple,
        ),
        location(
            "Daulatabad Fort",
            "Hilltop fortress with a famously convoluted defensive approach.",
            19.9430,
            75.2179,
            "Daulatabad, Aurangabad, Maharashtra",
            LocationKind::Fort,
        ),
        location(
            "Bibi Ka Maqbara",
            "Seventeenth-century mausoleum often called the Taj of the Deccan.",
            19.9018,
            75.3188,
            "Begumpura, Aurangabad, Maharashtra",
            LocationKind::Heritage,
        ),
        location(
            "Aurangabad",
            "The region's hub city and the usual starting point for cave circuits.",
            19.8762,
            75.3433,
            "Aurangabad, Maharashtra",
            LocationKind::City,
        ),
    ]
}

pub fn demo_tours() -> Vec<Tour> {
    let now = Utc::now();
    let tour = |name: &str, description: &str, location: &str, duration: &str, price: i64| Tour {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        duration: duration.to_string(),
        price: Decimal::from(price),
        status: TourStatus::Active,
        image: format!(
            "https://cdn.tourdesk.example/tours/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        ),
        category: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        tour(
            "Ellora day trip",
            "Guided visit across the main Buddhist, Hindu and Jain cave groups.",
            "Aurangabad → Ellora Caves",
            "1 day",
            95,
        ),
        tour(
            "Ajanta murals tour",
            "Early start to catch the painted caves in morning light.",
            "Aurangabad → Ajanta Caves",
            "1 day",
            110,
        ),
        tour(
            "Deccan heritage circuit",
            "Two days across Daulatabad, Bibi Ka Maqbara and the old city.",
            "Aurangabad",
            "2 days",
            180,
        ),
        tour(
            "Mumbai coastal escape",
            "Weekend package along the Konkan coast.",
            "Mumbai",
            "3 days",
            260,
        ),
    ]
}
