//! Geographic and time narrowing of the candidate pool.
//!
//! Pure functions over in-memory lists; the caller decides which stages run.

use super::models::CandidateLocation;

/// Inclusive `[north, east, south, west]` box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl BoundingBox {
    pub const fn new(north: f64, east: f64, south: f64, west: f64) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    pub fn contains(&self, location: &CandidateLocation) -> bool {
        let c = location.coordinates;
        self.north >= c.lat && self.east >= c.lng && self.south <= c.lat && self.west <= c.lng
    }
}

// Earthquake-affected cities served by the review UI, keyed by the UI's city id.
const CITY_BOXES: [(i64, BoundingBox); 10] = [
    (1, BoundingBox::new(36.852702785393014, 36.87286376953126, 36.535570922786015, 35.88409423828126)),
    (2, BoundingBox::new(36.2104851748389, 36.81861877441407, 35.84286468375614, 35.82984924316407)),
    (3, BoundingBox::new(36.495937096205274, 36.649870522206335, 36.064120488812605, 35.4740187605459)),
    (4, BoundingBox::new(36.50903585150776, 36.402143998719424, 36.47976138594277, 36.31474829364722)),
    (5, BoundingBox::new(36.64234742932176, 36.3232450328562, 36.53629731173617, 36.029282092441115)),
    (6, BoundingBox::new(36.116001873480265, 36.06470054394251, 36.0627178139989, 35.91771907373497)),
    (7, BoundingBox::new(38.53348725642158, 38.78062516773912, 37.32756763881127, 35.45481415037825)),
    (8, BoundingBox::new(37.35461473302187, 38.0755896764663, 36.85431769725969, 36.67725839531126)),
    (9, BoundingBox::new(39.065058845523424, 40.013647871307754, 37.86798402826048, 36.687836853946884)),
    (10, BoundingBox::new(38.160827052916495, 39.33362355320935, 37.44250898099215, 37.35608449070936)),
];

/// Bounding box for a city id, `None` for unknown ids
pub fn city_box(city_id: i64) -> Option<BoundingBox> {
    CITY_BOXES
        .iter()
        .find(|(id, _)| *id == city_id)
        .map(|(_, bbox)| *bbox)
}

/// Keep the locations inside `bbox`. A missing box matches nothing.
pub fn filter_by_bounding_box(
    locations: Vec<CandidateLocation>,
    bbox: Option<&BoundingBox>,
) -> Vec<CandidateLocation> {
    match bbox {
        Some(bbox) => locations.into_iter().filter(|l| bbox.contains(l)).collect(),
        None => Vec::new(),
    }
}

/// Keep the locations reported at or after `min_epoch`
pub fn filter_by_min_epoch(
    locations: Vec<CandidateLocation>,
    min_epoch: i64,
) -> Vec<CandidateLocation> {
    locations
        .into_iter()
        .filter(|l| l.epoch >= min_epoch)
        .collect()
}
