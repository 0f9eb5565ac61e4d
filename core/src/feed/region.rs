use serde::{Deserialize, Serialize};

/// Geographic query tile in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

/// Florida to Trinidad, split into four tiles to stay under the feed's
/// per-request result cap.
pub const CARIBBEAN_REGIONS: [BoundingBox; 4] = [
    BoundingBox::new(30.0, 15.0, -85.0, -70.0),
    BoundingBox::new(30.0, 15.0, -70.0, -55.0),
    BoundingBox::new(15.0, 0.0, -85.0, -70.0),
    BoundingBox::new(15.0, 0.0, -70.0, -55.0),
];

impl BoundingBox {
    pub const fn new(north: f64, south: f64, west: f64, east: f64) -> Self {
        Self {
            north,
            south,
            west,
            east,
        }
    }

    /// Renders the feed's `bounds` parameter: `north,south,west,east`.
    pub fn to_query(&self) -> String {
        format!("{},{},{},{}", self.north, self.south, self.west, self.east)
    }
}
