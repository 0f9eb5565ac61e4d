pub mod directory;
pub mod record;
pub mod region;

pub use directory::{AircraftDetails, SearchCandidate};
pub use record::FlightRecord;
pub use region::{BoundingBox, CARIBBEAN_REGIONS};
