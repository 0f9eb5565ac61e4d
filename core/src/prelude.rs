use std::future::Future;

use crate::feed::{AircraftDetails, BoundingBox, FlightRecord, SearchCandidate};

/// Failure of a single call to an external flight-data service.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("http request failed: {0}")]
    Http(String),
    #[error("service answered with status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("no entry for {0}")]
    NotFound(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Bulk position query over one geographic region.
pub trait PositionSource: Send + Sync {
    fn positions(
        &self,
        bounds: &BoundingBox,
    ) -> impl Future<Output = LookupResult<Vec<FlightRecord>>> + Send;
}

/// Aircraft identity service: direct lookup by ICAO24 code and free-text search.
pub trait AircraftDirectory: Send + Sync {
    fn lookup(&self, identity: &str) -> impl Future<Output = LookupResult<AircraftDetails>> + Send;

    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = LookupResult<Vec<SearchCandidate>>> + Send;
}
