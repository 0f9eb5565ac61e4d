//! Classification core for the Rust military air-traffic watch.
//!
//! Raw position records flow through deduplication, airframe signal
//! detection, a tiered operator lookup and a precedence-ordered decision
//! engine. External services sit behind the traits in [`prelude`].

pub mod classify;
pub mod feed;
pub mod pipeline;
pub mod prelude;
pub mod rules;
pub mod telemetry;

pub use pipeline::{Assessment, ScanPipeline, ScanReport};
pub use prelude::{AircraftDirectory, LookupError, LookupResult, PositionSource};
pub use rules::{RuleBook, RuleSet};
