pub mod fr24;
pub mod snapshot;

pub use fr24::Fr24Client;
pub use snapshot::SnapshotSource;
