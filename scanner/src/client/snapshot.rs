//! Offline replay of a recorded scan.
//!
//! A snapshot file holds the region batches the feed returned plus the
//! directory answers, so a full scan can run without network access.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use milwatchcore::feed::{AircraftDetails, BoundingBox, FlightRecord, SearchCandidate};
use milwatchcore::{AircraftDirectory, LookupError, LookupResult, PositionSource};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRegion {
    pub bounds: BoundingBox,
    #[serde(default)]
    pub records: Vec<FlightRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSource {
    pub regions: Vec<SnapshotRegion>,
    /// Identity lookups keyed by upper-case ICAO24 code.
    pub aircraft: HashMap<String, AircraftDetails>,
    /// Search answers keyed by upper-case query text.
    pub searches: HashMap<String, Vec<SearchCandidate>>,
}

impl SnapshotSource {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading snapshot {}", path_ref.display()))?;
        Self::from_json(&contents).with_context(|| format!("parsing snapshot {}", path_ref.display()))
    }

    pub fn from_json(contents: &str) -> anyhow::Result<Self> {
        let mut snapshot: SnapshotSource = serde_json::from_str(contents)?;
        snapshot.aircraft = upper_keys(snapshot.aircraft);
        snapshot.searches = upper_keys(snapshot.searches);
        Ok(snapshot)
    }

    pub fn bounds(&self) -> Vec<BoundingBox> {
        self.regions.iter().map(|region| region.bounds).collect()
    }
}

fn upper_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter()
        .map(|(key, value)| (key.trim().to_uppercase(), value))
        .collect()
}

impl PositionSource for SnapshotSource {
    async fn positions(&self, bounds: &BoundingBox) -> LookupResult<Vec<FlightRecord>> {
        self.regions
            .iter()
            .find(|region| region.bounds == *bounds)
            .map(|region| region.records.clone())
            .ok_or_else(|| LookupError::NotFound(bounds.to_query()))
    }
}

impl AircraftDirectory for SnapshotSource {
    async fn lookup(&self, identity: &str) -> LookupResult<AircraftDetails> {
        self.aircraft
            .get(&identity.trim().to_uppercase())
            .cloned()
            .ok_or_else(|| LookupError::NotFound(identity.to_string()))
    }

    async fn search(&self, query: &str) -> LookupResult<Vec<SearchCandidate>> {
        Ok(self
            .searches
            .get(&query.trim().to_uppercase())
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT: &str = r#"{
        "regions": [
            {"bounds": {"north": 15.0, "south": 0.0, "west": -70.0, "east": -55.0},
             "records": [{"hex": "a1b2c3", "reg": "N123AB"}]}
        ],
        "aircraft": {"a1b2c3": {"operator": "Acme Aviation"}},
        "searches": {"n123ab": [{"registration": "N123AB", "owner": "Acme Leasing"}]}
    }"#;

    #[tokio::test]
    async fn snapshot_answers_are_case_insensitive() {
        let snapshot = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let details = snapshot.lookup("A1B2C3").await.unwrap();
        assert_eq!(details.operator_name(), Some("Acme Aviation"));

        let hits = snapshot.search("N123AB").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(snapshot.search("N999ZZ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_region_is_an_error() {
        let snapshot = SnapshotSource::from_json(SNAPSHOT).unwrap();
        let known = snapshot.bounds()[0];
        assert_eq!(snapshot.positions(&known).await.unwrap().len(), 1);

        let unknown = BoundingBox::new(1.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            snapshot.positions(&unknown).await,
            Err(LookupError::NotFound(_))
        ));
    }

    #[test]
    fn snapshot_loads_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(SNAPSHOT.as_bytes()).unwrap();
        let path = temp.into_temp_path();
        let snapshot = SnapshotSource::load(&path).unwrap();
        assert_eq!(snapshot.regions.len(), 1);
        assert!(snapshot.aircraft.contains_key("A1B2C3"));
    }
}
