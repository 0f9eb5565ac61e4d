use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::classify::Provenance;

pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Default)]
struct Metrics {
    processed: usize,
    kept: usize,
    dropped: usize,
    lookup_failures: usize,
    resolutions: HashMap<Provenance, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub processed: usize,
    pub kept: usize,
    pub dropped: usize,
    pub lookup_failures: usize,
    pub direct: usize,
    pub by_registration: usize,
    pub by_identity: usize,
    pub not_found: usize,
    pub skipped: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_verdict(&self, is_military: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.processed += 1;
            if is_military {
                metrics.kept += 1;
            } else {
                metrics.dropped += 1;
            }
        }
    }

    pub fn record_lookup_failures(&self, count: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.lookup_failures += count;
        }
    }

    pub fn record_resolution(&self, provenance: Provenance) {
        if let Ok(mut metrics) = self.inner.lock() {
            *metrics.resolutions.entry(provenance).or_insert(0) += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            let count = |p: Provenance| metrics.resolutions.get(&p).copied().unwrap_or(0);
            MetricsSnapshot {
                processed: metrics.processed,
                kept: metrics.kept,
                dropped: metrics.dropped,
                lookup_failures: metrics.lookup_failures,
                direct: count(Provenance::Direct),
                by_registration: count(Provenance::SearchByRegistration),
                by_identity: count(Provenance::SearchByIdentity),
                not_found: count(Provenance::NotFound),
                skipped: count(Provenance::Skipped),
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_counts_verdicts_and_sources() {
        let recorder = MetricsRecorder::new();
        recorder.record_verdict(true);
        recorder.record_verdict(false);
        recorder.record_verdict(false);
        recorder.record_resolution(Provenance::Skipped);
        recorder.record_resolution(Provenance::Direct);
        recorder.record_resolution(Provenance::Direct);
        recorder.record_lookup_failures(3);

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.processed, 3);
        assert_eq!(snapshot.kept, 1);
        assert_eq!(snapshot.dropped, 2);
        assert_eq!(snapshot.direct, 2);
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.lookup_failures, 3);
    }
}
