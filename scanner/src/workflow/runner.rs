use std::sync::Arc;

use anyhow::bail;
use milwatchcore::feed::BoundingBox;
use milwatchcore::telemetry::MetricsSnapshot;
use milwatchcore::{AircraftDirectory, PositionSource, ScanPipeline, ScanReport};

use crate::workflow::config::ScanConfig;

pub struct ScanOutcome {
    pub report: ScanReport,
    pub metrics: MetricsSnapshot,
}

#[derive(Clone)]
pub struct Runner {
    config: ScanConfig,
}

impl Runner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub async fn execute<S, D>(
        &self,
        source: &S,
        directory: Arc<D>,
        regions: &[BoundingBox],
    ) -> anyhow::Result<ScanOutcome>
    where
        S: PositionSource,
        D: AircraftDirectory + 'static,
    {
        if regions.is_empty() {
            bail!("no regions to scan");
        }

        let rules = Arc::new(self.config.rule_book()?);
        let pipeline =
            ScanPipeline::new(rules, directory).with_concurrency(self.config.concurrency);

        let report = pipeline.scan(source, regions).await;
        if report.failed_regions == regions.len() {
            bail!("all {} region queries failed", regions.len());
        }

        Ok(ScanOutcome {
            report,
            metrics: pipeline.metrics(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::snapshot::SnapshotSource;

    const SNAPSHOT: &str = r#"{
        "regions": [
            {
                "bounds": {"north": 30.0, "south": 15.0, "west": -85.0, "east": -70.0},
                "records": [
                    {"hex": "AE01C2", "callsign": "RCH123", "type": "C17"},
                    {"hex": "A1B2C3", "callsign": "RCH456", "type": "C680"}
                ]
            }
        ],
        "aircraft": {"A1B2C3": {"operator": null}}
    }"#;

    #[tokio::test]
    async fn runner_executes_snapshot_scan() {
        let snapshot = Arc::new(SnapshotSource::from_json(SNAPSHOT).unwrap());
        let runner = Runner::new(ScanConfig::default());
        let regions = snapshot.bounds();

        let outcome = runner
            .execute(snapshot.as_ref(), Arc::clone(&snapshot), &regions)
            .await
            .unwrap();
        assert_eq!(outcome.report.kept.len(), 1);
        assert_eq!(outcome.report.dropped.len(), 1);
        assert!(outcome.report.dropped[0].verdict.reason.contains("bizjet"));
        assert_eq!(outcome.metrics.processed, 2);
    }

    #[tokio::test]
    async fn demo_snapshot_classifies_caribbean_traffic() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../demos/caribbean_snapshot.json");
        let snapshot = Arc::new(SnapshotSource::load(path).unwrap());
        let regions = snapshot.bounds();
        let runner = Runner::new(ScanConfig::from_args(None, 2));

        let outcome = runner
            .execute(snapshot.as_ref(), Arc::clone(&snapshot), &regions)
            .await
            .unwrap();
        let report = outcome.report;
        assert_eq!(report.total_records, 4);
        assert_eq!(report.kept.len(), 1);
        assert_eq!(report.kept[0].record.callsign.as_deref(), Some("RCH124"));

        let reasons: Vec<&str> = report
            .dropped
            .iter()
            .map(|a| a.verdict.reason.as_str())
            .collect();
        assert_eq!(
            reasons,
            vec![
                "operator civilian: Acme Aviation Charter",
                "callsign RCH456 but bizjet type C680",
                "no strong signals and no military operator",
            ]
        );
        assert_eq!(outcome.metrics.by_registration, 1);
        assert_eq!(outcome.metrics.lookup_failures, 1);
    }

    #[tokio::test]
    async fn runner_rejects_empty_region_list() {
        let snapshot = Arc::new(SnapshotSource::default());
        let runner = Runner::new(ScanConfig::default());
        assert!(runner
            .execute(snapshot.as_ref(), Arc::clone(&snapshot), &[])
            .await
            .is_err());
    }

    #[tokio::test]
    async fn runner_fails_when_every_region_fails() {
        let snapshot = Arc::new(SnapshotSource::default());
        let runner = Runner::new(ScanConfig::default());
        let regions = ScanConfig::default().regions;
        let err = runner
            .execute(snapshot.as_ref(), Arc::clone(&snapshot), &regions)
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("region queries failed"));
    }
}
