//! One-pass batch classification: dedup, detect, resolve, decide.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::classify::{
    decide, deduplicate, detect_signals, OperatorLookup, OperatorResolver, Provenance, Verdict,
};
use crate::feed::{BoundingBox, FlightRecord};
use crate::prelude::{AircraftDirectory, PositionSource};
use crate::rules::RuleBook;
use crate::telemetry::{LogManager, MetricsRecorder, MetricsSnapshot};

/// Classified record as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub record: FlightRecord,
    pub operator: Option<String>,
    pub provenance: Provenance,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    pub total_records: usize,
    pub failed_regions: usize,
    pub kept: Vec<Assessment>,
    pub dropped: Vec<Assessment>,
}

pub struct ScanPipeline<D> {
    rules: Arc<RuleBook>,
    resolver: OperatorResolver<D>,
    concurrency: usize,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl<D: AircraftDirectory + 'static> ScanPipeline<D> {
    pub fn new(rules: Arc<RuleBook>, directory: Arc<D>) -> Self {
        Self {
            rules,
            resolver: OperatorResolver::new(directory),
            concurrency: 1,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("pipeline"),
        }
    }

    /// Number of records resolved at once; 1 keeps the pass sequential.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Queries every region once, in order. Failed regions are skipped and
    /// counted.
    pub async fn fetch_regions<S: PositionSource>(
        &self,
        source: &S,
        regions: &[BoundingBox],
    ) -> (Vec<Vec<FlightRecord>>, usize) {
        let mut batches = Vec::with_capacity(regions.len());
        let mut failed = 0;

        for region in regions {
            match source.positions(region).await {
                Ok(batch) => {
                    self.logger.detail(&format!(
                        "region {} returned {} records",
                        region.to_query(),
                        batch.len()
                    ));
                    batches.push(batch);
                }
                Err(err) => {
                    failed += 1;
                    self.logger
                        .warn(&format!("region {} skipped: {}", region.to_query(), err));
                }
            }
        }

        (batches, failed)
    }

    pub async fn scan<S: PositionSource>(&self, source: &S, regions: &[BoundingBox]) -> ScanReport {
        let (batches, failed_regions) = self.fetch_regions(source, regions).await;
        let mut report = self.classify(batches).await;
        report.failed_regions = failed_regions;
        report
    }

    /// Deduplicates the batches and classifies every surviving record.
    pub async fn classify(&self, batches: Vec<Vec<FlightRecord>>) -> ScanReport {
        let records = deduplicate(batches);
        let total_records = records.len();
        self.logger
            .record(&format!("classifying {} unique records", total_records));

        let assessed = if self.concurrency > 1 {
            self.assess_concurrently(records).await
        } else {
            let mut assessed = Vec::with_capacity(records.len());
            for record in records {
                assessed.push(assess_record(&self.rules, &self.resolver, record).await);
            }
            assessed
        };

        let mut report = ScanReport {
            total_records,
            ..Default::default()
        };
        for (assessment, lookup_failures) in assessed {
            self.metrics.record_verdict(assessment.verdict.is_military);
            self.metrics.record_resolution(assessment.provenance);
            self.metrics.record_lookup_failures(lookup_failures);
            self.logger.detail(&format!(
                "{} -> {}",
                assessment.record.key().unwrap_or("?"),
                assessment.verdict.reason
            ));

            if assessment.verdict.is_military {
                report.kept.push(assessment);
            } else {
                report.dropped.push(assessment);
            }
        }

        self.logger.record(&format!(
            "kept {} / dropped {}",
            report.kept.len(),
            report.dropped.len()
        ));
        report
    }

    pub async fn assess(&self, record: FlightRecord) -> Assessment {
        assess_record(&self.rules, &self.resolver, record).await.0
    }

    async fn assess_concurrently(&self, records: Vec<FlightRecord>) -> Vec<(Assessment, usize)> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut tasks = JoinSet::new();
        let count = records.len();

        for (index, record) in records.into_iter().enumerate() {
            let rules = Arc::clone(&self.rules);
            let resolver = self.resolver.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, assess_record(&rules, &resolver, record).await)
            });
        }

        let mut slots: Vec<Option<(Assessment, usize)>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, assessed)) => slots[index] = Some(assessed),
                Err(err) => self
                    .logger
                    .warn(&format!("classification task aborted: {}", err)),
            }
        }

        slots.into_iter().flatten().collect()
    }
}

async fn assess_record<D: AircraftDirectory>(
    rules: &RuleBook,
    resolver: &OperatorResolver<D>,
    record: FlightRecord,
) -> (Assessment, usize) {
    let signals = detect_signals(&record, rules);

    let lookup = if signals.is_strong() {
        OperatorLookup::skipped()
    } else {
        resolver
            .resolve(record.identity_or_empty(), record.registration())
            .await
    };

    let verdict = decide(&record, &signals, lookup.name.as_deref(), rules);
    let failures = lookup.failures();

    (
        Assessment {
            record,
            operator: lookup.name,
            provenance: lookup.provenance,
            verdict,
        },
        failures,
    )
}
