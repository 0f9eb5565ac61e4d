//! Human-readable and JSON renderings of a scan report.

use std::fmt::Write;

use anyhow::Context;
use milwatchcore::feed::FlightRecord;
use milwatchcore::{Assessment, ScanReport};

const TRACKER_BASE: &str = "https://www.flightradar24.com";

/// Tracker page for the flight, by callsign if known, else by hex code.
pub fn tracker_link(record: &FlightRecord) -> String {
    if let Some(callsign) = present(&record.callsign) {
        format!("{}/{}", TRACKER_BASE, callsign)
    } else if let Some(hex) = present(&record.identity) {
        format!("{}/data/aircraft/{}", TRACKER_BASE, hex)
    } else {
        "N/A".to_string()
    }
}

pub fn render_text(report: &ScanReport, show_dropped: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total flights in area after tiling: {}",
        report.total_records
    );
    if report.failed_regions > 0 {
        let _ = writeln!(out, "Regions skipped after errors: {}", report.failed_regions);
    }

    let _ = writeln!(out, "\nLikely military flights: {}", report.kept.len());
    for entry in &report.kept {
        let record = &entry.record;
        let _ = writeln!(
            out,
            "- {} | HEX {} | type {} | reg {} | op {} | {} | {}",
            field(&record.callsign),
            field(&record.identity),
            field(&record.aircraft_type),
            field(&record.registration),
            operator_label(entry),
            entry.verdict.reason,
            tracker_link(record)
        );
    }

    let _ = writeln!(out, "\nExcluded as civil/unknown: {}", report.dropped.len());
    if show_dropped {
        for entry in &report.dropped {
            let record = &entry.record;
            let _ = writeln!(
                out,
                "  x {} {} | op {} | {}",
                field(&record.callsign),
                field(&record.registration),
                operator_label(entry),
                entry.verdict.reason
            );
        }
    }

    out
}

pub fn render_json(report: &ScanReport) -> anyhow::Result<String> {
    serde_json::to_string_pretty(report).context("serializing scan report")
}

fn operator_label(entry: &Assessment) -> String {
    format!(
        "{} ({})",
        entry.operator.as_deref().unwrap_or("N/A"),
        entry.provenance
    )
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn field(value: &Option<String>) -> &str {
    present(value).unwrap_or("-")
}
