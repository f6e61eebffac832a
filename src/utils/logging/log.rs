//! Logging utilities
//!
//! Standardized log lines for scan events, so every input file reports the
//! same way.

use std::path::Path;
use std::time::Duration;

use crate::algorithm::aggregate::{MortalityReport, ScanSummary};
use crate::error::MalformedRecordError;

/// Log the start of a file scan
///
/// # Arguments
/// * `path` - Input file about to be scanned
pub fn log_scan_start(path: &Path) {
    log::info!("Scanning mortality file {}", path.display());
}

/// Log the outcome breakdown of a finished file scan
///
/// # Arguments
/// * `path` - Input file that was scanned
/// * `summary` - Counts for this file alone
/// * `elapsed` - Optional elapsed time
pub fn log_scan_complete(path: &Path, summary: &ScanSummary, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Scanned {} records from {} in {duration:?}",
            summary.records_scanned,
            path.display()
        ),
        None => log::info!(
            "Scanned {} records from {}",
            summary.records_scanned,
            path.display()
        ),
    }
    log::info!(
        "{} aggregated, {} skipped, {} foreign residents excluded, {} outside territories",
        summary.records_aggregated,
        summary.records_skipped,
        summary.records_excluded,
        summary.records_outside_territories
    );
    if summary.records_aggregated == 0 {
        log_warning("No records aggregated from", Some(path));
    }
}

/// Log a skipped record, at warn level for the first `limit` skips
pub fn log_skipped_record(err: &MalformedRecordError, skipped: u64, limit: u64) {
    if skipped <= limit {
        log::warn!("Skipping {err}");
    } else {
        log::debug!("Skipping {err}");
    }
}

/// Log a one-line count summary for every configured territory
pub fn log_territory_counts(report: &MortalityReport) {
    for (territory, counts) in report.territories.rows() {
        match counts {
            Some(c) => log::info!(
                "{territory}: total={} drug_related={} overdose={} suicide={}",
                c.total_deaths,
                c.drug_related_deaths,
                c.overdose_deaths,
                c.suicide_deaths
            ),
            None => log::info!("{territory}: no records"),
        }
    }
}

/// Log a warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
