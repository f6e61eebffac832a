//! Streaming reader for fixed-width mortality files
//!
//! Lines are read as raw bytes and decoded through the configured
//! `RecordLayout`. A scan is a single sequential pass; its results are merged
//! into the caller's report only after the whole input has been read, so a
//! failed scan leaves the report untouched.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, warn};

use crate::algorithm::aggregate::{MortalityReport, ScanSummary};
use crate::config::MortalityConfig;
use crate::error::util::safe_open_file;
use crate::error::{MortReaderError, Result};
use crate::models::record::MortalityRecord;
use crate::schema::layout::RecordLayout;
use crate::utils::logging::progress::PROGRESS_UPDATE_INTERVAL;
use crate::utils::logging::{
    create_scan_spinner, finish_progress_bar, log_scan_complete, log_scan_start,
    log_skipped_record, log_territory_counts,
};

/// Read buffer size for input files
pub const READ_BUFFER_SIZE: usize = 1 << 16;

/// Iterator over the records of a fixed-width input
///
/// Yields `Err(MortReaderError::Malformed)` for lines that fail to decode;
/// iteration can continue past them. Any other error is an I/O failure.
pub struct MortalityReader<R> {
    inner: R,
    layout: RecordLayout,
    line_number: u64,
    buf: Vec<u8>,
}

impl<R: BufRead> MortalityReader<R> {
    pub fn new(inner: R, layout: RecordLayout) -> Self {
        Self {
            inner,
            layout,
            line_number: 0,
            buf: Vec::with_capacity(512),
        }
    }

    /// Number of lines read so far
    #[must_use]
    pub const fn line_number(&self) -> u64 {
        self.line_number
    }
}

impl<R: BufRead> Iterator for MortalityReader<R> {
    type Item = Result<MortalityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.inner.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let line_number = self.line_number;
                let line = strip_line_ending(&self.buf);
                Some(
                    self.layout
                        .parse_record(line)
                        .map_err(|e| MortReaderError::from(e.at_line(line_number))),
                )
            }
            Err(e) => Some(Err(MortReaderError::Read(e))),
        }
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scan one input into `report`
///
/// Returns the summary for this input alone. Malformed lines are counted
/// and skipped; an I/O error aborts the scan without modifying `report`.
pub fn scan_reader<R: BufRead>(
    input: R,
    config: &MortalityConfig,
    report: &mut MortalityReport,
) -> Result<ScanSummary> {
    let mut local = MortalityReport::new(config);
    let mut reader = MortalityReader::new(input, config.layout.clone());
    let pb = create_scan_spinner(config.show_progress, Some("scanning mortality records"));

    for item in reader.by_ref() {
        match item {
            Ok(record) => {
                local.ingest(&record, config);
            }
            Err(MortReaderError::Malformed(err)) => {
                local.summary.record_skipped();
                log_skipped_record(
                    &err,
                    local.summary.records_skipped,
                    config.max_logged_malformed,
                );
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }

        if local.summary.records_scanned % PROGRESS_UPDATE_INTERVAL == 0 {
            pb.set_position(local.summary.records_scanned);
        }
    }

    pb.set_position(local.summary.records_scanned);
    finish_progress_bar(&pb, Some("scan complete"));

    if local.summary.records_skipped > config.max_logged_malformed {
        warn!(
            "{} malformed records skipped in total ({} logged)",
            local.summary.records_skipped, config.max_logged_malformed
        );
    }
    debug!("Read {} lines", reader.line_number());

    report.merge(&local);
    Ok(local.summary)
}

/// Scan a single file into a new report
pub fn process_file(path: &Path, config: &MortalityConfig) -> Result<MortalityReport> {
    process_files(&[path], config)
}

/// Scan several files into one report, in order
///
/// The configuration is validated and every file is checked for existence
/// before the first record is read.
pub fn process_files<P: AsRef<Path>>(
    paths: &[P],
    config: &MortalityConfig,
) -> Result<MortalityReport> {
    config.validate()?;

    let files = paths
        .iter()
        .map(|path| safe_open_file(path.as_ref(), "mortality scan").map(|f| (path.as_ref(), f)))
        .collect::<Result<Vec<_>>>()?;

    let mut report = MortalityReport::new(config);
    for (path, file) in files {
        log_scan_start(path);
        let start = Instant::now();

        let summary = scan_reader(
            BufReader::with_capacity(READ_BUFFER_SIZE, file),
            config,
            &mut report,
        )
        .map_err(|e| match e {
            MortReaderError::Read(source) => MortReaderError::io(path, source),
            other => other,
        })?;

        log_scan_complete(path, &summary, Some(start.elapsed()));
    }

    log_territory_counts(&report);
    Ok(report)
}
