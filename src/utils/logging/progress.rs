//! Progress reporting for record scans
//!
//! The record count of a fixed-width file is unknown until the end, so scans
//! report through a spinner rather than a bar.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner template showing elapsed time, records read and rate
pub const SCAN_SPINNER_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] {pos} records ({per_sec}) {msg}";

/// Records between spinner position updates
pub const PROGRESS_UPDATE_INTERVAL: u64 = 10_000;

/// Create a spinner for a record scan, or a hidden bar when disabled
///
/// # Arguments
/// * `enabled` - Whether progress should be drawn at all
/// * `message` - Optional message to display with the spinner
#[must_use]
pub fn create_scan_spinner(enabled: bool, message: Option<&str>) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template(SCAN_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }

    // Set reasonable tick rate
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
