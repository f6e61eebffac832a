//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging, console output, and progress tracking.

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{
    log_scan_complete, log_scan_start, log_skipped_record, log_territory_counts, log_warning,
};
pub use progress::{create_scan_spinner, finish_progress_bar};
