//! Utility functions for logging, console output and progress tracking

pub mod logging;
