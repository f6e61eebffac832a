//! Utility functions for error handling
//!
//! Helpers that attach path and purpose context to file system failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{MortReaderError, Result};

/// Safely open a file with rich error information
///
/// The existence and file-type checks run before the open, so a missing
/// input surfaces before any scanning begins.
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(MortReaderError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found (needed for: {purpose})"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(MortReaderError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file (expected a file for: {purpose})"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "permission denied - check file permissions".to_string()
            }
            _ => format!("failed to open file for: {purpose}"),
        };
        MortReaderError::io(path, io::Error::new(e.kind(), format!("{context}: {e}")))
    })
}

/// Check that an output directory exists, creating it when missing
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(MortReaderError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a directory (expected a directory for: {purpose})"),
            ),
        ));
    }

    fs::create_dir_all(path).map_err(|e| MortReaderError::io(path, e))
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "file contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("failed to read file content for: {purpose}"),
            };
            Err(MortReaderError::io(
                path,
                io::Error::new(e.kind(), format!("{context}: {e}")),
            ))
        }
    }
}
