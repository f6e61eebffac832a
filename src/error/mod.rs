//! Error handling for the mortality reader.

pub mod util;

use std::path::PathBuf;
use std::{fmt, io};

/// Specialized error type for mortality file processing
#[derive(Debug, thiserror::Error)]
pub enum MortReaderError {
    /// Error opening or accessing a file
    #[error("IO error for {}: {source}", path.display())]
    Io {
        /// The file being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Error while streaming records from an already opened reader
    #[error("Read error: {0}")]
    Read(#[from] io::Error),

    /// A line that could not be decoded; scans skip these
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    /// Error writing CSV output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error parsing a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// A code rule that could not be parsed from its textual form
    #[error("Invalid ICD-10 code rule: {0}")]
    InvalidCodeRule(String),

    /// Failure moving a finished temporary output file into place
    #[error("Failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl MortReaderError {
    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Why a fixed-width line could not be decoded into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// The line ends before the last required fixed field
    TooShort {
        /// Bytes required by the layout
        required: usize,
        /// Bytes actually present
        actual: usize,
    },
    /// The record-axis condition count is not a number
    InvalidAxisCount(String),
    /// The line ends inside one of its declared condition sub-fields
    TruncatedConditions {
        /// Number of conditions the record declares
        declared: usize,
        /// Bytes actually present
        actual: usize,
    },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { required, actual } => {
                write!(f, "line is {actual} bytes, layout requires {required}")
            }
            Self::InvalidAxisCount(raw) => write!(f, "invalid record-axis count {raw:?}"),
            Self::TruncatedConditions { declared, actual } => write!(
                f,
                "line is {actual} bytes, too short for {declared} declared conditions"
            ),
        }
    }
}

/// A single record that could not be decoded. Never fatal to a scan.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed record at line {line_number}: {reason}")]
pub struct MalformedRecordError {
    /// 1-based line number within the input (0 when decoded outside a scan)
    pub line_number: u64,
    /// Cause of the failure
    pub reason: MalformedReason,
}

impl MalformedRecordError {
    #[must_use]
    pub const fn new(reason: MalformedReason) -> Self {
        Self {
            line_number: 0,
            reason,
        }
    }

    /// Attach the line number the record was read from
    #[must_use]
    pub const fn at_line(mut self, line_number: u64) -> Self {
        self.line_number = line_number;
        self
    }
}

/// Result type for mortality reader operations
pub type Result<T> = std::result::Result<T, MortReaderError>;
