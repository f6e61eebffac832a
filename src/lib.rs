//! A Rust library for classifying and aggregating CDC fixed-width mortality
//! files into per-territory death statistics.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod reader;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{MissingTerritoryPolicy, MortalityConfig, ResidentStatusScope, TerritoryBasis};
pub use error::{MalformedReason, MalformedRecordError, MortReaderError, Result};
pub use models::{Icd10Code, MannerOfDeath, MortalityRecord, ResidentStatus, Territory};
pub use schema::{FieldSpec, RecordLayout};

// Classification
pub use algorithm::classification::{
    Classification, ClassificationRules, CodeRule, CodeSet, DeathCategory, is_drug_related,
    is_overdose, is_suicide,
};

// Aggregation
pub use algorithm::aggregate::{MortalityReport, ScanSummary};
pub use algorithm::aggregate::{TerritoryAccumulator, TerritoryCounts};

// Reading and output
pub use output::{write_code_detail_csv, write_summary_csv};
pub use reader::{MortalityReader, process_file, process_files, scan_reader};
