//! Data models for mortality records
//!
//! This module contains the record-level types produced by the field decoder
//! and consumed by the classifier and aggregator.

pub mod icd10;
pub mod record;

pub use icd10::Icd10Code;
pub use record::{
    ContributingCauses, MannerOfDeath, MortalityRecord, ResidentStatus, Territory,
    MAX_CONTRIBUTING_CAUSES,
};
