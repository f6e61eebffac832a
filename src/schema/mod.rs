//! Record layout definitions for fixed-width mortality files.

pub mod layout;

pub use layout::{
    ContributingLayout, DecodedFields, FieldSpec, RecordLayout, decode_fields, latin1_trimmed,
};
