//! Classification and aggregation of mortality records
//!
//! `classification` decides which categories a record falls in; `aggregate`
//! counts classified records per territory.

pub mod aggregate;
pub mod classification;
