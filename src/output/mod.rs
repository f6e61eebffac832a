//! Report output

pub mod csv_writer;

pub use csv_writer::{
    CODE_COLUMNS, CountCell, NOT_AVAILABLE, SUMMARY_COLUMNS, write_atomically, write_code_detail,
    write_code_detail_csv, write_summary, write_summary_csv,
};
