//! CSV export of review tables
//!
//! A [`ReviewTable`](crate::table::ReviewTable) is rendered to CSV in memory
//! and then written to disk in one go, creating the output directory first
//! when it does not exist.

pub mod csv;

pub use self::csv::{CsvWriter, render_csv};
