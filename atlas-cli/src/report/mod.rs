//! # Reports
//!
//! Output sinks for the audit results: CSV files and console listings.

pub mod console;
pub mod csv;
