//! Student evaluation records: spreadsheet ingestion, identity lookup and
//! report generation.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod error;
pub mod ingest;
pub mod lookup;
pub mod pipeline;
pub mod report;
