//! Schema reconciliation and record merging across sources

pub mod merge;
pub mod reconcile;

pub use merge::{MergedDataset, Provenance, Record, RecordRef, merge};
pub use reconcile::{SchemaMismatchError, SourceShape, reconcile};
