//! Spreadsheet ingestion: discovery, reading and header handling

pub mod discover;
pub mod header;
pub mod reader;
pub mod source;
pub mod value;

pub use discover::{DiscoveryRules, discover_sources};
pub use header::{HEADER_KEYWORDS, detect_header, into_source};
pub use reader::{CsvReader, SourceReadError, TabularReader, WorkbookReader, reader_for};
pub use source::{RawTable, Schema, SourceFile, source_label};
pub use value::CellValue;

use std::path::Path;

/// Read one source file and apply header handling
pub fn load_source(path: &Path, reader: &dyn TabularReader) -> Result<SourceFile, SourceReadError> {
    let table = reader.read_table(path)?;
    into_source(path, table).ok_or_else(|| SourceReadError::new(path, "no tabular data found"))
}
