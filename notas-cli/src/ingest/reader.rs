//! Tabular source readers
//!
//! A reader turns a file into raw rows; header handling happens afterwards in
//! [`super::header`]. Workbooks go through calamine (first worksheet only),
//! `.csv` files through the csv crate.

use std::fs::File;
use std::path::{Path, PathBuf};

use calamine::{Reader, open_workbook_auto};

use super::source::RawTable;
use super::value::CellValue;

/// A source file that could not be read as tabular data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReadError {
    pub path: PathBuf,
    pub reason: String,
}

impl SourceReadError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SourceReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot read '{}': {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for SourceReadError {}

/// Reads a file into ordered raw rows
pub trait TabularReader {
    fn read_table(&self, path: &Path) -> Result<RawTable, SourceReadError>;
}

/// Reader for spreadsheet workbooks (xlsx, xlsm, xls, ods)
#[derive(Debug, Default, Clone, Copy)]
pub struct WorkbookReader;

impl TabularReader for WorkbookReader {
    fn read_table(&self, path: &Path) -> Result<RawTable, SourceReadError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| SourceReadError::new(path, format!("failed to open workbook: {}", e)))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SourceReadError::new(path, "workbook has no sheets"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SourceReadError::new(path, format!("failed to read sheet '{}': {}", sheet_name, e)))?;

        // calamine ranges start at the first used cell; keep leading blank
        // columns so positions line up with the sheet's own column letters
        let leading_cols = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let rows = range
            .rows()
            .map(|row| {
                let mut cells = vec![CellValue::Empty; leading_cols];
                cells.extend(row.iter().map(CellValue::from));
                cells
            })
            .collect();

        log::debug!("Read sheet '{}' from {}", sheet_name, path.display());
        Ok(RawTable::new(rows))
    }
}

/// Reader for comma separated files. Every field is kept as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReader;

impl TabularReader for CsvReader {
    fn read_table(&self, path: &Path) -> Result<RawTable, SourceReadError> {
        let file = File::open(path)
            .map_err(|e| SourceReadError::new(path, format!("failed to open file: {}", e)))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                SourceReadError::new(path, format!("invalid CSV at record {}: {}", line + 1, e))
            })?;
            rows.push(record.iter().map(CellValue::from_text).collect());
        }

        Ok(RawTable::new(rows))
    }
}

/// Pick a reader from the file extension
pub fn reader_for(path: &Path) -> Box<dyn TabularReader> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        Box::new(CsvReader)
    } else {
        Box::new(WorkbookReader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Write;

    #[test]
    fn test_workbook_reader_reads_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grupo.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Cédula").unwrap();
        sheet.write_string(0, 1, "Nombre").unwrap();
        sheet.write_number(1, 0, 101110111.0).unwrap();
        sheet.write_string(1, 1, "Ana Mora").unwrap();
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let table = WorkbookReader.read_table(&path).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows[0][0], CellValue::Text("Cédula".to_string()));
        assert_eq!(table.rows[1][0].to_text(), "101110111");
    }

    #[test]
    fn test_workbook_reader_keeps_leading_blank_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 2, "Cédula").unwrap();
        sheet.write_string(1, 2, "5").unwrap();
        workbook.save(&path).unwrap();

        let table = WorkbookReader.read_table(&path).unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows[0][0], CellValue::Empty);
        assert_eq!(table.rows[0][2], CellValue::Text("Cédula".to_string()));
    }

    #[test]
    fn test_workbook_reader_rejects_non_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"this is not a zip archive").unwrap();

        let err = WorkbookReader.read_table(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().contains("broken.xlsx"));
    }

    #[test]
    fn test_csv_reader_pads_short_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grupo.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "Cédula,Nombre,Módulos").unwrap();
        writeln!(file, "1-234-567,Luis").unwrap();
        drop(file);

        let table = CsvReader.read_table(&path).unwrap();
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows[1][0], CellValue::Text("1-234-567".to_string()));
        assert_eq!(table.rows[1][2], CellValue::Empty);
    }

    #[test]
    fn test_reader_for_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UPPER.CSV");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();
        let table = reader_for(&path).read_table(&path).unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
