//! Header-row heuristic
//!
//! Some evaluation sheets carry a title row above the real column headers.
//! The row right under the first row is probed for header keywords; when it
//! looks like a header, the first row is skipped and the probed row becomes
//! the header.
//!
//! The match is a plain substring test, so a data row that happens to contain
//! one of the keywords is taken for a header too.

use std::path::Path;

use super::source::{RawTable, Schema, SourceFile};
use super::value::CellValue;

/// Words that only show up in header rows
pub const HEADER_KEYWORDS: [&str; 5] = ["columna", "atinencia", "nombre", "modulos", "módulos"];

/// Whether a row's flattened, lowercased text contains a header keyword
pub fn detect_header(row: &[CellValue]) -> bool {
    let flattened = row
        .iter()
        .map(|cell| cell.to_text().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    HEADER_KEYWORDS
        .iter()
        .any(|keyword| flattened.contains(keyword))
}

/// Apply header handling to raw rows and build a [`SourceFile`].
///
/// Fully blank rows are dropped first. Returns `None` when nothing is left to
/// take a header from.
pub fn into_source(path: &Path, table: RawTable) -> Option<SourceFile> {
    let mut rows: Vec<Vec<CellValue>> = table
        .rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    if rows.is_empty() {
        return None;
    }

    let header_skipped = rows.get(1).is_some_and(|probe| detect_header(probe));
    if header_skipped {
        log::info!(
            "{}: first data row looks like a header, skipping title row",
            path.display()
        );
        rows.remove(0);
    }

    let mut rows = rows.into_iter();
    let header = rows.next()?;
    let schema = Schema::from_header(&header);

    Some(SourceFile {
        path: path.to_path_buf(),
        schema,
        rows: rows.collect(),
        header_skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from_text(c)).collect()
    }

    #[test]
    fn test_detect_header_keywords() {
        assert!(detect_header(&row(&["Cédula", "NOMBRE COMPLETO"])));
        assert!(detect_header(&row(&["", "Módulos aprobados"])));
        assert!(detect_header(&row(&["Atinencia"])));
        assert!(detect_header(&row(&["columna 1"])));
        assert!(!detect_header(&row(&["101110111", "Ana Mora", "Sí"])));
        assert!(!detect_header(&[]));
    }

    #[test]
    fn test_detect_header_false_positive_is_kept() {
        // A student literally named "Nombre" trips the heuristic
        assert!(detect_header(&row(&["208880888", "Juan Nombre Soto"])));
    }

    #[test]
    fn test_title_row_is_skipped() {
        let table = RawTable::new(vec![
            row(&["Registro de entregas 2024", "", ""]),
            row(&["Cédula", "Nombre", "Módulos"]),
            row(&["101110111", "Ana", "3"]),
            row(&["202220222", "Luis", "2"]),
        ]);
        let source = into_source(Path::new("a.xlsx"), table).unwrap();
        assert!(source.header_skipped);
        assert_eq!(source.schema.names(), &["Cédula", "Nombre", "Módulos"]);
        assert_eq!(source.row_count(), 2);
        assert_eq!(source.rows[0][0].to_text(), "101110111");
    }

    #[test]
    fn test_plain_header_is_used_directly() {
        let table = RawTable::new(vec![
            row(&["Cedula", "Estudiante"]),
            row(&["101110111", "Ana"]),
        ]);
        let source = into_source(Path::new("b.xlsx"), table).unwrap();
        assert!(!source.header_skipped);
        assert_eq!(source.schema.names(), &["Cedula", "Estudiante"]);
        assert_eq!(source.row_count(), 1);
    }

    #[test]
    fn test_blank_rows_are_dropped() {
        let table = RawTable::new(vec![
            row(&["Cedula", "Estudiante"]),
            row(&["", ""]),
            row(&["101110111", "Ana"]),
        ]);
        let source = into_source(Path::new("c.xlsx"), table).unwrap();
        assert_eq!(source.row_count(), 1);
    }

    #[test]
    fn test_single_row_is_never_skipped() {
        let table = RawTable::new(vec![row(&["Nombre", "Módulos"])]);
        let source = into_source(Path::new("d.xlsx"), table).unwrap();
        assert!(!source.header_skipped);
        assert_eq!(source.row_count(), 0);
        assert_eq!(source.column_count(), 2);
    }

    #[test]
    fn test_empty_table_has_no_source() {
        assert!(into_source(Path::new("e.xlsx"), RawTable::default()).is_none());
    }
}
