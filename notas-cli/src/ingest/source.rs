//! Source files and their column schemas

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::value::CellValue;

/// Raw rows as returned by a reader, before any header handling.
///
/// Every row is padded to the same width.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

/// Ordered column names of one source, resolved once at load time
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from header cells.
    ///
    /// Blank headers become `Unnamed: <i>`; a repeated name gets a `.N` suffix
    /// so every name in the schema is unique.
    pub fn from_header(cells: &[CellValue]) -> Self {
        let mut names = Vec::with_capacity(cells.len());
        let mut index = HashMap::with_capacity(cells.len());
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (i, cell) in cells.iter().enumerate() {
            let base = if cell.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                cell.to_text()
            };

            let mut name = base.clone();
            while index.contains_key(&name) {
                let counter = seen.entry(base.clone()).or_insert(0);
                *counter += 1;
                name = format!("{}.{}", base, counter);
            }

            index.insert(name.clone(), i);
            names.push(name);
        }

        Self { names, index }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// Position of a column by exact name
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// A spreadsheet after header handling: a schema plus positional data rows
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub schema: Schema,
    pub rows: Vec<Vec<CellValue>>,
    /// Whether a header-like title row was skipped
    pub header_skipped: bool,
}

impl SourceFile {
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Short identifier used in provenance lists and diagnostics
    pub fn label(&self) -> String {
        source_label(&self.path)
    }
}

pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_schema_names_blank_and_duplicates() {
        let schema = Schema::from_header(&[
            text("Cédula"),
            CellValue::Empty,
            text("Nota"),
            text("Nota"),
            text("Nota"),
        ]);
        assert_eq!(
            schema.names(),
            &["Cédula", "Unnamed: 1", "Nota", "Nota.1", "Nota.2"]
        );
        assert_eq!(schema.position("Nota.1"), Some(3));
        assert_eq!(schema.position("nota"), None);
    }

    #[test]
    fn test_numeric_header_is_stringified() {
        let schema = Schema::from_header(&[CellValue::Float(2024.0), text("Nombre")]);
        assert_eq!(schema.name(0), Some("2024"));
    }

    #[test]
    fn test_raw_table_pads_rows() {
        let table = RawTable::new(vec![vec![text("a")], vec![text("b"), text("c")]]);
        assert_eq!(table.width(), 2);
        assert_eq!(table.rows[0][1], CellValue::Empty);
    }

    #[test]
    fn test_source_label_is_file_name() {
        assert_eq!(source_label(Path::new("/tmp/notas/grupo1.xlsx")), "grupo1.xlsx");
    }
}
