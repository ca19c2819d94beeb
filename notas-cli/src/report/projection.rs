//! Positional projection onto the fixed display schema
//!
//! Display field `i` takes the record's `i`-th column, whatever that column
//! is called in its source. Missing positions become empty strings.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dataset::{MergedDataset, RecordRef};
use crate::ingest::CellValue;

/// Number of fields in the display schema
pub const DISPLAY_WIDTH: usize = 6;

/// Display labels in order: identity number, name, modules, syllabus,
/// specification table, written test
pub const DISPLAY_LABELS: [&str; DISPLAY_WIDTH] = [
    "Cédula",
    "Nombre",
    "Módulos",
    "Temario",
    "Tabla de Especificaciones",
    "Prueba Escrita",
];

/// One row of the search table. Serializes as an object keyed by
/// [`DISPLAY_LABELS`], in label order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayRow {
    fields: [String; DISPLAY_WIDTH],
}

impl DisplayRow {
    pub fn from_values(values: &[CellValue]) -> Self {
        let fields = std::array::from_fn(|i| values.get(i).map(CellValue::to_text).unwrap_or_default());
        Self { fields }
    }

    pub fn identity(&self) -> &str {
        &self.fields[0]
    }

    pub fn fields(&self) -> &[String; DISPLAY_WIDTH] {
        &self.fields
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        DISPLAY_LABELS
            .iter()
            .position(|l| *l == label)
            .map(|i| self.fields[i].as_str())
    }
}

impl From<RecordRef<'_>> for DisplayRow {
    fn from(record: RecordRef<'_>) -> Self {
        Self::from_values(record.values())
    }
}

impl Serialize for DisplayRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DISPLAY_WIDTH))?;
        for (label, value) in DISPLAY_LABELS.iter().zip(self.fields.iter()) {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Project every record, in dataset order
pub fn build_display_rows(dataset: &MergedDataset) -> Vec<DisplayRow> {
    dataset.iter().map(DisplayRow::from).collect()
}
