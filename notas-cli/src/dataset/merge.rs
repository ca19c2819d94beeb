//! Record merging and the merged dataset

use std::path::PathBuf;

use crate::ingest::{CellValue, Schema, SourceFile};

use super::reconcile::{SchemaMismatchError, SourceShape, reconcile};

/// Where a group of records came from
#[derive(Debug, Clone)]
pub struct Provenance {
    pub label: String,
    pub path: PathBuf,
    pub schema: Schema,
    pub row_count: usize,
    pub header_skipped: bool,
}

/// One row of a source, stored positionally
#[derive(Debug, Clone)]
pub struct Record {
    source: usize,
    values: Vec<CellValue>,
}

/// All accepted sources concatenated in source order, then row order
#[derive(Debug, Clone)]
pub struct MergedDataset {
    sources: Vec<Provenance>,
    columns: Vec<String>,
    records: Vec<Record>,
}

/// Borrowed view of a record together with its source schema
#[derive(Debug, Clone, Copy)]
pub struct RecordRef<'a> {
    /// Position in the merged dataset
    pub index: usize,
    record: &'a Record,
    source: &'a Provenance,
}

impl<'a> RecordRef<'a> {
    /// Value of a named column; `None` when the record's source lacks it
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.source
            .schema
            .position(column)
            .and_then(|pos| self.record.values.get(pos))
    }

    /// Value at a column position of the record's own source
    pub fn value_at(&self, position: usize) -> Option<&'a CellValue> {
        self.record.values.get(position)
    }

    pub fn values(&self) -> &'a [CellValue] {
        &self.record.values
    }

    /// Column name / value pairs in the source's column order
    pub fn fields(self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + 'a {
        let source = self.source;
        self.record
            .values
            .iter()
            .enumerate()
            .filter_map(move |(pos, value)| source.schema.name(pos).map(|name| (name, value)))
    }

    pub fn source(&self) -> &'a Provenance {
        self.source
    }
}

impl MergedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column names across all sources, in first-appearance order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Column count shared by every source
    pub fn column_count(&self) -> usize {
        self.sources.first().map(|s| s.schema.len()).unwrap_or(0)
    }

    pub fn sources(&self) -> &[Provenance] {
        &self.sources
    }

    /// Contributing source labels, in merge order
    pub fn provenance(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn get(&self, index: usize) -> Option<RecordRef<'_>> {
        let record = self.records.get(index)?;
        Some(RecordRef {
            index,
            record,
            source: &self.sources[record.source],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = RecordRef<'_>> {
        self.records.iter().enumerate().map(|(index, record)| RecordRef {
            index,
            record,
            source: &self.sources[record.source],
        })
    }
}

/// Reconcile and concatenate sources.
///
/// No deduplication, sorting or column-name unification is done. On a column
/// count mismatch nothing is merged.
pub fn merge(sources: Vec<SourceFile>) -> Result<MergedDataset, SchemaMismatchError> {
    let shapes: Vec<SourceShape> = sources.iter().map(SourceShape::from).collect();
    reconcile(&shapes)?;

    let mut provenance = Vec::with_capacity(sources.len());
    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(shapes.iter().map(|s| s.row_count).sum());

    for (source_idx, source) in sources.into_iter().enumerate() {
        let label = source.label();

        for name in source.schema.names() {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        let row_count = source.rows.len();
        records.extend(source.rows.into_iter().map(|values| Record {
            source: source_idx,
            values,
        }));

        log::info!("Merged {} records from {}", row_count, label);
        provenance.push(Provenance {
            label,
            path: source.path,
            schema: source.schema,
            row_count,
            header_skipped: source.header_skipped,
        });
    }

    Ok(MergedDataset {
        sources: provenance,
        columns,
        records,
    })
}
