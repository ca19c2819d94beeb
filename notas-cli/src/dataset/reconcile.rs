//! Cross-source schema check
//!
//! Sources are combined by column position, so the only hard requirement is
//! that every source has the same number of columns. Names may differ.

use crate::ingest::SourceFile;

/// Shape of one source as seen by the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceShape {
    pub label: String,
    pub column_count: usize,
    pub row_count: usize,
}

impl From<&SourceFile> for SourceShape {
    fn from(source: &SourceFile) -> Self {
        Self {
            label: source.label(),
            column_count: source.column_count(),
            row_count: source.row_count(),
        }
    }
}

/// Sources disagree on column count. Lists every source, not just the first
/// offender, so the caller can print a full diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMismatchError {
    pub sources: Vec<SourceShape>,
}

impl SchemaMismatchError {
    /// Distinct column counts, in first-seen order
    pub fn column_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for shape in &self.sources {
            if !counts.contains(&shape.column_count) {
                counts.push(shape.column_count);
            }
        }
        counts
    }
}

impl std::fmt::Display for SchemaMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listing = self
            .sources
            .iter()
            .map(|s| format!("{}: {} columns", s.label, s.column_count))
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "sources have different numbers of columns ({}); all sources must have the same number of columns",
            listing
        )
    }
}

impl std::error::Error for SchemaMismatchError {}

/// Check that all sources report the same column count
pub fn reconcile(shapes: &[SourceShape]) -> Result<(), SchemaMismatchError> {
    let Some(first) = shapes.first() else {
        return Ok(());
    };

    if shapes.iter().all(|s| s.column_count == first.column_count) {
        log::debug!(
            "{} sources agree on {} columns",
            shapes.len(),
            first.column_count
        );
        Ok(())
    } else {
        Err(SchemaMismatchError {
            sources: shapes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(label: &str, column_count: usize, row_count: usize) -> SourceShape {
        SourceShape {
            label: label.to_string(),
            column_count,
            row_count,
        }
    }

    #[test]
    fn test_equal_column_counts_pass() {
        let shapes = vec![shape("a.xlsx", 6, 10), shape("b.xlsx", 6, 0), shape("c.xlsx", 6, 3)];
        assert!(reconcile(&shapes).is_ok());
    }

    #[test]
    fn test_empty_and_single_source_pass() {
        assert!(reconcile(&[]).is_ok());
        assert!(reconcile(&[shape("a.xlsx", 4, 1)]).is_ok());
    }

    #[test]
    fn test_mismatch_lists_every_source() {
        let shapes = vec![shape("a.xlsx", 6, 10), shape("b.xlsx", 6, 5), shape("c.xlsx", 7, 2)];
        let err = reconcile(&shapes).unwrap_err();

        assert_eq!(err.sources, shapes);
        assert_eq!(err.column_counts(), vec![6, 7]);

        let message = err.to_string();
        assert!(message.contains("a.xlsx: 6 columns"));
        assert!(message.contains("b.xlsx: 6 columns"));
        assert!(message.contains("c.xlsx: 7 columns"));
    }
}
