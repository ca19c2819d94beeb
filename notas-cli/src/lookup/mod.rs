//! Identity-number lookup over the merged dataset
//!
//! Matching is substring containment on the normalized query, column by
//! column. The search page embedded in the HTML report compares with exact
//! equality instead; the two are intentionally kept different.

use crate::dataset::{MergedDataset, RecordRef};

/// Column-name fragments that mark identity columns.
///
/// "id" is short enough to also hit names like "Apellidos"; that is accepted.
pub const IDENTITY_KEYWORDS: [&str; 6] = [
    "cedula",
    "cédula",
    "identificacion",
    "identificación",
    "dni",
    "id",
];

/// A record found by [`find_by_identity`]
#[derive(Debug, Clone, Copy)]
pub struct IdentityMatch<'a> {
    pub record: RecordRef<'a>,
    /// Column whose value contained the query
    pub column: &'a str,
}

/// Strip hyphens and spaces. Case, leading zeros and other punctuation stay.
pub fn normalize_identity(query: &str) -> String {
    query.chars().filter(|c| *c != '-' && *c != ' ').collect()
}

/// Columns to search, in dataset column order.
///
/// Falls back to every column when no name looks like an identity column.
pub fn identity_columns(dataset: &MergedDataset) -> Vec<&str> {
    let candidates: Vec<&str> = dataset
        .columns()
        .iter()
        .filter(|name| {
            let lower = name.to_lowercase();
            IDENTITY_KEYWORDS.iter().any(|kw| lower.contains(kw))
        })
        .map(String::as_str)
        .collect();

    if candidates.is_empty() {
        dataset.columns().iter().map(String::as_str).collect()
    } else {
        candidates
    }
}

/// Find the first record whose identity column contains the query.
///
/// Columns are tried in order; the first column with any hit decides, and the
/// earliest record in dataset order wins within it.
pub fn find_by_identity<'a>(query: &str, dataset: &'a MergedDataset) -> Option<IdentityMatch<'a>> {
    let needle = normalize_identity(query);

    for column in identity_columns(dataset) {
        let hit = dataset.iter().find(|record| {
            record
                .get(column)
                .is_some_and(|value| value.to_text().contains(&needle))
        });

        if let Some(record) = hit {
            log::info!("Student found in column '{}'", column);
            return Some(IdentityMatch { record, column });
        }
    }

    log::warn!("No student found with identity number {}", query);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::merge;
    use crate::dataset::merge::tests::source;

    #[test]
    fn test_normalize_strips_hyphens_and_spaces_only() {
        assert_eq!(normalize_identity("1-234 567"), "1234567");
        assert_eq!(normalize_identity(" 01-0234-0567 "), "0102340567");
        assert_eq!(normalize_identity("AB.12/3"), "AB.12/3");
    }

    #[test]
    fn test_substring_match_on_identity_column() {
        let dataset = merge(vec![source(
            "a.xlsx",
            &[&["Nombre", "Cédula"], &["Ana", "01234567"], &["Luis", "7654321"]],
        )])
        .unwrap();

        let found = find_by_identity("1-234 567", &dataset).unwrap();
        assert_eq!(found.column, "Cédula");
        assert_eq!(found.record.index, 0);
        assert_eq!(found.record.get("Nombre").unwrap().to_text(), "Ana");
    }

    #[test]
    fn test_first_matching_column_wins() {
        // "Id Estudiante" comes first and matches only Luis; "Cedula" would
        // match Ana earlier in dataset order but is never scanned
        let dataset = merge(vec![source(
            "a.xlsx",
            &[
                &["Id Estudiante", "Cedula", "Nombre"],
                &["900", "555", "Ana"],
                &["555", "111", "Luis"],
            ],
        )])
        .unwrap();

        let found = find_by_identity("555", &dataset).unwrap();
        assert_eq!(found.column, "Id Estudiante");
        assert_eq!(found.record.get("Nombre").unwrap().to_text(), "Luis");
    }

    #[test]
    fn test_first_record_in_dataset_order_wins() {
        let dataset = merge(vec![
            source("a.xlsx", &[&["Cédula", "Nombre"], &["1112223", "Ana"]]),
            source("b.xlsx", &[&["Cédula", "Nombre"], &["111222", "Luis"]]),
        ])
        .unwrap();

        let found = find_by_identity("111222", &dataset).unwrap();
        assert_eq!(found.record.get("Nombre").unwrap().to_text(), "Ana");
    }

    #[test]
    fn test_falls_back_to_every_column() {
        let dataset = merge(vec![source(
            "a.xlsx",
            &[&["Estudiante", "Numero"], &["Ana", "303330333"]],
        )])
        .unwrap();

        assert_eq!(identity_columns(&dataset), vec!["Estudiante", "Numero"]);
        let found = find_by_identity("303330333", &dataset).unwrap();
        assert_eq!(found.column, "Numero");
    }

    #[test]
    fn test_short_keyword_matches_unrelated_names() {
        let dataset = merge(vec![source(
            "a.xlsx",
            &[&["Apellidos", "Nota"], &["Mora", "90"]],
        )])
        .unwrap();
        assert_eq!(identity_columns(&dataset), vec!["Apellidos"]);
        assert!(find_by_identity("90", &dataset).is_none());
    }

    #[test]
    fn test_identity_columns_span_sources() {
        let dataset = merge(vec![
            source("a.xlsx", &[&["Cédula", "Nombre"], &["101", "Ana"]]),
            source("b.xlsx", &[&["DNI", "Nombre"], &["202", "Eva"]]),
        ])
        .unwrap();

        assert_eq!(identity_columns(&dataset), vec!["Cédula", "DNI"]);
        let found = find_by_identity("202", &dataset).unwrap();
        assert_eq!(found.column, "DNI");
        assert_eq!(found.record.source().label, "b.xlsx");
    }

    #[test]
    fn test_numeric_cells_are_matched_as_text() {
        let mut a = source("a.xlsx", &[&["Cédula"], &["x"]]);
        a.rows[0][0] = crate::ingest::CellValue::Float(101110111.0);
        let dataset = merge(vec![a]).unwrap();
        assert!(find_by_identity("101110111", &dataset).is_some());
        assert!(find_by_identity("101110111.0", &dataset).is_none());
    }

    #[test]
    fn test_not_found() {
        let dataset = merge(vec![source("a.xlsx", &[&["Cédula"], &["101"]])]).unwrap();
        assert!(find_by_identity("999", &dataset).is_none());
    }
}
