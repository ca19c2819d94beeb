//! Self-contained HTML search page
//!
//! The markup and search script are a fixed asset compiled into the binary.
//! Only the embedded row array and the source count change between runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::PipelineError;

use super::projection::DisplayRow;

const TEMPLATE: &str = include_str!("assets/search.html");
const ROWS_TOKEN: &str = "{{DISPLAY_ROWS}}";
const SOURCE_COUNT_TOKEN: &str = "{{SOURCE_COUNT}}";

/// Render the search page with `rows` embedded as a JSON array
pub fn render_artifact(rows: &[DisplayRow], provenance: &[&str]) -> Result<Vec<u8>, serde_json::Error> {
    let json = escape_script_json(&serde_json::to_string(rows)?);

    let html = TEMPLATE
        .replace(SOURCE_COUNT_TOKEN, &provenance.len().to_string())
        .replace(ROWS_TOKEN, &json);

    Ok(html.into_bytes())
}

/// Make serialized JSON inert inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\uXXXX` forms
/// decode to the same text. Covers `</script>` as well as `<!--` sequences.
fn escape_script_json(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `tabla_estudiantes_combinada_<ts>.html` for several sources,
/// `tabla_estudiantes_<ts>.html` for one
pub fn artifact_file_name(generated_at: &DateTime<Local>, source_count: usize) -> String {
    let timestamp = generated_at.format("%Y%m%d_%H%M%S");
    if source_count > 1 {
        format!("tabla_estudiantes_combinada_{}.html", timestamp)
    } else {
        format!("tabla_estudiantes_{}.html", timestamp)
    }
}

/// Write a rendered page to `dir/name`
pub fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, PipelineError> {
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|e| PipelineError::ArtifactWrite {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    log::info!("HTML search page written: {}", path.display());
    Ok(path)
}
