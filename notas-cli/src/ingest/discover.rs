//! Source file discovery in an input directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Which files in a directory count as sources
#[derive(Debug, Clone)]
pub struct DiscoveryRules {
    /// Accepted extensions, without the dot, compared case-insensitively
    pub extensions: Vec<String>,
    /// File names starting with this prefix are editor lock files
    pub lock_prefix: String,
}

impl DiscoveryRules {
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };

        if !self.lock_prefix.is_empty() && name.starts_with(&self.lock_prefix) {
            return false;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// List source files in `dir`, sorted by file name
pub fn discover_sources(dir: &Path, rules: &DiscoveryRules) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory: {}", dir.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && rules.accepts(&path) {
            sources.push(path);
        }
    }

    sources.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!("Discovered {} source files in {}", sources.len(), dir.display());
    Ok(sources)
}
