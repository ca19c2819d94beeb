//! Configuration file handling
//!
//! Lookup order: explicit `--config` path, `./notas.toml`, then
//! `<config dir>/notas-cli/config.toml`. Missing files fall back to defaults;
//! a file that exists but does not parse is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ingest::DiscoveryRules;

const LOCAL_CONFIG_FILE: &str = "notas.toml";
const APP_DIR: &str = "notas-cli";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory scanned for source spreadsheets
    pub input_dir: PathBuf,
    /// Directory generated files are written to
    pub output_dir: PathBuf,
    /// Accepted source extensions, without the dot
    pub extensions: Vec<String>,
    /// Prefix of editor lock files to ignore
    pub lock_prefix: String,
    pub write_workbook: bool,
    pub write_artifact: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            extensions: vec!["xlsx".to_string()],
            lock_prefix: "~$".to_string(),
            write_workbook: true,
            write_artifact: true,
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when no file exists
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in default_locations() {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.extensions.is_empty() {
            anyhow::bail!("'extensions' must list at least one file extension");
        }
        Ok(config)
    }

    pub fn discovery_rules(&self) -> DiscoveryRules {
        DiscoveryRules {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            lock_prefix: self.lock_prefix.clone(),
        }
    }
}

fn default_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join(APP_DIR).join("config.toml"));
    }
    locations
}
