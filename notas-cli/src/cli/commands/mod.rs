//! Subcommands and the source selection they share

pub mod lookup;
pub mod report;

pub use lookup::{InteractiveCommands, LookupCommands, handle_interactive_command, handle_lookup_command};
pub use report::{ReportCommands, handle_report_command};

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::*;

use crate::config::Config;
use crate::error::PipelineError;
use crate::ingest::{discover_sources, source_label};

/// Where to take source spreadsheets from
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Directory to scan for spreadsheets (overrides the configured input_dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Use these files instead of scanning a directory (repeatable)
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Resolve the source list: explicit files, else a directory scan.
///
/// Finding nothing is a [`PipelineError::NoValidSources`].
pub fn resolve_sources(args: &SourceArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let sources = if args.files.is_empty() {
        let dir = args.dir.as_ref().unwrap_or(&config.input_dir);
        discover_sources(dir, &config.discovery_rules())?
    } else {
        args.files.clone()
    };

    if sources.is_empty() {
        println!(
            "{}",
            format!("No spreadsheet files ({}) found", config.extensions.join(", ")).red().bold()
        );
        return Err(PipelineError::NoValidSources { skipped: vec![] }.into());
    }

    println!("{}", "Spreadsheet files found:".green().bold());
    for (i, path) in sources.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).yellow().bold(), source_label(path));
    }

    Ok(sources)
}
