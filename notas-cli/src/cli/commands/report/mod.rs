//! `report` command: merge sources and write the search page and workbook

mod handler;

pub use handler::handle_report_command;

use std::path::PathBuf;

use clap::Args;

use super::SourceArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct ReportCommands {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Directory for generated files (overrides the configured output_dir)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Skip the Excel workbook report
    #[arg(long)]
    pub no_workbook: bool,

    /// Skip the HTML search page
    #[arg(long)]
    pub no_artifact: bool,
}
