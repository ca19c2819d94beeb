//! Command-line interface

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{InteractiveCommands, LookupCommands, ReportCommands};

#[derive(Debug, Parser)]
#[command(name = "notas-cli", version, about = "Student evaluation records: merge, look up and export")]
pub struct Cli {
    /// Configuration file (defaults to ./notas.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge all spreadsheets and write the search page and workbook report
    Report(ReportCommands),
    /// Look up a student by identity number
    Lookup(LookupCommands),
    /// Load once and look up identity numbers until an empty answer
    Interactive(InteractiveCommands),
}
