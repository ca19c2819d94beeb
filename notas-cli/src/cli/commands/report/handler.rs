//! Report command handler

use anyhow::Result;
use chrono::Local;
use colored::*;

use super::ReportCommands;
use crate::cli::commands::resolve_sources;
use crate::cli::output::{print_banner, print_dataset_summary, print_diagnostics};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::pipeline::{ReportOptions, generate_reports, load_dataset};

/// Merge every source and write the configured outputs
pub fn handle_report_command(args: ReportCommands, config: &Config) -> Result<()> {
    print_banner();

    let paths = resolve_sources(&args.sources, config)?;
    println!(
        "\n{}",
        format!("Merging {} spreadsheet files...", paths.len()).blue().bold()
    );

    let mut diagnostics = Diagnostics::new();
    let loaded = load_dataset(&paths, &mut diagnostics);
    print_diagnostics(&diagnostics);
    let dataset = loaded?;
    print_dataset_summary(&dataset);

    let options = ReportOptions {
        output_dir: args.out.unwrap_or_else(|| config.output_dir.clone()),
        write_artifact: config.write_artifact && !args.no_artifact,
        write_workbook: config.write_workbook && !args.no_workbook,
    };

    if !options.write_artifact && !options.write_workbook {
        println!("{}", "All outputs disabled, nothing written".yellow());
        return Ok(());
    }

    let outputs = generate_reports(&dataset, &options, &Local::now(), &mut diagnostics)?;

    if let Some(path) = outputs.artifact {
        println!(
            "{} {}",
            "HTML search page generated:".green().bold(),
            path.display().to_string().cyan().bold()
        );
    }
    if let Some(path) = outputs.workbook {
        println!(
            "{} {}",
            "Excel report generated:".green().bold(),
            path.display().to_string().cyan().bold()
        );
    }

    Ok(())
}
