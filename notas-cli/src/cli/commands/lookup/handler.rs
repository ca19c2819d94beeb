//! Lookup command handlers

use anyhow::{Result, bail};
use colored::*;
use dialoguer::Input;

use super::{InteractiveCommands, LookupCommands};
use crate::cli::commands::{SourceArgs, resolve_sources};
use crate::cli::output::{
    print_banner, print_dataset_summary, print_diagnostics, print_not_found, print_student,
};
use crate::config::Config;
use crate::dataset::MergedDataset;
use crate::diagnostics::{Diagnostics, Severity};
use crate::lookup::{find_by_identity, normalize_identity};
use crate::pipeline::load_dataset;

/// Load sources, printing diagnostics only when something went wrong
fn load(sources: &SourceArgs, config: &Config) -> Result<MergedDataset> {
    let paths = resolve_sources(sources, config)?;

    let mut diagnostics = Diagnostics::new();
    let loaded = load_dataset(&paths, &mut diagnostics);
    if loaded.is_err() || diagnostics.count(Severity::Warning) > 0 {
        print_diagnostics(&diagnostics);
    }
    Ok(loaded?)
}

/// Print the record for `query`, or a not-found message.
///
/// A miss is not an error.
fn show(query: &str, dataset: &MergedDataset) -> Result<()> {
    if normalize_identity(query).is_empty() {
        bail!("identity number is empty");
    }

    match find_by_identity(query, dataset) {
        Some(found) => print_student(&found),
        None => print_not_found(query),
    }
    Ok(())
}

pub fn handle_lookup_command(args: LookupCommands, config: &Config) -> Result<()> {
    let dataset = load(&args.sources, config)?;
    show(&args.identity, &dataset)
}

pub fn handle_interactive_command(args: InteractiveCommands, config: &Config) -> Result<()> {
    print_banner();
    let dataset = load(&args.sources, config)?;
    print_dataset_summary(&dataset);

    loop {
        let query: String = Input::new()
            .with_prompt("Identity number (empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        if query.trim().is_empty() {
            break;
        }

        if let Err(err) = show(&query, &dataset) {
            println!("{}", err.to_string().yellow());
        }
    }

    println!("{}", "Bye".dimmed());
    Ok(())
}
