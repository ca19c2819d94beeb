//! Console rendering for diagnostics and lookup results

use colored::*;

use crate::dataset::MergedDataset;
use crate::diagnostics::{Diagnostics, Severity};
use crate::lookup::IdentityMatch;

const RULE_WIDTH: usize = 60;

pub fn print_banner() {
    println!("{}", "Evaluation document delivery registry".cyan().bold());
    println!("{}", "=".repeat(50).cyan().bold());
}

/// Print every collected diagnostic, one line each
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    for entry in diagnostics.entries() {
        let marker = match entry.severity {
            Severity::Info => "  ".normal(),
            Severity::Warning => "! ".yellow().bold(),
            Severity::Error => "x ".red().bold(),
        };
        let message = match entry.severity {
            Severity::Info => entry.message.normal(),
            Severity::Warning => entry.message.yellow(),
            Severity::Error => entry.message.red(),
        };

        match &entry.source {
            Some(source) => println!("{}{} {}", marker, format!("{}:", source).magenta(), message),
            None => println!("{}{}", marker, message),
        }
    }
}

pub fn print_dataset_summary(dataset: &MergedDataset) {
    println!("{}", "Data merged successfully:".green().bold());
    println!(
        "   {}",
        format!("Total records: {}", dataset.len()).cyan().bold()
    );
}

/// Non-empty fields of a matched record, in the record's column order
pub fn record_lines(found: &IdentityMatch<'_>) -> Vec<(String, String)> {
    found
        .record
        .fields()
        .map(|(name, value)| (name.to_string(), value.to_text()))
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
}

pub fn print_student(found: &IdentityMatch<'_>) {
    println!("\n{}", "=".repeat(RULE_WIDTH));
    println!("{}", "STUDENT INFORMATION".bold());
    println!("{}", "=".repeat(RULE_WIDTH));

    for (name, value) in record_lines(found) {
        println!("{}: {}", name.bold(), value);
    }

    println!("{}", "-".repeat(RULE_WIDTH));
    println!(
        "{}",
        format!(
            "source: {} (matched on '{}')",
            found.record.source().label,
            found.column
        )
        .dimmed()
    );
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_not_found(query: &str) {
    println!("\n{}", format!("No information found for identity number: {}", query).yellow());
}
