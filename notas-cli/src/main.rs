use std::process::ExitCode;

use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;

use notas_cli::cli::commands::{
    ReportCommands, handle_interactive_command, handle_lookup_command, handle_report_command,
};
use notas_cli::cli::{Cli, Commands};
use notas_cli::config::Config;
use notas_cli::error::{EXIT_FAILURE, PipelineError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            let code = err
                .downcast_ref::<PipelineError>()
                .map(PipelineError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Some(Commands::Report(args)) => handle_report_command(args, &config),
        Some(Commands::Lookup(args)) => handle_lookup_command(args, &config),
        Some(Commands::Interactive(args)) => handle_interactive_command(args, &config),
        None => handle_report_command(ReportCommands::default(), &config),
    }
}
