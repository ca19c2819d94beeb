//! `lookup` and `interactive` commands

mod handler;

pub use handler::{handle_interactive_command, handle_lookup_command};

use clap::Args;

use super::SourceArgs;

#[derive(Debug, Clone, Args)]
pub struct LookupCommands {
    /// Identity number; hyphens and spaces are ignored
    pub identity: String,

    #[command(flatten)]
    pub sources: SourceArgs,
}

#[derive(Debug, Clone, Default, Args)]
pub struct InteractiveCommands {
    #[command(flatten)]
    pub sources: SourceArgs,
}
