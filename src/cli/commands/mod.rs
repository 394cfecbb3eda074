//! CLI command implementations

mod inspect;
mod publish;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Publish(args) => publish::run_publish(args, level),
        Command::Inspect(args) => inspect::run_inspect(args, level),
    }
}
