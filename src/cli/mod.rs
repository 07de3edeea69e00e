//! Command-line interface: argument parsing and command dispatch.

pub mod args;
pub mod commands;

pub use args::{BrowseArgs, Cli, Commands};

use anyhow::Result;

/// Dispatch the parsed CLI to its command. Returns the process exit code.
///
/// No subcommand means browse with defaults.
pub fn dispatch(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Some(Commands::Browse(args)) => commands::browse::execute(args, cli.config.as_deref()),
        Some(Commands::Cache(args)) => commands::cache::execute(args),
        Some(Commands::Bookmark(args)) => commands::bookmark::execute(args),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::browse::execute(&BrowseArgs::default(), cli.config.as_deref()),
    }
}
