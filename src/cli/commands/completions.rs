//! Shell completions generation.

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};

/// Generate completions for the requested shell on stdout.
pub fn execute(args: &CompletionsArgs) -> Result<i32> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "webdex", &mut std::io::stdout());
    Ok(0)
}
