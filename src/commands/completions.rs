//! The `completions` command: shell completion generation.

use anyhow::Result;
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Generate shell completions on stdout.
///
/// # Errors
///
/// Infallible in practice; returns `Result` for uniformity with the other
/// command handlers.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(opts.shell, &mut cmd, "confapply", &mut std::io::stdout());
    Ok(())
}
