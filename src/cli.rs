//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the config-apply engine.
#[derive(Parser, Debug)]
#[command(
    name = "confapply",
    about = "Applies .env-style configuration to templated project files",
    version
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Configuration source file (default: .env.config in the project root)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Target mapping file (default: targets.conf in the project root,
    /// falling back to the built-in deployment file list)
    #[arg(short, long, global = true)]
    pub targets: Option<PathBuf>,

    /// Override project root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Disable parallel rendering of targets (parallel is enabled by default)
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the configuration and apply it to all targets
    Apply(ApplyOpts),
    /// Print the resolved configuration
    Resolve(ResolveOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Stable command name, used for the per-command log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Apply(_) => "apply",
            Self::Resolve(_) => "resolve",
            Self::Completions(_) => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

/// Options for the `resolve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ResolveOpts {
    /// Fail when any reference is left unresolved
    #[arg(long)]
    pub check: bool,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
