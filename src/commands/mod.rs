//! Top-level subcommand orchestration.
pub mod apply;
pub mod completions;
pub mod resolve;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;

/// Resolve the project root directory from CLI arguments or the environment.
///
/// Precedence: `--root`, then `CONFAPPLY_ROOT`, then the current directory.
/// A missing configuration source inside the chosen root surfaces later,
/// when the configuration is loaded.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("CONFAPPLY_ROOT") {
        return Ok(PathBuf::from(root));
    }

    Ok(std::env::current_dir()?)
}
