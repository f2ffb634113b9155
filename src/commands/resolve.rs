//! The `resolve` command: print the resolved configuration.

use std::path::Path;

use anyhow::Result;

use crate::cli::{GlobalOpts, ResolveOpts};
use crate::config::{Config, DEFAULT_SOURCE};
use crate::logging::Logger;

/// Run the resolve command: print the fully resolved configuration.
///
/// Values are printed as `KEY=VALUE` lines in source declaration order.
/// Residual `${...}` references are warned about; with `--check` they fail
/// the run instead, for callers that require strict resolution.
///
/// # Errors
///
/// Returns an error if configuration loading fails, or — with `--check` —
/// if any reference is left unresolved.
#[allow(clippy::print_stdout)]
pub fn run(global: &GlobalOpts, opts: &ResolveOpts, log: &Logger) -> Result<()> {
    let root = super::resolve_root(global)?;
    let source = global
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_SOURCE));
    let config = Config::load(&root, source, global.targets.as_deref())?;

    for (key, value) in config.values.iter() {
        println!("{key}={value}");
    }

    let unresolved = config.values.unresolved_keys();
    for key in &unresolved {
        let value = config.values.get(key).unwrap_or_default();
        log.warn(&format!("unresolved reference in {key}: {value}"));
    }

    if opts.check && !unresolved.is_empty() {
        anyhow::bail!("{} unresolved reference(s)", unresolved.len());
    }
    Ok(())
}
