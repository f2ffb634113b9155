//! The `apply` command: resolve the configuration and run all tasks.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::config::{Config, DEFAULT_SOURCE};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, Task};

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any task fails.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Arc<Logger>) -> Result<()> {
    let root = super::resolve_root(global)?;

    let version = option_env!("CONFAPPLY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("confapply {version}"));

    log.stage("Loading configuration");
    let source = global
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(DEFAULT_SOURCE));
    let config = Config::load(&root, source, global.targets.as_deref())?;
    log.info(&format!(
        "loaded {} values, {} targets",
        config.values.len(),
        config.mappings.len()
    ));
    warn_unresolved(&config, log);

    let ctx = Context::new(
        config,
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        global.parallel,
    );

    let all_tasks = tasks::all_apply_tasks();

    // Filter by --skip and --only
    let tasks_to_run: Vec<&dyn Task> = all_tasks
        .iter()
        .filter(|t| {
            let name = t.name().to_lowercase();
            if !opts.only.is_empty() {
                return opts.only.iter().any(|o| name.contains(&o.to_lowercase()));
            }
            if !opts.skip.is_empty() {
                return !opts.skip.iter().any(|s| name.contains(&s.to_lowercase()));
            }
            true
        })
        .map(|t| t.as_ref())
        .collect();

    for task in tasks_to_run {
        tasks::execute(task, &ctx);
    }

    log.print_summary();

    if log.has_failures() {
        anyhow::bail!("one or more tasks failed");
    }
    Ok(())
}

/// Surface residual `${...}` references as warnings.
///
/// Unresolved references are a silent-degradation condition by design — the
/// resolver leaves them in place rather than erroring — so the run continues,
/// but each one is called out before any file is written.
fn warn_unresolved(config: &Config, log: &Logger) {
    for key in config.values.unresolved_keys() {
        let value = config.values.get(key).unwrap_or_default();
        log.warn(&format!("unresolved reference in {key}: {value}"));
    }
}
