//! Backup task: preserve every file the run is about to overwrite.

use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::backup::FileBackup;

/// Copies each existing target file (and the package manifest) to
/// `<path>.bak` before anything else touches it.
///
/// A failed backup is logged as a warning rather than aborting the run: the
/// render task is idempotent, so a missing backup degrades safety but not
/// correctness.
#[derive(Debug, Clone, Copy)]
pub struct BackupTargets;

impl Task for BackupTargets {
    fn name(&self) -> &str {
        "Backups"
    }

    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut sources: Vec<_> = ctx
            .config
            .mappings
            .iter()
            .map(|m| m.target.clone())
            .collect();
        if !sources.contains(&ctx.config.manifest) {
            sources.push(ctx.config.manifest.clone());
        }

        process_resources(
            ctx,
            sources.into_iter().map(FileBackup::new),
            &ProcessOpts::apply_all("back up").no_bail(),
        )
    }
}
