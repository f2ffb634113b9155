//! Generic check+apply processing of resource batches.

use std::sync::Mutex;

use anyhow::Result;

use super::context::Context;
use crate::resources::{Resource, ResourceChange, ResourceState};

/// Result of a single task execution.
///
/// # Examples
///
/// ```
/// use confapply::tasks::TaskResult;
///
/// let ok = TaskResult::Ok;
/// let skipped = TaskResult::Skipped("no manifest fields configured".into());
/// let dry = TaskResult::DryRun;
///
/// assert!(matches!(ok, TaskResult::Ok));
/// assert!(matches!(skipped, TaskResult::Skipped(_)));
/// assert!(matches!(dry, TaskResult::DryRun));
/// ```
#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task was skipped (nothing applicable to do).
    Skipped(String),
    /// Task ran in dry-run mode.
    DryRun,
}

/// Counters for batch tasks that process many items.
///
/// Provides consistent summary logging across all tasks.
///
/// # Examples
///
/// ```
/// use confapply::tasks::TaskStats;
///
/// let mut stats = TaskStats::new();
/// stats.changed = 3;
/// stats.already_ok = 10;
///
/// assert_eq!(stats.summary(false), "3 changed, 10 already ok");
/// assert_eq!(stats.summary(true), "3 would change, 10 already ok");
/// ```
#[derive(Debug, Default)]
pub struct TaskStats {
    /// Number of items changed or applied.
    pub changed: u32,
    /// Number of items already in the correct state.
    pub already_ok: u32,
    /// Number of items skipped due to errors or inapplicability.
    pub skipped: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string (e.g. "3 changed, 10 already ok, 1 skipped").
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would change" } else { "changed" };
        if self.skipped > 0 {
            format!(
                "{} {verb}, {} already ok, {} skipped",
                self.changed, self.already_ok, self.skipped
            )
        } else {
            format!("{} {verb}, {} already ok", self.changed, self.already_ok)
        }
    }

    /// Log the summary and return the appropriate `TaskResult`.
    #[must_use]
    pub fn finish(self, ctx: &Context) -> TaskResult {
        ctx.log.info(&self.summary(ctx.dry_run));
        if ctx.dry_run {
            TaskResult::DryRun
        } else {
            TaskResult::Ok
        }
    }
}

impl std::ops::AddAssign for TaskStats {
    fn add_assign(&mut self, other: Self) {
        self.changed += other.changed;
        self.already_ok += other.already_ok;
        self.skipped += other.skipped;
    }
}

/// Configuration for the generic resource processing loop.
#[derive(Debug)]
pub struct ProcessOpts<'a> {
    /// Verb for log messages (e.g., "render", "back up").
    pub verb: &'a str,
    /// Propagate errors from `apply()` (bail). If `false`, warn and count as skipped.
    pub bail_on_error: bool,
}

impl<'a> ProcessOpts<'a> {
    /// Apply every fixable resource, bailing on errors.
    ///
    /// The strict default — suitable where every failure must be surfaced
    /// (rendering, manifest update).
    #[must_use]
    pub const fn apply_all(verb: &'a str) -> Self {
        Self {
            verb,
            bail_on_error: true,
        }
    }

    /// Warn on errors instead of bailing.
    ///
    /// Suitable where a failure must not abort the run (backups).
    #[must_use]
    pub const fn no_bail(mut self) -> Self {
        self.bail_on_error = false;
        self
    }
}

/// Process resources by checking each one's current state and applying as needed.
///
/// When `ctx.parallel` is `true` and there is more than one resource, the
/// per-resource work runs in parallel using Rayon.
///
/// # Errors
///
/// Returns an error if any resource fails to check its state or apply
/// changes, depending on the `bail_on_error` setting in `opts`. If
/// `bail_on_error` is `false`, errors are logged as warnings instead.
pub fn process_resources<R: Resource + Send>(
    ctx: &Context,
    resources: impl IntoIterator<Item = R>,
    opts: &ProcessOpts<'_>,
) -> Result<TaskResult> {
    let resources: Vec<R> = resources.into_iter().collect();
    if ctx.parallel && resources.len() > 1 {
        ctx.log.debug(&format!(
            "processing {} resources in parallel",
            resources.len()
        ));
        let stats = collect_parallel_stats(resources, |resource| {
            process_single(ctx, &resource, opts)
        })?;
        Ok(stats.finish(ctx))
    } else {
        let mut stats = TaskStats::new();
        for resource in resources {
            stats += process_single(ctx, &resource, opts)?;
        }
        Ok(stats.finish(ctx))
    }
}

/// Accumulate per-item [`TaskStats`] deltas in parallel using Rayon.
///
/// Runs `work` on each item concurrently; the resulting deltas are added to a
/// shared `Mutex<TaskStats>`. The per-item work runs without the stats lock
/// held, so all resources can be applied concurrently.
fn collect_parallel_stats<T: Send>(
    items: Vec<T>,
    work: impl Fn(T) -> Result<TaskStats> + Sync + Send,
) -> Result<TaskStats> {
    use rayon::prelude::*;
    let stats = Mutex::new(TaskStats::new());
    items.into_par_iter().try_for_each(|item| -> Result<()> {
        let delta = work(item)?;
        *stats
            .lock()
            .map_err(|e| anyhow::anyhow!("stats mutex poisoned: {e}"))? += delta;
        Ok(())
    })?;
    Ok(stats
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner))
}

/// Check one resource and apply it when needed.
fn process_single<R: Resource>(
    ctx: &Context,
    resource: &R,
    opts: &ProcessOpts<'_>,
) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    let description = resource.description();

    let state = match resource.current_state() {
        Ok(state) => state,
        Err(e) if opts.bail_on_error => {
            return Err(e.context(format!("checking {description}")));
        }
        Err(e) => {
            ctx.log.warn(&format!("skipping {description}: {e:#}"));
            stats.skipped += 1;
            return Ok(stats);
        }
    };

    match state {
        ResourceState::Correct => {
            ctx.log.debug(&format!("ok: {description} (already ok)"));
            stats.already_ok += 1;
        }
        ResourceState::Invalid { reason } => {
            ctx.log.debug(&format!("skip: {description} ({reason})"));
            stats.skipped += 1;
        }
        ResourceState::Missing | ResourceState::Incorrect { .. } => {
            if ctx.dry_run {
                ctx.log
                    .dry_run(&format!("would {}: {description}", opts.verb));
                stats.changed += 1;
                return Ok(stats);
            }
            match resource.apply() {
                Ok(ResourceChange::Applied) => {
                    ctx.log.debug(&format!("{}: {description}", opts.verb));
                    stats.changed += 1;
                }
                Ok(ResourceChange::AlreadyCorrect) => {
                    stats.already_ok += 1;
                }
                Ok(ResourceChange::Skipped { reason }) => {
                    ctx.log.debug(&format!("skip: {description} ({reason})"));
                    stats.skipped += 1;
                }
                Err(e) if opts.bail_on_error => {
                    return Err(e.context(format!("applying {description}")));
                }
                Err(e) => {
                    ctx.log
                        .warn(&format!("failed to {} {description}: {e:#}", opts.verb));
                    stats.skipped += 1;
                }
            }
        }
    }

    Ok(stats)
}
