//! Shared execution context passed to every task.

use std::sync::Arc;

use crate::config::Config;
use crate::logging::Log;

/// Shared context for task execution.
pub struct Context {
    /// Loaded and resolved configuration.
    pub config: Config,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Whether to process resources in parallel using Rayon.
    pub parallel: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub fn new(config: Config, log: Arc<dyn Log>, dry_run: bool, parallel: bool) -> Self {
        Self {
            config,
            log,
            dry_run,
            parallel,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{empty_config, make_context};
    use std::path::PathBuf;

    #[test]
    fn context_holds_config_root() {
        let ctx = make_context(empty_config(PathBuf::from("/proj")));
        assert_eq!(ctx.config.root, PathBuf::from("/proj"));
        assert!(!ctx.dry_run);
        assert!(!ctx.parallel);
    }

    #[test]
    fn debug_format_includes_key_fields() {
        let ctx = make_context(empty_config(PathBuf::from("/proj")));
        let debug = format!("{ctx:?}");
        assert!(debug.contains("Context"));
        assert!(debug.contains("dry_run"));
        assert!(debug.contains("parallel"));
    }
}
