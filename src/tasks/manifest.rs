//! Manifest task: sync package manifest fields with the configuration.

use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::resources::manifest::ManifestUpdate;

/// Updates the package manifest's `name`, `description`, `license`, and
/// `engines.node` fields from the resolved configuration.
///
/// Not applicable when the project has no manifest; skipped when none of the
/// manifest-driving configuration keys carry a value.
#[derive(Debug, Clone, Copy)]
pub struct UpdateManifest;

impl Task for UpdateManifest {
    fn name(&self) -> &str {
        "Update manifest"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.manifest.exists()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let update = ManifestUpdate::from_config(&ctx.config.manifest, &ctx.config.values);
        if update.is_noop() {
            return Ok(TaskResult::Skipped(
                "no manifest fields configured".to_string(),
            ));
        }

        process_resources(ctx, [update], &ProcessOpts::apply_all("update"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::resources::manifest::{KEY_DESCRIPTION, KEY_NAME};
    use crate::tasks::test_helpers::{config_with_values, make_context, make_dry_run_context};
    use serde_json::Value;

    #[test]
    fn updates_configured_fields() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name":"old","version":"0.1.0"}"#,
        )
        .unwrap();
        let ctx = make_context(config_with_values(
            dir.path().to_path_buf(),
            &[(KEY_NAME, "shop"), (KEY_DESCRIPTION, "a web shop")],
        ));

        let result = UpdateManifest.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));
        let doc: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(doc["name"], "shop");
        assert_eq!(doc["description"], "a web shop");
        assert_eq!(doc["version"], "0.1.0");
    }

    #[test]
    fn skipped_when_no_fields_configured() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name":"old"}"#).unwrap();
        let ctx = make_context(config_with_values(
            dir.path().to_path_buf(),
            &[("UNRELATED", "x")],
        ));

        let result = UpdateManifest.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(_)));
    }

    #[test]
    fn not_applicable_without_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context(config_with_values(
            dir.path().to_path_buf(),
            &[(KEY_NAME, "shop")],
        ));
        assert!(!UpdateManifest.should_run(&ctx));
    }

    #[test]
    fn dry_run_leaves_manifest_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let original = r#"{"name":"old"}"#;
        std::fs::write(dir.path().join("package.json"), original).unwrap();
        let ctx = make_dry_run_context(config_with_values(
            dir.path().to_path_buf(),
            &[(KEY_NAME, "shop")],
        ));

        let result = UpdateManifest.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("package.json")).unwrap(),
            original
        );
    }
}
