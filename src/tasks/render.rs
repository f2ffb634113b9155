//! Render task: substitute the resolved configuration into every target.

use anyhow::Result;

use super::{Context, ProcessOpts, Task, TaskResult, process_resources};
use crate::error::ResourceError;
use crate::resources::rendered_file::{RenderedFile, TemplateBootstrap, bootstrap_template};

/// Renders each mapped template through the substitution engine and writes
/// the result to its target file.
///
/// Templates are bootstrapped from existing targets first (one-time
/// adoption); mappings with neither a template nor a target are warned about
/// and skipped, matching the soft-failure posture of the engine itself.
/// Substitution is pure, so the per-target work runs in parallel when the
/// context allows it.
#[derive(Debug, Clone, Copy)]
pub struct RenderTemplates;

impl Task for RenderTemplates {
    fn name(&self) -> &str {
        "Render templates"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.mappings.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let mut resources = Vec::with_capacity(ctx.config.mappings.len());

        for mapping in &ctx.config.mappings {
            match bootstrap_template(mapping, ctx.dry_run)? {
                TemplateBootstrap::AlreadyExists => {
                    resources.push(RenderedFile::load(
                        &mapping.target,
                        &mapping.template,
                        &ctx.config.values,
                    )?);
                }
                TemplateBootstrap::Created => {
                    ctx.log
                        .debug(&format!("created template: {}", mapping.template.display()));
                    resources.push(RenderedFile::load(
                        &mapping.target,
                        &mapping.template,
                        &ctx.config.values,
                    )?);
                }
                TemplateBootstrap::WouldCreate => {
                    ctx.log.dry_run(&format!(
                        "would create template: {}",
                        mapping.template.display()
                    ));
                    // The template would be a copy of the target, so render
                    // from the target to preview the same output.
                    resources.push(RenderedFile::load(
                        &mapping.target,
                        &mapping.target,
                        &ctx.config.values,
                    )?);
                }
                TemplateBootstrap::NoSource => {
                    ctx.log.warn(
                        &ResourceError::MissingTemplate {
                            target: mapping.target.display().to_string(),
                            template: mapping.template.display().to_string(),
                        }
                        .to_string(),
                    );
                }
            }
        }

        if resources.is_empty() {
            return Ok(TaskResult::Skipped("no templates available".to_string()));
        }

        process_resources(ctx, resources, &ProcessOpts::apply_all("render"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::FileMapping;
    use crate::tasks::test_helpers::{
        config_with_values, empty_config, make_context, make_dry_run_context,
    };
    use std::path::Path;

    fn mapped_config(dir: &Path, pairs: &[(&str, &str)]) -> crate::config::Config {
        let mut config = config_with_values(dir.to_path_buf(), pairs);
        config.mappings = vec![FileMapping::new("app.yml", "app.template.yml").rooted_at(dir)];
        config
    }

    #[test]
    fn renders_template_into_target() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("app.template.yml"),
            "port: ${PORT:-8080}\nhost: ${HOST:-localhost}\n",
        )
        .unwrap();
        let ctx = make_context(mapped_config(dir.path(), &[("PORT", "9090")]));

        let result = RenderTemplates.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Ok));
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.yml")).unwrap(),
            "port: 9090\nhost: localhost\n"
        );
    }

    #[test]
    fn rerender_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.template.yml"), "port: ${PORT:-8080}\n").unwrap();
        let ctx = make_context(mapped_config(dir.path(), &[]));

        RenderTemplates.run(&ctx).unwrap();
        let first = std::fs::read_to_string(dir.path().join("app.yml")).unwrap();
        RenderTemplates.run(&ctx).unwrap();
        let second = std::fs::read_to_string(dir.path().join("app.yml")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bootstraps_template_from_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.yml"), "port: ${PORT:-8080}\n").unwrap();
        let ctx = make_context(mapped_config(dir.path(), &[("PORT", "3000")]));

        RenderTemplates.run(&ctx).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.template.yml")).unwrap(),
            "port: ${PORT:-8080}\n",
            "template must capture the pre-render target"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.yml")).unwrap(),
            "port: 3000\n"
        );
    }

    #[test]
    fn mapping_without_any_source_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context(mapped_config(dir.path(), &[]));

        let result = RenderTemplates.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(_)));
        assert!(!dir.path().join("app.yml").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.template.yml"), "port: ${PORT:-8080}\n").unwrap();
        let ctx = make_dry_run_context(mapped_config(dir.path(), &[("PORT", "1")]));

        let result = RenderTemplates.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert!(!dir.path().join("app.yml").exists());
    }

    #[test]
    fn dry_run_previews_bootstrap_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.yml"), "port: ${PORT:-8080}\n").unwrap();
        let ctx = make_dry_run_context(mapped_config(dir.path(), &[("PORT", "1")]));

        let result = RenderTemplates.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert!(!dir.path().join("app.template.yml").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("app.yml")).unwrap(),
            "port: ${PORT:-8080}\n",
            "dry run must not rewrite the target"
        );
    }

    #[test]
    fn creates_nested_target_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_with_values(dir.path().to_path_buf(), &[]);
        config.mappings = vec![
            FileMapping::new(".github/workflows/deploy.yml", "deploy.template.yml")
                .rooted_at(dir.path()),
        ];
        std::fs::write(dir.path().join("deploy.template.yml"), "on: push\n").unwrap();
        let ctx = make_context(config);

        RenderTemplates.run(&ctx).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".github/workflows/deploy.yml")).unwrap(),
            "on: push\n"
        );
    }

    #[test]
    fn not_applicable_without_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context(empty_config(dir.path().to_path_buf()));
        assert!(!RenderTemplates.should_run(&ctx));
    }
}
