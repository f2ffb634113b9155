//! Template bootstrap and target-file rendering.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::fs::ensure_parent_dir;
use super::{Resource, ResourceChange, ResourceState};
use crate::config::FileMapping;
use crate::error::ResourceError;
use crate::interpolate::{self, ResolvedConfig};

/// Outcome of [`bootstrap_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBootstrap {
    /// The template already exists; nothing to do.
    AlreadyExists,
    /// The template was created from the current target file.
    Created,
    /// Dry run: the template would be created from the current target file.
    WouldCreate,
    /// Neither the template nor the target exists; the mapping cannot be
    /// rendered.
    NoSource,
}

/// Create a mapping's template from its target file if the template does not
/// exist yet.
///
/// This is the one-time bootstrap for projects adopting templated config: an
/// existing `Dockerfile` becomes the initial `Dockerfile.template`, ready for
/// placeholders to be added.
///
/// # Errors
///
/// Returns an error if the target cannot be read or the template cannot be
/// written.
pub fn bootstrap_template(mapping: &FileMapping, dry_run: bool) -> Result<TemplateBootstrap> {
    if mapping.template.exists() {
        return Ok(TemplateBootstrap::AlreadyExists);
    }
    if !mapping.target.exists() {
        return Ok(TemplateBootstrap::NoSource);
    }
    if dry_run {
        return Ok(TemplateBootstrap::WouldCreate);
    }

    let content = std::fs::read_to_string(&mapping.target)
        .with_context(|| format!("reading {}", mapping.target.display()))?;
    ensure_parent_dir(&mapping.template)?;
    std::fs::write(&mapping.template, content)
        .with_context(|| format!("writing {}", mapping.template.display()))?;
    Ok(TemplateBootstrap::Created)
}

/// A target file rendered from its template through the substitution engine.
///
/// The substituted output is computed once at construction; checking and
/// applying then compare plain strings, which keeps the check+apply loop
/// free of repeated template work and safe to run in parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    target: PathBuf,
    rendered: String,
}

impl RenderedFile {
    /// Read the template at `template` and substitute `config` into it.
    ///
    /// When bootstrapping under `--dry-run` the caller passes the target
    /// path as `template`, since that is exactly the content the template
    /// would be created with.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] if the template cannot be read.
    pub fn load(
        target: &Path,
        template: &Path,
        config: &ResolvedConfig,
    ) -> Result<Self, ResourceError> {
        let document =
            std::fs::read_to_string(template).map_err(|source| ResourceError::Io {
                path: template.display().to_string(),
                source,
            })?;
        Ok(Self {
            target: target.to_path_buf(),
            rendered: interpolate::substitute(&document, config),
        })
    }

    /// The substituted output that will be written to the target.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl Resource for RenderedFile {
    fn description(&self) -> String {
        self.target.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.target.exists() {
            return Ok(ResourceState::Missing);
        }
        if self.target.is_dir() {
            return Ok(ResourceState::Invalid {
                reason: "target is a directory".to_string(),
            });
        }
        let current = std::fs::read_to_string(&self.target)
            .with_context(|| format!("reading {}", self.target.display()))?;
        if current == self.rendered {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                detail: "content differs".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        ensure_parent_dir(&self.target)?;
        std::fs::write(&self.target, &self.rendered)
            .with_context(|| format!("writing {}", self.target.display()))?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ConfigMap;

    fn config(pairs: &[(&str, &str)]) -> ResolvedConfig {
        interpolate::resolve(
            &pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<ConfigMap>(),
        )
    }

    #[test]
    fn bootstrap_creates_template_from_target() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = FileMapping::new("Dockerfile", "Dockerfile.template")
            .rooted_at(dir.path());
        std::fs::write(&mapping.target, "FROM node:20\n").unwrap();

        let outcome = bootstrap_template(&mapping, false).unwrap();
        assert_eq!(outcome, TemplateBootstrap::Created);
        assert_eq!(
            std::fs::read_to_string(&mapping.template).unwrap(),
            "FROM node:20\n"
        );
    }

    #[test]
    fn bootstrap_leaves_existing_template_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = FileMapping::new("a", "a.tpl").rooted_at(dir.path());
        std::fs::write(&mapping.target, "target").unwrap();
        std::fs::write(&mapping.template, "template").unwrap();

        let outcome = bootstrap_template(&mapping, false).unwrap();
        assert_eq!(outcome, TemplateBootstrap::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&mapping.template).unwrap(), "template");
    }

    #[test]
    fn bootstrap_without_any_source_reports_no_source() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = FileMapping::new("a", "a.tpl").rooted_at(dir.path());
        assert_eq!(
            bootstrap_template(&mapping, false).unwrap(),
            TemplateBootstrap::NoSource
        );
    }

    #[test]
    fn bootstrap_dry_run_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = FileMapping::new("a", "a.tpl").rooted_at(dir.path());
        std::fs::write(&mapping.target, "target").unwrap();

        let outcome = bootstrap_template(&mapping, true).unwrap();
        assert_eq!(outcome, TemplateBootstrap::WouldCreate);
        assert!(!mapping.template.exists());
    }

    #[test]
    fn bootstrap_creates_nested_template_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = FileMapping::new("deploy.yml", "templates/deploy.yml")
            .rooted_at(dir.path());
        std::fs::write(&mapping.target, "x").unwrap();

        bootstrap_template(&mapping, false).unwrap();
        assert!(mapping.template.exists());
    }

    #[test]
    fn load_substitutes_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        std::fs::write(&template, "port=${PORT:-8080}\n").unwrap();

        let rendered = RenderedFile::load(
            &dir.path().join("a"),
            &template,
            &config(&[("PORT", "9090")]),
        )
        .unwrap();
        assert_eq!(rendered.rendered(), "port=9090\n");
    }

    #[test]
    fn load_missing_template_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RenderedFile::load(
            &dir.path().join("a"),
            &dir.path().join("absent.tpl"),
            &config(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, ResourceError::Io { .. }));
    }

    #[test]
    fn missing_target_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        std::fs::write(&template, "x").unwrap();
        let rendered =
            RenderedFile::load(&dir.path().join("a"), &template, &config(&[])).unwrap();
        assert_eq!(rendered.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn matching_target_is_correct() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        let target = dir.path().join("a");
        std::fs::write(&template, "v=${X:-0}\n").unwrap();
        std::fs::write(&target, "v=1\n").unwrap();

        let rendered = RenderedFile::load(&target, &template, &config(&[("X", "1")])).unwrap();
        assert_eq!(rendered.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn differing_target_is_incorrect() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        let target = dir.path().join("a");
        std::fs::write(&template, "v=${X:-0}\n").unwrap();
        std::fs::write(&target, "v=stale\n").unwrap();

        let rendered = RenderedFile::load(&target, &template, &config(&[("X", "1")])).unwrap();
        assert!(matches!(
            rendered.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }

    #[test]
    fn directory_target_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        let target = dir.path().join("subdir");
        std::fs::write(&template, "x").unwrap();
        std::fs::create_dir(&target).unwrap();

        let rendered = RenderedFile::load(&target, &template, &config(&[])).unwrap();
        assert!(matches!(
            rendered.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn apply_writes_rendered_content() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("a.tpl");
        let target = dir.path().join("out/a");
        std::fs::write(&template, "name=${NAME:-anon}\n").unwrap();

        let rendered =
            RenderedFile::load(&target, &template, &config(&[("NAME", "svc")])).unwrap();
        assert_eq!(rendered.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "name=svc\n");
    }
}
