//! Target/template file mappings.
//!
//! The render pipeline is driven by an explicit list of `(target, template)`
//! pairs passed through [`crate::config::Config`] — never by global state.
//! The list comes from a `targets.conf` file when one exists, and falls back
//! to the conventional deployment trio otherwise.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// A target file and the template it is rendered from.
///
/// Paths are interpreted relative to the project root until the aggregate
/// config joins them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMapping {
    /// File that receives the substituted output.
    pub target: PathBuf,
    /// Template document with `${KEY:-DEFAULT}` placeholders.
    pub template: PathBuf,
}

impl FileMapping {
    /// Create a mapping from a target path and its template path.
    pub fn new(target: impl Into<PathBuf>, template: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            template: template.into(),
        }
    }

    /// This mapping with both paths joined onto `root`.
    #[must_use]
    pub fn rooted_at(&self, root: &Path) -> Self {
        Self {
            target: root.join(&self.target),
            template: root.join(&self.template),
        }
    }
}

/// The conventional set of deployment files updated when no `targets.conf`
/// overrides it.
#[must_use]
pub fn default_mappings() -> Vec<FileMapping> {
    vec![
        FileMapping::new("Dockerfile", "Dockerfile.template"),
        FileMapping::new("docker-compose.yml", "docker-compose.template.yml"),
        FileMapping::new(
            ".github/workflows/deploy.yml",
            ".github/workflows/deploy.template.yml",
        ),
    ]
}

/// Parse a `targets.conf` file into mappings.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read, or
/// [`ConfigError::Parse`] for a malformed line.
pub fn parse(path: &Path) -> Result<Vec<FileMapping>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_from_str(&content, &path.display().to_string())
}

/// Parse `target = template` mappings from a string.
///
/// Format:
/// ```text
/// # comment
/// Dockerfile = Dockerfile.template
/// docker-compose.yml = docker-compose.template.yml
/// ```
///
/// Unlike the dotenv source — where unknown lines are someone else's
/// convention and get skipped — a malformed mapping line here would silently
/// render the wrong file, so it is a hard error.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if a non-comment line lacks an `=` or has
/// an empty side.
pub fn parse_from_str(content: &str, file: &str) -> Result<Vec<FileMapping>, ConfigError> {
    let mut mappings = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((target, template)) = trimmed.split_once('=') else {
            return Err(ConfigError::Parse {
                file: file.to_string(),
                line: line_num + 1,
                message: "expected 'target = template'".to_string(),
            });
        };

        let target = target.trim();
        let template = template.trim();
        if target.is_empty() || template.is_empty() {
            return Err(ConfigError::Parse {
                file: file.to_string(),
                line: line_num + 1,
                message: "target and template must both be non-empty".to_string(),
            });
        }

        mappings.push(FileMapping::new(target, template));
    }

    Ok(mappings)
}
