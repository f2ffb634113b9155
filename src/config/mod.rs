//! Configuration loading: dotenv source, resolution, and target mappings.

pub mod dotenv;
pub mod map;
pub mod targets;

pub use map::ConfigMap;
pub use targets::FileMapping;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::error::ConfigError;
use crate::interpolate::{self, ResolvedConfig};

/// Default configuration source file name, relative to the project root.
pub const DEFAULT_SOURCE: &str = ".env.config";

/// Default target mapping file name, relative to the project root.
pub const DEFAULT_TARGETS: &str = "targets.conf";

/// Default package manifest file name, relative to the project root.
pub const DEFAULT_MANIFEST: &str = "package.json";

/// All loaded configuration for an apply run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root directory.
    pub root: PathBuf,
    /// Fully resolved configuration values.
    pub values: ResolvedConfig,
    /// Target/template pairs to render, with absolute paths.
    pub mappings: Vec<FileMapping>,
    /// Path of the package manifest (may not exist).
    pub manifest: PathBuf,
}

impl Config {
    /// Load and resolve all configuration for the given project root.
    ///
    /// `source` and `targets_file` are resolved against `root` when relative.
    /// A missing source file is a hard error; a missing `targets_file` is
    /// only an error when passed explicitly — otherwise `targets.conf` is
    /// used when present and the built-in default mappings when not.
    ///
    /// # Errors
    ///
    /// Returns an error if the source file is missing or unreadable, or if
    /// the target mapping file cannot be read or parsed.
    pub fn load(root: &Path, source: &Path, targets_file: Option<&Path>) -> Result<Self> {
        let source = rooted(root, source);
        if !source.exists() {
            return Err(ConfigError::MissingSource(source.display().to_string()).into());
        }

        let raw = dotenv::parse(&source)
            .with_context(|| format!("loading {}", source.display()))?;
        let values = interpolate::resolve(&raw);

        let mappings = match targets_file {
            Some(path) => {
                let path = rooted(root, path);
                targets::parse(&path)
                    .with_context(|| format!("loading {}", path.display()))?
            }
            None => {
                let conventional = root.join(DEFAULT_TARGETS);
                if conventional.exists() {
                    targets::parse(&conventional)
                        .with_context(|| format!("loading {}", conventional.display()))?
                } else {
                    targets::default_mappings()
                }
            }
        };
        let mappings = mappings.iter().map(|m| m.rooted_at(root)).collect();

        Ok(Self {
            root: root.to_path_buf(),
            values,
            mappings,
            manifest: root.join(DEFAULT_MANIFEST),
        })
    }
}

fn rooted(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
