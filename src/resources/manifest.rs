//! Package manifest field updates from resolved configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::Value;

use super::{Resource, ResourceChange, ResourceState};
use crate::error::ResourceError;
use crate::interpolate::ResolvedConfig;

/// Configuration key feeding the manifest `name` field.
pub const KEY_NAME: &str = "APP_NAME";
/// Configuration key feeding the manifest `description` field.
pub const KEY_DESCRIPTION: &str = "APP_DESCRIPTION";
/// Configuration key feeding the manifest `license` field.
pub const KEY_LICENSE: &str = "APP_LICENSE";
/// Configuration key feeding `engines.node` (as `>=<version>`).
pub const KEY_NODE_MIN_VERSION: &str = "NODE_MIN_VERSION";

/// Top-level manifest fields taken from the configuration.
///
/// Serialized only to merge into the manifest document; absent fields are
/// skipped so unset configuration keys leave the manifest untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct ManifestFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<String>,
}

/// A package manifest (`package.json`) whose selected fields follow the
/// resolved configuration.
///
/// Only the fields with a non-empty configuration value are touched;
/// `engines.node` is additionally gated on the manifest already declaring an
/// `engines` object. Everything else in the document is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUpdate {
    path: PathBuf,
    fields: ManifestFields,
    node_min_version: Option<String>,
}

impl ManifestUpdate {
    /// Build the update for `path` from the resolved configuration.
    ///
    /// Empty configuration values count as unset.
    #[must_use]
    pub fn from_config(path: &Path, values: &ResolvedConfig) -> Self {
        let field = |key: &str| values.get_nonempty(key).map(str::to_string);
        Self {
            path: path.to_path_buf(),
            fields: ManifestFields {
                name: field(KEY_NAME),
                description: field(KEY_DESCRIPTION),
                license: field(KEY_LICENSE),
            },
            node_min_version: field(KEY_NODE_MIN_VERSION),
        }
    }

    /// Whether no manifest field is configured at all.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.fields == ManifestFields::default() && self.node_min_version.is_none()
    }

    fn read_document(&self) -> Result<Value> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| ResourceError::Io {
                path: self.path.display().to_string(),
                source,
            })?;
        let doc = serde_json::from_str(&content).map_err(|e| ResourceError::Manifest {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(doc)
    }

    /// The document as it should look after the update.
    fn desired(&self, current: &Value) -> Result<Value> {
        let mut doc = current.clone();
        let Some(obj) = doc.as_object_mut() else {
            return Ok(doc);
        };

        let patch = serde_json::to_value(&self.fields)
            .context("serializing manifest fields")?;
        if let Some(patch) = patch.as_object() {
            for (key, value) in patch {
                obj.insert(key.clone(), value.clone());
            }
        }

        if let Some(version) = &self.node_min_version
            && let Some(engines) = obj.get_mut("engines").and_then(Value::as_object_mut)
        {
            engines.insert("node".to_string(), Value::String(format!(">={version}")));
        }

        Ok(doc)
    }
}

impl Resource for ManifestUpdate {
    fn description(&self) -> String {
        self.path.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.path.exists() {
            return Ok(ResourceState::Invalid {
                reason: "manifest not present".to_string(),
            });
        }
        let current = self.read_document()?;
        if !current.is_object() {
            return Ok(ResourceState::Invalid {
                reason: "manifest is not a JSON object".to_string(),
            });
        }
        if self.desired(&current)? == current {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                detail: "fields out of date".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let current = self.read_document()?;
        let desired = self.desired(&current)?;
        let output = serde_json::to_string_pretty(&desired)
            .context("serializing manifest")?;
        std::fs::write(&self.path, output)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(ResourceChange::Applied)
    }
}
