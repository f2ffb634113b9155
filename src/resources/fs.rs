//! Small filesystem helpers shared by the resource implementations.

use anyhow::{Context as _, Result};
use std::path::Path;

/// Create the parent directory of `path` (and any missing ancestors).
///
/// No-op when the parent already exists or `path` has no parent component.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    Ok(())
}
