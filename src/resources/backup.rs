//! On-disk backups of files about to be overwritten.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use super::{Resource, ResourceChange, ResourceState};

/// A `<path>.bak` copy of a file.
///
/// The backup lives next to its source with `.bak` appended to the full file
/// name (`docker-compose.yml` → `docker-compose.yml.bak`). A source that does
/// not exist has nothing to preserve and reports
/// [`ResourceState::Invalid`]; an existing backup with identical content is
/// [`ResourceState::Correct`] and left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBackup {
    source: PathBuf,
}

impl FileBackup {
    /// Create a backup resource for `source`.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Path of the backup file (`<source>.bak`).
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.source.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Path of the file being backed up.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl Resource for FileBackup {
    fn description(&self) -> String {
        self.source.display().to_string()
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: "source does not exist".to_string(),
            });
        }
        let backup = self.backup_path();
        if !backup.exists() {
            return Ok(ResourceState::Missing);
        }
        let source_content = std::fs::read(&self.source)
            .with_context(|| format!("reading {}", self.source.display()))?;
        let backup_content =
            std::fs::read(&backup).with_context(|| format!("reading {}", backup.display()))?;
        if source_content == backup_content {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                detail: "backup out of date".to_string(),
            })
        }
    }

    fn apply(&self) -> Result<ResourceChange> {
        let backup = self.backup_path();
        std::fs::copy(&self.source, &backup).with_context(|| {
            format!(
                "copying {} to {}",
                self.source.display(),
                backup.display()
            )
        })?;
        Ok(ResourceChange::Applied)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_bak() {
        let backup = FileBackup::new("/proj/docker-compose.yml");
        assert_eq!(
            backup.backup_path(),
            PathBuf::from("/proj/docker-compose.yml.bak")
        );
    }

    #[test]
    fn missing_source_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let backup = FileBackup::new(dir.path().join("absent.txt"));
        assert!(matches!(
            backup.current_state().unwrap(),
            ResourceState::Invalid { .. }
        ));
    }

    #[test]
    fn missing_backup_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("file.txt");
        std::fs::write(&source, "content").unwrap();
        let backup = FileBackup::new(&source);
        assert_eq!(backup.current_state().unwrap(), ResourceState::Missing);
    }

    #[test]
    fn identical_backup_is_correct() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("file.txt");
        std::fs::write(&source, "content").unwrap();
        std::fs::write(dir.path().join("file.txt.bak"), "content").unwrap();
        let backup = FileBackup::new(&source);
        assert_eq!(backup.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn stale_backup_is_incorrect() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("file.txt");
        std::fs::write(&source, "new content").unwrap();
        std::fs::write(dir.path().join("file.txt.bak"), "old content").unwrap();
        let backup = FileBackup::new(&source);
        assert!(matches!(
            backup.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }

    #[test]
    fn apply_copies_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("file.txt");
        std::fs::write(&source, "precious").unwrap();
        let backup = FileBackup::new(&source);

        assert_eq!(backup.apply().unwrap(), ResourceChange::Applied);
        let copied = std::fs::read_to_string(backup.backup_path()).unwrap();
        assert_eq!(copied, "precious");
    }

    #[test]
    fn apply_overwrites_stale_backup() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("file.txt");
        std::fs::write(&source, "new").unwrap();
        std::fs::write(dir.path().join("file.txt.bak"), "old").unwrap();
        let backup = FileBackup::new(&source);

        backup.apply().unwrap();
        assert_eq!(
            std::fs::read_to_string(backup.backup_path()).unwrap(),
            "new"
        );
    }
}
