// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed test project and a fluent builder
// so each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::Path;

use confapply::cli::GlobalOpts;

/// An isolated test project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped (via the underlying
/// [`tempfile::TempDir`]).
pub struct TestProject {
    /// Temporary directory containing the test project.
    pub root: tempfile::TempDir,
}

impl TestProject {
    /// Create a new empty project.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        Self { root }
    }

    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Write the `.env.config` configuration source.
    pub fn with_source(self, content: &str) -> Self {
        self.with_file(".env.config", content)
    }

    /// Write the `targets.conf` mapping list.
    pub fn with_targets(self, content: &str) -> Self {
        self.with_file("targets.conf", content)
    }

    /// Write `content` to `name` in the project, creating parent directories.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.root.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(path, content).expect("write project file");
        self
    }

    /// Read `name` from the project.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.root.path().join(name)).expect("read project file")
    }

    /// Whether `name` exists in the project.
    pub fn exists(&self, name: &str) -> bool {
        self.root.path().join(name).exists()
    }

    /// Global CLI options rooted at this project.
    pub fn global_opts(&self) -> GlobalOpts {
        GlobalOpts {
            config: None,
            targets: None,
            root: Some(self.root.path().to_path_buf()),
            dry_run: false,
            parallel: true,
        }
    }
}
