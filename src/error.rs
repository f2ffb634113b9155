//! Domain-specific error types for the config-apply engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`ResourceError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfapplyError
//! ├── Config(ConfigError)     — dotenv source, target mapping list
//! └── Resource(ResourceError) — backups, template rendering, manifest
//! ```
//!
//! The interpolation core is deliberately absent: resolution and substitution
//! never fail. Their only failure mode — an unresolvable reference — is
//! expressed structurally as residual `${...}` text in the output.

use thiserror::Error;

/// Top-level error type for the config-apply engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum ConfapplyError {
    /// Configuration-related error (source parsing, mapping list, I/O).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Resource operation error (backup, render, manifest update).
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration source file does not exist.
    #[error("Configuration source {0} not found")]
    MissingSource(String),

    /// A target mapping line could not be parsed.
    #[error("Invalid mapping in {file} at line {line}: {message}")]
    Parse {
        /// File containing the malformed line.
        file: String,
        /// 1-based line number.
        line: usize,
        /// Human-readable description of the problem.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise from resource operations (backups, rendering, manifest).
#[derive(Error, Debug)]
pub enum ResourceError {
    /// Neither the target file nor its template exists, so there is nothing
    /// to render from.
    #[error("Neither {target} nor template {template} exists")]
    MissingTemplate {
        /// Path of the target file.
        target: String,
        /// Path of the template it would be rendered from.
        template: String,
    },

    /// The package manifest could not be parsed as JSON.
    #[error("Invalid manifest {path}: {message}")]
    Manifest {
        /// Path of the manifest file.
        path: String,
        /// Parse error description.
        message: String,
    },

    /// An I/O error occurred while reading or writing a resource file.
    #[error("IO error on {path}: {source}")]
    Io {
        /// Path of the file involved.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
