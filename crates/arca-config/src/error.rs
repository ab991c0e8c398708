//! Configuration errors.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors raised while loading `.arca.toml` files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// The unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A config file is not valid TOML or has the wrong shape.
    #[error("invalid config {path}: {source}")]
    ParseToml {
        /// The offending file.
        path: PathBuf,
        /// Parser diagnostics.
        source: de::Error,
    },

    /// An `analysis.include` or `analysis.exclude` glob does not compile.
    #[error("invalid source pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The glob as written.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// A ground-truth entry cannot name a file inside the project.
    #[error("ground truth for '{project}' lists '{file}': {reason}")]
    InvalidGroundTruth {
        /// Project the entry belongs to.
        project: String,
        /// The rejected file path.
        file: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// `~` was used but no home directory is known.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
