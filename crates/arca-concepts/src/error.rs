//! Error types for concept mining.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while building concepts or loading word tables.
#[derive(Debug, Error)]
pub enum ConceptError {
    /// A required value was missing, empty or malformed.
    #[error("bad format: {what} {reason}")]
    BadFormat {
        /// The value that was rejected.
        what: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A word list or keyword table could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A reserved-keyword table is malformed.
    #[error("invalid keyword table: {message}")]
    ParseKeywords {
        /// Description of the problem.
        message: String,
    },
}

impl ConceptError {
    /// Builds a `BadFormat` error.
    pub fn bad_format(what: &'static str, reason: impl Into<String>) -> Self {
        Self::BadFormat {
            what,
            reason: reason.into(),
        }
    }
}
