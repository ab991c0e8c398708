//! Error types for tagging runs.

use std::{io, path::PathBuf};

use arca_concepts::ConceptError;
use thiserror::Error;

/// Errors raised while tagging files or writing artifacts.
#[derive(Debug, Error)]
pub enum TaggingError {
    /// An artifact could not be written.
    #[error("failed to write {path}: {source}")]
    WriteArtifact {
        /// Artifact path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An artifact could not be serialized.
    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A concept was malformed.
    #[error(transparent)]
    Concept(#[from] ConceptError),
}
