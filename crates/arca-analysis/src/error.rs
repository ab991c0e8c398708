//! Error types for project analysis.

use std::{io, path::PathBuf};

use arca_concepts::ConceptError;
use arca_config::ConfigError;
use arca_tagging::TaggingError;
use arca_tree::TreeError;
use thiserror::Error;

/// Errors that can occur while analyzing a project.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A row of the analysis engine's CSV output is malformed.
    #[error("bad format at row {row}: {reason}")]
    BadFormat {
        /// 1-based row number.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A delegated step or a source read failed.
    #[error("analysis of {project} failed: {message}")]
    AnalysisFail {
        /// Project being analyzed.
        project: String,
        /// Description of the failure.
        message: String,
    },

    /// A required input was not supplied.
    #[error("missing input: {what}")]
    MissingInput {
        /// The missing input.
        what: &'static str,
    },

    /// Failed to read a project file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Concept extraction failed.
    #[error(transparent)]
    Concept(#[from] ConceptError),

    /// A tree value could not be built.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Tagging failed.
    #[error(transparent)]
    Tagging(#[from] TaggingError),
}

impl AnalysisError {
    /// Creates an `AnalysisFail` for a project.
    pub fn fail(project: &str, message: impl Into<String>) -> Self {
        Self::AnalysisFail {
            project: project.to_string(),
            message: message.into(),
        }
    }
}
