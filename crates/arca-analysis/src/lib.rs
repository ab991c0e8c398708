//! Project analysis for arca.
//!
//! Opens a project directory, discovers its sources, profiles them through one
//! of two analyzers and drives tagging and tree assembly:
//!
//! - [`CodeQlAnalyzer`] reads the CSV written by the external analysis engine
//!   and profiles each file from the call sites detected in it.
//! - [`NlpAnalyzer`] profiles each file from its full text.
//!
//! A one-line marker file at the project root, when present, names the
//! canonical repository URL used in place of the local root in every produced
//! identifier.

#![warn(missing_docs)]

mod alerts;
mod analyzer;
mod codeql;
mod discovery;
mod error;
mod nlp;
mod pipeline;
mod project;
mod record;

pub use alerts::{ALERT_COLUMNS, Alert, AlertMessage, parse_alerts, parse_message};
pub use analyzer::{Analyzer, AnalyzerContext, AnalyzerKind, Extraction, StaticAnalyzer};
pub use codeql::CodeQlAnalyzer;
pub use discovery::{SourceFile, discover_sources, read_source};
pub use error::AnalysisError;
pub use nlp::NlpAnalyzer;
pub use pipeline::{PipelineReport, ProjectAnalysis, Vocabulary, analyze, assemble, run, tag};
pub use project::{Project, project_name, read_marker};
pub use record::FragmentRecord;
