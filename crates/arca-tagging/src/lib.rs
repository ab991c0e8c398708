//! File tagging for arca.
//!
//! Classifies profiled source files as data-access-related by the density of
//! data concepts per line of code, then writes the outcome as JSON artifacts.
//! When ground truth is registered for the project, classification metrics are
//! written alongside.

#![warn(missing_docs)]

mod artifacts;
mod classify;
mod error;
mod metrics;
mod tag;

use std::path::PathBuf;

pub use arca_concepts::Cluster;
use arca_concepts::FileAnalysisResult;
use arca_config::{GroundTruth, TaggingSettings};
pub use artifacts::{CLASSIFICATION_METRICS_FILE, CLUSTERING_RESULTS_FILE, write_artifacts};
pub use classify::{DbDetails, DensityClassifier};
pub use error::TaggingError;
pub use metrics::{ClassificationMetrics, Percentage, evaluate};
pub use tag::{ClusteringResults, FileClassification, Tagger, TaggingMode};

/// Everything a tagging run produced.
#[derive(Debug, Clone)]
pub struct TaggingReport {
    /// Per-file outcomes.
    pub results: ClusteringResults,
    /// Metrics, when ground truth was available.
    pub metrics: Option<ClassificationMetrics>,
    /// Artifact files written.
    pub artifacts: Vec<PathBuf>,
}

/// Tags ranked files using the repository's top concepts and writes artifacts.
pub fn tag_files_fully_automated(
    project: &str,
    results: &mut [FileAnalysisResult],
    settings: &TaggingSettings,
    ground_truth: Option<&GroundTruth>,
) -> Result<TaggingReport, TaggingError> {
    let run = Tagger::from_settings(settings).fully_automated(project, results)?;
    finish(run, settings, ground_truth)
}

/// Tags files using a caller-supplied vocabulary and writes artifacts.
pub fn tag_files_semi_automated(
    project: &str,
    results: &mut [FileAnalysisResult],
    details: DbDetails,
    settings: &TaggingSettings,
    ground_truth: Option<&GroundTruth>,
) -> Result<TaggingReport, TaggingError> {
    let run = Tagger::from_settings(settings).semi_automated(project, results, details);
    finish(run, settings, ground_truth)
}

/// Evaluates a run against ground truth and writes its artifacts.
fn finish(
    results: ClusteringResults,
    settings: &TaggingSettings,
    ground_truth: Option<&GroundTruth>,
) -> Result<TaggingReport, TaggingError> {
    let metrics = ground_truth.map(|truth| evaluate(&results.files, truth));
    let artifacts = write_artifacts(&settings.output_dir, &results, metrics.as_ref())?;
    Ok(TaggingReport {
        results,
        metrics,
        artifacts,
    })
}
