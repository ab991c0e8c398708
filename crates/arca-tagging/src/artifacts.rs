//! JSON artifacts written by tagging runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;

use crate::{ClassificationMetrics, ClusteringResults, TaggingError};

/// File name of the clustering results artifact.
pub const CLUSTERING_RESULTS_FILE: &str = "clustering-results.json";

/// File name of the classification metrics artifact.
pub const CLASSIFICATION_METRICS_FILE: &str = "classification-metrics.json";

/// Writes the artifacts of one run into `output_dir`, creating it if needed.
///
/// The metrics artifact is only written when metrics are given. Returns the
/// paths written.
pub fn write_artifacts(
    output_dir: &Path,
    results: &ClusteringResults,
    metrics: Option<&ClassificationMetrics>,
) -> Result<Vec<PathBuf>, TaggingError> {
    fs::create_dir_all(output_dir).map_err(|source| TaggingError::WriteArtifact {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut written = vec![write_json(&output_dir.join(CLUSTERING_RESULTS_FILE), results)?];
    if let Some(metrics) = metrics {
        written.push(write_json(
            &output_dir.join(CLASSIFICATION_METRICS_FILE),
            metrics,
        )?);
    }
    Ok(written)
}

/// Serializes a value as pretty JSON to a file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf, TaggingError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| TaggingError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(path.to_path_buf())
}
