//! Classification metrics against registered ground truth.

use std::fmt;

use arca_config::GroundTruth;
use serde::{Serialize, Serializer};

use crate::FileClassification;

/// A ratio rendered as a percentage with two decimals, e.g. `"83.33%"`.
///
/// An undefined ratio (zero denominator) renders as `"0.00%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentage(f64);

impl Percentage {
    /// Builds a percentage from a ratio's parts.
    fn ratio(numerator: usize, denominator: usize) -> Self {
        if denominator == 0 {
            Self(0.0)
        } else {
            Self(numerator as f64 / denominator as f64)
        }
    }

    /// Returns the ratio in `[0, 1]`.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0 * 100.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Accuracy, precision, recall and F1 of one tagging run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationMetrics {
    /// Share of files classified correctly.
    pub accuracy: Percentage,
    /// Share of positive tags that are data-access files.
    pub precision: Percentage,
    /// Share of data-access files tagged positive.
    pub recall: Percentage,
    /// Harmonic mean of precision and recall.
    pub f1: Percentage,
    /// True positives.
    #[serde(rename = "tp")]
    pub true_positives: usize,
    /// True negatives.
    #[serde(rename = "tn")]
    pub true_negatives: usize,
    /// False positives.
    #[serde(rename = "fp")]
    pub false_positives: usize,
    /// False negatives.
    #[serde(rename = "fn")]
    pub false_negatives: usize,
}

impl ClassificationMetrics {
    /// Computes metrics from raw counts.
    pub fn from_counts(tp: usize, tn: usize, fp: usize, fn_: usize) -> Self {
        let precision = Percentage::ratio(tp, tp + fp);
        let recall = Percentage::ratio(tp, tp + fn_);
        let f1 = if precision.0 + recall.0 == 0.0 {
            Percentage(0.0)
        } else {
            Percentage(2.0 * precision.0 * recall.0 / (precision.0 + recall.0))
        };
        Self {
            accuracy: Percentage::ratio(tp + tn, tp + tn + fp + fn_),
            precision,
            recall,
            f1,
            true_positives: tp,
            true_negatives: tn,
            false_positives: fp,
            false_negatives: fn_,
        }
    }
}

/// Compares classifications against the known data-access files of a project.
///
/// Ground truth paths are project-relative; a classified file matches when it
/// equals the path or ends with `/` followed by it.
pub fn evaluate(files: &[FileClassification], truth: &GroundTruth) -> ClassificationMetrics {
    let (mut tp, mut tn, mut fp, mut fn_) = (0, 0, 0, 0);
    for file in files {
        let actual = truth.data_files.iter().any(|d| matches_path(&file.file, d));
        match (file.cluster.is_positive(), actual) {
            (true, true) => tp += 1,
            (true, false) => fp += 1,
            (false, true) => fn_ += 1,
            (false, false) => tn += 1,
        }
    }
    ClassificationMetrics::from_counts(tp, tn, fp, fn_)
}

/// Checks whether a file identifier refers to a project-relative path.
fn matches_path(file: &str, relative: &str) -> bool {
    let relative = relative.trim_start_matches("./");
    file == relative
        || file
            .strip_suffix(relative)
            .is_some_and(|prefix| prefix.ends_with('/'))
}
