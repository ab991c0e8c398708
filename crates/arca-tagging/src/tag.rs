//! Tagging runs.
//!
//! The three modes differ only in where the data vocabulary comes from: the
//! repository's own top-ranked concepts, a caller-supplied list, or a
//! caller-supplied list plus anchor terms. The classification rule is the
//! same in every mode.

use std::{collections::HashSet, fmt};

use arca_concepts::{Cluster, Concept, ConceptError, FileAnalysisResult, top_concepts};
use arca_config::TaggingSettings;
use log::info;
use serde::Serialize;

use crate::{DbDetails, DensityClassifier};

/// How the data vocabulary of a run was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaggingMode {
    /// Top-N repository-wide concepts.
    FullyAutomated,
    /// Caller-supplied concepts.
    SemiAutomated,
    /// Caller-supplied concepts and anchor terms.
    SemiAutomatedWithAnchors,
}

impl fmt::Display for TaggingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullyAutomated => write!(f, "fully-automated"),
            Self::SemiAutomated => write!(f, "semi-automated"),
            Self::SemiAutomatedWithAnchors => write!(f, "semi-automated-with-anchors"),
        }
    }
}

/// The outcome for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileClassification {
    /// File identifier.
    pub file: String,
    /// Data-concept occurrences per line of code.
    pub density: f64,
    /// Assigned cluster.
    pub cluster: Cluster,
    /// Data concepts found in the file.
    pub concepts: Vec<String>,
}

/// Every classification of one run, with the vocabulary that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResults {
    /// Project the run belongs to.
    pub project: String,
    /// Vocabulary selection mode.
    pub mode: TaggingMode,
    /// Density threshold used.
    pub threshold_density: f64,
    /// Vocabulary used.
    pub details: DbDetails,
    /// Per-file outcomes, in input order.
    pub files: Vec<FileClassification>,
}

impl ClusteringResults {
    /// Returns the positively tagged files.
    pub fn positives(&self) -> impl Iterator<Item = &FileClassification> {
        self.files.iter().filter(|f| f.cluster.is_positive())
    }
}

/// Runs tagging over profiled files.
#[derive(Debug, Clone)]
pub struct Tagger {
    /// Classifier shared by all modes.
    classifier: DensityClassifier,
    /// Vocabulary size in fully automated mode.
    top_n: usize,
}

impl Tagger {
    /// Creates a tagger.
    pub fn new(classifier: DensityClassifier, top_n: usize) -> Self {
        Self { classifier, top_n }
    }

    /// Creates a tagger from tagging settings.
    pub fn from_settings(settings: &TaggingSettings) -> Self {
        Self::new(DensityClassifier::from_settings(settings), settings.top_n)
    }

    /// Tags files using the top-N aggregated concepts as vocabulary.
    ///
    /// The results must already be ranked.
    pub fn fully_automated(
        &self,
        project: &str,
        results: &mut [FileAnalysisResult],
    ) -> Result<ClusteringResults, ConceptError> {
        let best = top_concepts(results, self.top_n)?;
        let details = DbDetails::new(best, None);
        Ok(self.run(project, TaggingMode::FullyAutomated, results, details))
    }

    /// Tags files using a caller-supplied vocabulary, with or without anchors.
    pub fn semi_automated(
        &self,
        project: &str,
        results: &mut [FileAnalysisResult],
        details: DbDetails,
    ) -> ClusteringResults {
        let mode = if details.anchor_points.is_some() {
            TaggingMode::SemiAutomatedWithAnchors
        } else {
            TaggingMode::SemiAutomated
        };
        self.run(project, mode, results, details)
    }

    /// Classifies every file and records the cluster on each result.
    fn run(
        &self,
        project: &str,
        mode: TaggingMode,
        results: &mut [FileAnalysisResult],
        details: DbDetails,
    ) -> ClusteringResults {
        let vocabulary: HashSet<&str> = details.data_concepts.iter().map(Concept::as_str).collect();

        let files: Vec<FileClassification> = results
            .iter_mut()
            .map(|result| {
                let cluster = self.classifier.classify(result, &details);
                result.cluster = Some(cluster);
                FileClassification {
                    file: result.file.clone(),
                    density: self.classifier.density(result, &details),
                    cluster,
                    concepts: result
                        .tokens
                        .keys()
                        .filter(|c| vocabulary.contains(c.as_str()))
                        .map(|c| c.as_str().to_string())
                        .collect(),
                }
            })
            .collect();

        let positives = files.iter().filter(|f| f.cluster.is_positive()).count();
        info!(
            "{mode} tagging of {project}: {positives} of {} files data-access-related",
            files.len()
        );

        ClusteringResults {
            project: project.to_string(),
            mode,
            threshold_density: self.classifier.threshold(),
            details,
            files,
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use arca_concepts::{ConceptOccurrence, ScoredConcept};

    use super::*;

    fn file(name: &str, tokens: &[(&str, usize)], lines: usize) -> FileAnalysisResult {
        let tokens: BTreeMap<Concept, ConceptOccurrence> = tokens
            .iter()
            .map(|(c, n)| (Concept::new(*c).unwrap(), ConceptOccurrence::counted(*n)))
            .collect();
        let mut result = FileAnalysisResult::new("repo", name, tokens, lines);
        result.ranked = result
            .tokens
            .iter()
            .map(|(c, o)| ScoredConcept::new(c.as_str(), o.number_of_occurrence as f64))
            .collect();
        result
    }

    fn sample() -> Vec<FileAnalysisResult> {
        vec![
            file("db/movies.js", &[("movie", 6), ("actor", 2), ("id", 1)], 10),
            file("app.js", &[("server", 1), ("movie", 1)], 20),
            file("empty.js", &[], 0),
        ]
    }

    #[test]
    fn fully_automated_uses_top_concepts() {
        let tagger = Tagger::new(DensityClassifier::new(0.2), 1);
        let mut results = sample();
        let run = tagger.fully_automated("movies", &mut results).unwrap();

        assert_eq!(run.mode, TaggingMode::FullyAutomated);
        assert_eq!(run.details.data_concepts, vec![Concept::new("movie").unwrap()]);
        assert_eq!(run.files[0].cluster, Cluster::DataAccess);
        assert_eq!(run.files[0].concepts, vec!["movie"]);
        assert_eq!(run.files[1].cluster, Cluster::Other);
        assert_eq!(run.files[2].cluster, Cluster::Other);
        assert_eq!(results[0].cluster, Some(Cluster::DataAccess));
        assert_eq!(run.positives().count(), 1);
    }

    #[test]
    fn semi_automated_modes() {
        let tagger = Tagger::new(DensityClassifier::new(0.2), 30);

        let mut results = sample();
        let plain = DbDetails::from_strings(&["actor", "movie"], None).unwrap();
        let run = tagger.semi_automated("movies", &mut results, plain);
        assert_eq!(run.mode, TaggingMode::SemiAutomated);
        assert!((run.files[0].density - 0.8).abs() < 1e-9);
        assert_eq!(run.files[0].cluster, Cluster::DataAccess);

        let mut results = sample();
        let anchored = DbDetails::from_strings(&["movie"], Some(&["uuid"])).unwrap();
        let run = tagger.semi_automated("movies", &mut results, anchored);
        assert_eq!(run.mode, TaggingMode::SemiAutomatedWithAnchors);
        assert_eq!(run.files[0].cluster, Cluster::Other);
    }

    #[test]
    fn results_serialize() {
        let tagger = Tagger::new(DensityClassifier::new(0.2), 30);
        let mut results = sample();
        let details = DbDetails::from_strings(&["movie"], None).unwrap();
        let run = tagger.semi_automated("movies", &mut results, details);
        let json = serde_json::to_value(&run).unwrap();

        assert_eq!(json["mode"], "semi-automated");
        assert_eq!(json["files"][0]["cluster"], 1);
        assert_eq!(json["details"]["data_concepts"][0], "movie");
    }
}
