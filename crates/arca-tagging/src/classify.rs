//! The density classifier.
//!
//! A file is data-access-related when enough of its concept occurrences name
//! data concepts, relative to its size. Classification is a pure function of
//! the file's profile and the run's [`DbDetails`].

use std::collections::HashSet;

use arca_concepts::{Cluster, Concept, ConceptError, FileAnalysisResult};
use arca_config::TaggingSettings;
use serde::Serialize;

/// The vocabulary of one tagging run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DbDetails {
    /// Concepts considered data-related.
    pub data_concepts: Vec<Concept>,
    /// Terms of which at least one must appear in a file for a positive tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_points: Option<Vec<Concept>>,
}

impl DbDetails {
    /// Creates details from concepts and optional anchors.
    ///
    /// Anchors are stored lowercase.
    pub fn new(data_concepts: Vec<Concept>, anchor_points: Option<Vec<Concept>>) -> Self {
        let anchor_points = anchor_points.map(|anchors| {
            anchors
                .into_iter()
                .filter_map(|a| Concept::new(a.to_lowercase()).ok())
                .collect()
        });
        Self {
            data_concepts,
            anchor_points,
        }
    }

    /// Creates details from plain strings, rejecting empty entries.
    pub fn from_strings<S: AsRef<str>>(
        data_concepts: &[S],
        anchor_points: Option<&[S]>,
    ) -> Result<Self, ConceptError> {
        let concepts = to_concepts(data_concepts)?;
        let anchors = anchor_points.map(to_concepts).transpose()?;
        Ok(Self::new(concepts, anchors))
    }

    /// Reads the semi-automated vocabulary from tagging settings.
    pub fn from_settings(settings: &TaggingSettings) -> Result<Self, ConceptError> {
        Self::from_strings(&settings.data_concepts, settings.anchor_points.as_deref())
    }
}

/// Converts strings into concepts.
fn to_concepts<S: AsRef<str>>(items: &[S]) -> Result<Vec<Concept>, ConceptError> {
    items.iter().map(|s| Concept::new(s.as_ref())).collect()
}

/// Classifies files by data-concept density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityClassifier {
    /// Minimum density for a positive tag.
    threshold: f64,
}

impl DensityClassifier {
    /// Creates a classifier with the given density threshold.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Creates a classifier from tagging settings.
    pub fn from_settings(settings: &TaggingSettings) -> Self {
        Self::new(settings.threshold_density)
    }

    /// Returns the density threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Occurrences of data concepts per line of code.
    ///
    /// Returns 0 for files with no lines of code.
    pub fn density(&self, result: &FileAnalysisResult, details: &DbDetails) -> f64 {
        if result.file_number_of_lines_of_code == 0 {
            return 0.0;
        }
        let data: HashSet<&str> = details.data_concepts.iter().map(Concept::as_str).collect();
        let hits: usize = result
            .tokens
            .iter()
            .filter(|(concept, _)| data.contains(concept.as_str()))
            .map(|(_, occ)| occ.number_of_occurrence)
            .sum();
        hits as f64 / result.file_number_of_lines_of_code as f64
    }

    /// Classifies one file.
    ///
    /// Files without lines of code or concepts are never positive. With anchor
    /// points, some concept of the file must also match an anchor, ignoring
    /// case.
    pub fn classify(&self, result: &FileAnalysisResult, details: &DbDetails) -> Cluster {
        if result.file_number_of_lines_of_code == 0 || result.tokens.is_empty() {
            return Cluster::Other;
        }

        if let Some(anchors) = &details.anchor_points {
            let anchors: HashSet<&str> = anchors.iter().map(Concept::as_str).collect();
            let anchored = result
                .tokens
                .keys()
                .any(|c| anchors.contains(c.to_lowercase().as_str()));
            if !anchored {
                return Cluster::Other;
            }
        }

        Cluster::from_flag(self.density(result, details) >= self.threshold)
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use arca_concepts::{ConceptExtractor, ConceptOccurrence, profile_file};

    use super::*;

    fn file(tokens: &[(&str, usize)], lines: usize) -> FileAnalysisResult {
        let tokens: BTreeMap<Concept, ConceptOccurrence> = tokens
            .iter()
            .map(|(c, n)| (Concept::new(*c).unwrap(), ConceptOccurrence::counted(*n)))
            .collect();
        FileAnalysisResult::new("repo", "db/movies.js", tokens, lines)
    }

    fn details(concepts: &[&str], anchors: Option<&[&str]>) -> DbDetails {
        DbDetails::from_strings(concepts, anchors).unwrap()
    }

    #[test]
    fn density_at_or_above_threshold_is_positive() {
        let classifier = DensityClassifier::new(0.2);
        let movies = details(&["movie"], None);

        let dense = file(&[("movie", 4)], 10);
        assert!((classifier.density(&dense, &movies) - 0.4).abs() < 1e-9);
        assert_eq!(classifier.classify(&dense, &movies), Cluster::DataAccess);

        let sparse = file(&[("movie", 1)], 10);
        assert!((classifier.density(&sparse, &movies) - 0.1).abs() < 1e-9);
        assert_eq!(classifier.classify(&sparse, &movies), Cluster::Other);
    }

    #[test]
    fn exact_threshold_is_positive() {
        let classifier = DensityClassifier::new(0.2);
        let result = file(&[("movie", 2)], 10);
        assert_eq!(
            classifier.classify(&result, &details(&["movie"], None)),
            Cluster::DataAccess
        );
    }

    #[test]
    fn missing_anchor_blocks_positive() {
        let classifier = DensityClassifier::new(0.2);
        let result = file(&[("movie", 4)], 10);
        let anchored = details(&["movie"], Some(&["id"]));
        assert_eq!(classifier.classify(&result, &anchored), Cluster::Other);

        let with_id = file(&[("movie", 4), ("id", 1)], 10);
        assert_eq!(classifier.classify(&with_id, &anchored), Cluster::DataAccess);
    }

    #[test]
    fn extracted_profile_meets_id_anchor() {
        let source = "const order = await Order.findById(id);
order.id = orderId;
saveOrder(order, id);
const orders = listOrders(userId);
";
        let extractor = ConceptExtractor::with_defaults().unwrap();
        let result = profile_file(&extractor, "shop", "orders.js", source).unwrap();
        assert!(result.tokens.keys().any(|c| c.as_str() == "id"));

        let classifier = DensityClassifier::new(0.2);
        let anchored = details(&["order"], Some(&["id"]));
        assert_eq!(classifier.classify(&result, &anchored), Cluster::DataAccess);
    }

    #[test]
    fn anchors_ignore_case() {
        let classifier = DensityClassifier::new(0.2);
        let result = file(&[("movie", 4), ("id", 1)], 10);
        let anchored = details(&["movie"], Some(&["ID"]));
        assert_eq!(classifier.classify(&result, &anchored), Cluster::DataAccess);
    }

    #[test]
    fn zero_signal_files_are_negative() {
        let classifier = DensityClassifier::new(0.0);
        let empty = file(&[], 0);
        assert_eq!(classifier.classify(&empty, &details(&["movie"], None)), Cluster::Other);
        assert!((classifier.density(&empty, &details(&["movie"], None))).abs() < 1e-9);

        let no_lines = file(&[("movie", 3)], 0);
        assert_eq!(classifier.classify(&no_lines, &details(&["movie"], None)), Cluster::Other);
    }

    #[test]
    fn order_independent() {
        let classifier = DensityClassifier::new(0.2);
        let a = details(&["movie", "actor"], None);
        let b = details(&["actor", "movie"], None);
        let result = file(&[("actor", 1), ("movie", 1), ("user", 5)], 10);
        assert_eq!(classifier.classify(&result, &a), classifier.classify(&result, &b));
        assert!((classifier.density(&result, &a) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn empty_concept_rejected() {
        let err = DbDetails::from_strings(&["movie", ""], None).unwrap_err();
        assert!(matches!(err, ConceptError::BadFormat { .. }));
    }
}
