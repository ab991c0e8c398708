//! Repository-wide concept aggregation.

use std::collections::BTreeMap;

use crate::{Concept, ConceptError, FileAnalysisResult, ScoredConcept, rank::sort_descending};

/// Sums each concept's relevance over all ranked profiles.
///
/// Concepts found in more files accumulate more score. The result is sorted by
/// total score, highest first, with ties in alphabetical order.
pub fn aggregate(results: &[FileAnalysisResult]) -> Vec<ScoredConcept> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for result in results {
        for scored in &result.ranked {
            *totals.entry(scored.name.as_str()).or_insert(0.0) += scored.relevancy;
        }
    }

    let mut aggregated: Vec<ScoredConcept> = totals
        .into_iter()
        .map(|(name, total)| ScoredConcept::new(name, total))
        .collect();
    sort_descending(&mut aggregated);
    aggregated
}

/// Returns the `n` best repository-wide concepts.
pub fn top_concepts(
    results: &[FileAnalysisResult],
    n: usize,
) -> Result<Vec<Concept>, ConceptError> {
    aggregate(results)
        .into_iter()
        .take(n)
        .map(|s| Concept::new(s.name))
        .collect()
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use super::*;

    fn ranked(file: &str, scores: &[(&str, f64)]) -> FileAnalysisResult {
        let mut result = FileAnalysisResult::new("repo", file, BTreeMap::new(), 10);
        result.ranked = scores
            .iter()
            .map(|(name, score)| ScoredConcept::new(*name, *score))
            .collect();
        result
    }

    #[test]
    fn sums_across_files() {
        let results = vec![
            ranked("a.js", &[("movie", 2.0), ("actor", 1.5)]),
            ranked("b.js", &[("movie", 1.5), ("cart", 3.0)]),
        ];
        let aggregated = aggregate(&results);

        assert_eq!(aggregated[0], ScoredConcept::new("movie", 3.5));
        assert_eq!(aggregated[1], ScoredConcept::new("cart", 3.0));
        assert_eq!(aggregated[2], ScoredConcept::new("actor", 1.5));
    }

    #[test]
    fn ties_are_alphabetical() {
        let results = vec![ranked("a.js", &[("zebra", 1.5), ("apple", 1.5)])];
        let names: Vec<_> = aggregate(&results).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["apple", "zebra"]);
    }

    #[test]
    fn top_n() {
        let results = vec![ranked("a.js", &[("movie", 3.0), ("actor", 2.0), ("genre", 1.2)])];
        let top = top_concepts(&results, 2).unwrap();
        assert_eq!(top, vec![Concept::new("movie").unwrap(), Concept::new("actor").unwrap()]);
        assert!(top_concepts(&results, 0).unwrap().is_empty());
        assert!(aggregate(&[]).is_empty());
    }
}
