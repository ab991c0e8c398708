//! The concept extraction pipeline.
//!
//! normalize → filter noise → remove reserved keywords → deduplicate → split
//! multi-word concepts → lemmatize → dictionary filter.

use std::{collections::BTreeMap, path::Path};

use arca_config::ConceptSettings;

use crate::{
    Concept, ConceptError, ConceptOccurrence, KeywordMatcher, NoiseFilter,
    filter::retain_unreserved,
    normalize::{lemmatize_concepts, normalize, remove_duplicates, split_multi_word_concepts},
};

/// Runs the extraction pipeline over file contents.
#[derive(Debug, Clone)]
pub struct ConceptExtractor {
    /// Noise filter shared by every stage.
    filter: NoiseFilter,
}

impl ConceptExtractor {
    /// Creates an extractor around a noise filter.
    pub fn new(filter: NoiseFilter) -> Self {
        Self { filter }
    }

    /// Creates an extractor from concept settings.
    pub fn from_settings(settings: &ConceptSettings) -> Result<Self, ConceptError> {
        Ok(Self::new(NoiseFilter::from_settings(settings)?))
    }

    /// Creates an extractor with default settings and built-in tables.
    pub fn with_defaults() -> Result<Self, ConceptError> {
        Self::from_settings(&ConceptSettings::default())
    }

    /// Returns the noise filter.
    pub fn filter(&self) -> &NoiseFilter {
        &self.filter
    }

    /// Extracts the distinct concepts of a file, in order of first appearance.
    pub fn extract(&self, file_name: &str, content: &str) -> Result<Vec<Concept>, ConceptError> {
        let matcher = self.filter.reserved_matcher(&extension_of(file_name))?;
        remove_duplicates(self.concepts_in(content, matcher.as_ref()))
            .into_iter()
            .map(Concept::new)
            .collect()
    }

    /// Counts concept occurrences line by line.
    ///
    /// Line numbers are 1-based and recorded for every occurrence.
    pub fn profile(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<BTreeMap<Concept, ConceptOccurrence>, ConceptError> {
        let matcher = self.filter.reserved_matcher(&extension_of(file_name))?;
        let mut profile: BTreeMap<Concept, ConceptOccurrence> = BTreeMap::new();

        for (idx, line) in content.lines().enumerate() {
            for concept in self.concepts_in(line, matcher.as_ref()) {
                profile
                    .entry(Concept::new(concept)?)
                    .or_default()
                    .record(Some(idx + 1));
            }
        }

        Ok(profile)
    }

    /// Runs every pipeline stage except the final deduplication.
    fn concepts_in(&self, text: &str, matcher: Option<&KeywordMatcher>) -> Vec<String> {
        let concepts = normalize(Some(text));
        let concepts = self.filter.filter_noisy_concepts(concepts);
        let concepts = retain_unreserved(concepts, matcher);
        let words = split_multi_word_concepts(&concepts);
        let words = lemmatize_concepts(&words);
        let words = self.filter.filter_noisy_concepts(words);
        self.filter.filter_by_dictionary(words)
    }
}

/// Returns a file name's extension with a leading dot, or an empty string.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Extracts concepts from a file using default settings.
pub fn extract_concepts_from_file(
    file_name: &str,
    content: &str,
) -> Result<Vec<Concept>, ConceptError> {
    ConceptExtractor::with_defaults()?.extract(file_name, content)
}

#[cfg(test)]
mod test {
    use super::*;

    const MOVIE_JS: &str = r#"
const mongoose = require('mongoose');

function getTopMovies(actorName) {
  return Movie.findOne({ actor: actorName }).populate('cast');
}

// movies by genre
const movieGenres = ['drama', 'comedy'];
"#;

    const ORDERS_JS: &str = "const order = await Order.findById(id);
order.id = orderId;
saveOrder(order, id);
const orders = listOrders(userId);
";

    fn names(concepts: &[Concept]) -> Vec<&str> {
        concepts.iter().map(Concept::as_str).collect()
    }

    #[test]
    fn extracts_domain_concepts() {
        let concepts = extract_concepts_from_file("db/movies.js", MOVIE_JS).unwrap();
        let names = names(&concepts);
        assert!(names.contains(&"movie"));
        assert!(names.contains(&"actor"));
        assert!(names.contains(&"genre"));
        assert!(!names.contains(&"function"));
        assert!(!names.contains(&"const"));
        assert!(!names.contains(&"mongoose"));
    }

    #[test]
    fn data_vocabulary_survives_stopwords() {
        let concepts = extract_concepts_from_file("orders.js", ORDERS_JS).unwrap();
        let names = names(&concepts);
        assert!(names.contains(&"order"), "{names:?}");
        assert!(names.contains(&"id"), "{names:?}");
        assert!(names.contains(&"user"), "{names:?}");
        assert!(!names.contains(&"const"));
        assert!(!names.contains(&"await"));
    }

    #[test]
    fn concepts_are_distinct() {
        let concepts = extract_concepts_from_file("movies.js", MOVIE_JS).unwrap();
        let mut sorted = names(&concepts);
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), concepts.len());
    }

    #[test]
    fn empty_content_gives_nothing() {
        assert!(extract_concepts_from_file("a.js", "").unwrap().is_empty());
    }

    #[test]
    fn unknown_extension_still_extracts() {
        let concepts = extract_concepts_from_file("notes.xyz", "movie actors").unwrap();
        assert_eq!(names(&concepts), vec!["movie", "actor"]);
    }

    #[test]
    fn profile_counts_lines() {
        let extractor = ConceptExtractor::with_defaults().unwrap();
        let content = "movie = 1\nactor movie\n\nmovies\n";
        let profile = extractor.profile("a.py", content).unwrap();

        let movie = &profile[&Concept::new("movie").unwrap()];
        assert_eq!(movie.number_of_occurrence, 3);
        assert_eq!(movie.lines, Some(vec![1, 2, 4]));
        let actor = &profile[&Concept::new("actor").unwrap()];
        assert_eq!(actor.number_of_occurrence, 1);
    }

    #[test]
    fn extension_helper() {
        assert_eq!(extension_of("src/App.TSX"), ".tsx");
        assert_eq!(extension_of("Makefile"), "");
    }
}
