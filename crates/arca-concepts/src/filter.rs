//! Noise filtering for concept candidates.

use arca_config::ConceptSettings;
use log::warn;

use crate::{ConceptError, Dictionary, KeywordMatcher, KeywordTable, Stopwords};

/// Removes noise from concept candidates.
///
/// Combines a minimum-length check, stop words, the per-language reserved
/// keyword table and the common-word dictionary. Every filter only removes
/// concepts, so the output is always a subset of the input.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    /// Concepts shorter than this many characters are noise.
    min_length: usize,
    /// Stop words, when stop word removal is enabled.
    stopwords: Option<Stopwords>,
    /// Reserved-keyword table.
    keywords: KeywordTable,
    /// Dictionary, when the common-word filter is enabled.
    dictionary: Option<Dictionary>,
}

impl NoiseFilter {
    /// Builds a filter from concept settings, loading any configured word lists.
    pub fn from_settings(settings: &ConceptSettings) -> Result<Self, ConceptError> {
        let keywords = match &settings.keywords {
            Some(path) => KeywordTable::load(path)?,
            None => KeywordTable::builtin()?,
        };
        let dictionary = if settings.dictionary_filter {
            Some(match &settings.dictionary {
                Some(path) => Dictionary::load(path)?,
                None => Dictionary::builtin(),
            })
        } else {
            None
        };

        Ok(Self {
            min_length: settings.min_concept_length,
            stopwords: settings.remove_stopwords.then(Stopwords::new),
            keywords,
            dictionary,
        })
    }

    /// Builds a filter with default settings and built-in tables.
    pub fn with_defaults() -> Result<Self, ConceptError> {
        Self::from_settings(&ConceptSettings::default())
    }

    /// Drops concepts that are too short, purely numeric, or made only of stop words.
    pub fn filter_noisy_concepts(&self, concepts: Vec<String>) -> Vec<String> {
        concepts
            .into_iter()
            .filter(|c| !self.is_noise(c))
            .collect()
    }

    /// Checks a single concept against the noise rules.
    fn is_noise(&self, concept: &str) -> bool {
        if concept.chars().count() < self.min_length.max(2) {
            return true;
        }
        if concept
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace())
        {
            return true;
        }
        self.stopwords.as_ref().is_some_and(|sw| sw.covers(concept))
    }

    /// Removes concepts containing a reserved keyword for the file's extension.
    ///
    /// An extension the table doesn't cover logs a warning and returns the input
    /// unchanged.
    pub fn remove_reserved_keywords(
        &self,
        concepts: Vec<String>,
        extension: &str,
    ) -> Result<Vec<String>, ConceptError> {
        let matcher = self.reserved_matcher(extension)?;
        Ok(retain_unreserved(concepts, matcher.as_ref()))
    }

    /// Resolves the keyword matcher for an extension.
    ///
    /// Returns `None`, after logging a warning, when the extension is unknown.
    pub fn reserved_matcher(
        &self,
        extension: &str,
    ) -> Result<Option<KeywordMatcher>, ConceptError> {
        let Some(reserved) = self.keywords.resolve(extension)? else {
            warn!("no reserved keywords for extension '{extension}', skipping keyword filter");
            return Ok(None);
        };
        Ok(Some(reserved.matcher()))
    }

    /// Keeps concepts with at least one dictionary word.
    ///
    /// Returns the input unchanged when the dictionary filter is disabled.
    pub fn filter_by_dictionary(&self, concepts: Vec<String>) -> Vec<String> {
        match &self.dictionary {
            Some(dict) => concepts.into_iter().filter(|c| dict.accepts(c)).collect(),
            None => concepts,
        }
    }
}

/// Drops concepts the matcher reports as reserved; no matcher keeps everything.
pub fn retain_unreserved(concepts: Vec<String>, matcher: Option<&KeywordMatcher>) -> Vec<String> {
    match matcher {
        Some(m) => concepts.into_iter().filter(|c| !m.is_reserved(c)).collect(),
        None => concepts,
    }
}
