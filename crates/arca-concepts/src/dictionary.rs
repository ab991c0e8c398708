//! Common-word dictionary for the noise filter.
//!
//! A concept survives the dictionary filter when at least one of its words is
//! an ordinary English word. This discards hashes, abbreviations and other
//! identifiers made up entirely of non-words.

use std::{collections::HashSet, fs, path::Path};

use crate::{ConceptError, lemma::lemmatize};

/// Built-in newline-separated word list.
const BUILTIN_WORDS: &str = include_str!("../data/words.txt");

/// A set of known words, stored lowercase and lemmatized.
#[derive(Debug, Clone)]
pub struct Dictionary {
    /// Known words.
    words: HashSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Dictionary {
    /// Returns the built-in dictionary.
    pub fn builtin() -> Self {
        Self::from_word_list(BUILTIN_WORDS)
    }

    /// Builds a dictionary from newline-separated words. Blank lines and lines
    /// starting with `#` are ignored.
    pub fn from_word_list(list: &str) -> Self {
        let words = list
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| lemmatize(&l.to_lowercase()))
            .collect();
        Self { words }
    }

    /// Loads a word list from disk.
    pub fn load(path: &Path) -> Result<Self, ConceptError> {
        let contents = fs::read_to_string(path).map_err(|source| ConceptError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_word_list(&contents))
    }

    /// Checks whether a single word is known.
    pub fn is_word(&self, word: &str) -> bool {
        self.words.contains(word) || self.words.contains(&lemmatize(&word.to_lowercase()))
    }

    /// Checks whether at least one word of a concept is known.
    pub fn accepts(&self, concept: &str) -> bool {
        concept.split_whitespace().any(|w| self.is_word(w))
    }

    /// Returns the number of known words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
