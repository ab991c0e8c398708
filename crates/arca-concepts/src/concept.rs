//! Concept value types.

use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::ConceptError;

/// A mined, normalized natural-language term.
///
/// Concepts are lowercase and may contain several space-separated words. Two
/// concepts are equal iff their strings are equal. Construction rejects empty
/// or whitespace-only input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Concept(String);

impl Concept {
    /// Creates a concept, rejecting empty input.
    pub fn new(name: impl Into<String>) -> Result<Self, ConceptError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConceptError::bad_format("concept", "must not be empty"));
        }
        Ok(Self(name))
    }

    /// Returns the concept text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the individual words of the concept.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl TryFrom<String> for Concept {
    type Error = ConceptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Concept {
    type Error = ConceptError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Concept> for String {
    fn from(concept: Concept) -> Self {
        concept.0
    }
}

impl Deref for Concept {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Concept {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How often a concept appears in one file, and where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptOccurrence {
    /// Number of times the concept appears.
    pub number_of_occurrence: usize,
    /// 1-based line numbers of the occurrences, in ascending order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<usize>>,
}

impl ConceptOccurrence {
    /// Creates an occurrence record without line tracking.
    pub fn counted(number_of_occurrence: usize) -> Self {
        Self {
            number_of_occurrence,
            lines: None,
        }
    }

    /// Records one more occurrence, optionally on a given line.
    pub fn record(&mut self, line: Option<usize>) {
        self.number_of_occurrence += 1;
        if let Some(line) = line {
            self.lines.get_or_insert_with(Vec::new).push(line);
        }
    }
}

/// A concept name paired with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredConcept {
    /// The concept text.
    pub name: String,
    /// Relevance score; higher is more relevant.
    pub relevancy: f64,
}

impl ScoredConcept {
    /// Creates a scored concept.
    pub fn new(name: impl Into<String>, relevancy: f64) -> Self {
        Self {
            name: name.into(),
            relevancy,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Concept::new(""),
            Err(ConceptError::BadFormat { .. })
        ));
        assert!(Concept::new("   ").is_err());
    }

    #[test]
    fn identity_is_string_equality() {
        let a = Concept::new("order count").unwrap();
        let b = Concept::try_from("order count").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, Concept::new("order").unwrap());
        assert_eq!(a.words().collect::<Vec<_>>(), vec!["order", "count"]);
    }

    #[test]
    fn serde_validates() {
        let c: Concept = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(c.as_str(), "movie");
        assert!(serde_json::from_str::<Concept>("\"\"").is_err());
    }

    #[test]
    fn occurrence_serializes_camel_case() {
        let mut occ = ConceptOccurrence::default();
        occ.record(Some(3));
        occ.record(Some(7));
        let json = serde_json::to_string(&occ).unwrap();
        assert_eq!(json, r#"{"numberOfOccurrence":2,"lines":[3,7]}"#);

        let untracked = serde_json::to_string(&ConceptOccurrence::counted(4)).unwrap();
        assert_eq!(untracked, r#"{"numberOfOccurrence":4}"#);
    }
}
