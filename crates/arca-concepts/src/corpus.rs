//! Multi-document TF-IDF corpus.
//!
//! Scoring happens in two phases. A [`CorpusBuilder`] collects every document
//! of a batch in a fixed order, then [`CorpusBuilder::build`] freezes them into
//! an immutable [`Corpus`]. Scores are read only from the frozen corpus, so no
//! score can observe a half-built batch.

use std::collections::{HashMap, HashSet};

use arca_config::ScoringSettings;

use crate::{
    ConceptError, ScoredConcept,
    lemma::lemmatize,
    rank::{IdfProvider, inverse_document_frequency, sort_descending, tf_idf},
};

/// Collects documents before scoring.
#[derive(Debug, Clone, Default)]
pub struct CorpusBuilder {
    /// Documents added so far.
    documents: Vec<Document>,
}

impl CorpusBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document made of concepts and returns its index.
    ///
    /// Each concept counts once per appearance; its words feed the term
    /// frequencies.
    pub fn add_document<I, S>(&mut self, concepts: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document = Document::default();
        for concept in concepts {
            document.push(concept.as_ref());
        }
        self.documents.push(document);
        self.documents.len() - 1
    }

    /// Adds a free-text document and returns its index.
    ///
    /// The text is split into lowercase, lemmatized words.
    pub fn add_text(&mut self, text: &str) -> usize {
        let words = text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| lemmatize(&w.to_lowercase()));
        self.add_document(words)
    }

    /// Returns the number of documents added.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no documents were added.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Freezes the documents into a corpus.
    pub fn build(self) -> Corpus {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for document in &self.documents {
            for word in document.term_counts.keys() {
                *document_frequency.entry(word.clone()).or_insert(0) += 1;
            }
        }
        Corpus {
            documents: self.documents,
            document_frequency,
        }
    }
}

/// One document's statistics.
#[derive(Debug, Clone, Default)]
struct Document {
    /// Word counts.
    term_counts: HashMap<String, usize>,
    /// Distinct concepts in first-appearance order.
    concepts: Vec<String>,
    /// Membership set for `concepts`.
    seen: HashSet<String>,
}

impl Document {
    /// Records one appearance of a concept.
    fn push(&mut self, concept: &str) {
        let concept = concept.trim();
        if concept.is_empty() {
            return;
        }
        for word in concept.split_whitespace() {
            *self.term_counts.entry(word.to_string()).or_insert(0) += 1;
        }
        if self.seen.insert(concept.to_string()) {
            self.concepts.push(concept.to_string());
        }
    }
}

/// An immutable snapshot of a batch of documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Documents in insertion order.
    documents: Vec<Document>,
    /// Number of documents containing each word.
    document_frequency: HashMap<String, usize>,
}

impl IdfProvider for Corpus {
    fn idf(&self, word: &str) -> Option<f64> {
        let df = *self.document_frequency.get(word)?;
        Some(inverse_document_frequency(self.documents.len(), df))
    }
}

impl Corpus {
    /// Returns the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns how often a word occurs in a document.
    pub fn term_frequency(&self, doc: usize, word: &str) -> usize {
        self.documents
            .get(doc)
            .and_then(|d| d.term_counts.get(word))
            .copied()
            .unwrap_or(0)
    }

    /// Scores a concept against one document, or `None` if the index is out of range.
    pub fn tf_idf(&self, doc: usize, concept: &str) -> Option<f64> {
        let document = self.documents.get(doc)?;
        let tf = |word: &str| document.term_counts.get(word).copied().unwrap_or(0);
        Some(tf_idf(self, tf, concept))
    }

    /// Scores every distinct concept of a document, most relevant first.
    pub fn score_document(&self, doc: usize) -> Result<Vec<ScoredConcept>, ConceptError> {
        let document = self.documents.get(doc).ok_or_else(|| {
            ConceptError::bad_format(
                "document index",
                format!("{doc} is out of range for a corpus of {}", self.len()),
            )
        })?;

        let mut scored: Vec<ScoredConcept> = document
            .concepts
            .iter()
            .filter_map(|c| Some(ScoredConcept::new(c.as_str(), self.tf_idf(doc, c)?)))
            .collect();
        sort_descending(&mut scored);
        Ok(scored)
    }

    /// Scores a document and keeps only significant concepts.
    ///
    /// Drops scores at or below the significance threshold and rounds the rest
    /// to the configured number of decimal places.
    pub fn score_significant(
        &self,
        doc: usize,
        settings: &ScoringSettings,
    ) -> Result<Vec<ScoredConcept>, ConceptError> {
        Ok(self
            .score_document(doc)?
            .into_iter()
            .filter(|s| s.relevancy > settings.significance_threshold)
            .map(|s| {
                let relevancy = round_to(s.relevancy, settings.precision);
                ScoredConcept { relevancy, ..s }
            })
            .collect())
    }
}

/// Rounds to a number of decimal places.
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(15) as i32);
    (value * factor).round() / factor
}
