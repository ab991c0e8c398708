//! Concept ranking against a reference document.
//!
//! Relevance is TF-IDF: for each word of a concept, the word's frequency in the
//! reference document times its inverse document frequency, summed over the
//! words. A multi-word concept therefore outranks its parts when the phrase
//! occurs often.

use std::cmp::Ordering;

use crate::{CorpusBuilder, ScoredConcept};

/// Source of inverse document frequencies.
///
/// Keeps the scoring arithmetic independent of where the document statistics
/// come from.
pub trait IdfProvider {
    /// Returns the IDF of a word, or `None` if no document contains it.
    fn idf(&self, word: &str) -> Option<f64>;
}

/// Computes `1 + ln(n / (1 + df))`.
pub fn inverse_document_frequency(documents: usize, document_frequency: usize) -> f64 {
    1.0 + (documents as f64 / (1 + document_frequency) as f64).ln()
}

/// Sums `tf × idf` over the words of a concept.
///
/// Words the provider doesn't know contribute nothing.
pub fn tf_idf<P, F>(provider: &P, term_frequency: F, concept: &str) -> f64
where
    P: IdfProvider,
    F: Fn(&str) -> usize,
{
    concept
        .split_whitespace()
        .filter_map(|word| {
            let idf = provider.idf(word)?;
            Some(term_frequency(word) as f64 * idf)
        })
        .sum()
}

/// Scores one concept against a reference document.
pub fn score(concept: &str, reference: &str) -> f64 {
    let mut builder = CorpusBuilder::new();
    let doc = builder.add_text(reference);
    builder.build().tf_idf(doc, concept).unwrap_or(0.0)
}

/// Scores concepts against a reference document, most relevant first.
///
/// Ties keep their input order.
pub fn score_all<S: AsRef<str>>(concepts: &[S], reference: &str) -> Vec<ScoredConcept> {
    let mut builder = CorpusBuilder::new();
    let doc = builder.add_text(reference);
    let corpus = builder.build();

    let mut scored: Vec<ScoredConcept> = concepts
        .iter()
        .map(|c| {
            let name = c.as_ref();
            ScoredConcept::new(name, corpus.tf_idf(doc, name).unwrap_or(0.0))
        })
        .collect();
    sort_descending(&mut scored);
    scored
}

/// Sorts concepts by relevance to a reference document.
///
/// Returns the input unchanged when the reference is missing or empty, and an
/// empty list for empty input.
pub fn sort_by_tf_idf(concepts: Vec<String>, reference: Option<&str>) -> Vec<String> {
    let Some(reference) = reference.filter(|r| !r.is_empty()) else {
        return concepts;
    };
    if concepts.is_empty() {
        return concepts;
    }
    score_all(&concepts, reference)
        .into_iter()
        .map(|s| s.name)
        .collect()
}

/// Stable sort by relevancy, highest first.
pub fn sort_descending(scored: &mut [ScoredConcept]) {
    scored.sort_by(|a, b| {
        b.relevancy
            .partial_cmp(&a.relevancy)
            .unwrap_or(Ordering::Equal)
    });
}
