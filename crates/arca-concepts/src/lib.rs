//! Concept mining for architecture recovery.
//!
//! Turns identifiers and source text into normalized domain concepts, filters
//! out noise, and ranks concepts by TF-IDF relevance:
//!
//! - [`normalize`] splits identifiers and lemmatizes their words
//! - [`NoiseFilter`] removes short words, stop words, reserved keywords and
//!   non-dictionary garbage
//! - [`sort_by_tf_idf`] ranks concepts against a reference document, and
//!   [`Corpus`] scores a batch of documents against each other
//! - [`profile_file`] and [`rank_profiles`] build per-file concept profiles
//! - [`aggregate`] merges profiles into a repository-wide ranking

#![warn(missing_docs)]

mod aggregate;
mod concept;
mod corpus;
mod dictionary;
mod error;
mod extract;
mod filter;
mod keywords;
mod lemma;
pub mod normalize;
mod profile;
mod rank;
mod stopwords;

pub use aggregate::{aggregate, top_concepts};
pub use concept::{Concept, ConceptOccurrence, ScoredConcept};
pub use corpus::{Corpus, CorpusBuilder};
pub use dictionary::Dictionary;
pub use error::ConceptError;
pub use extract::{ConceptExtractor, extension_of, extract_concepts_from_file};
pub use filter::NoiseFilter;
pub use keywords::{KeywordMatcher, KeywordTable, ReservedKeywords};
pub use lemma::{lemmatize, lemmatize_phrase};
pub use normalize::normalize;
pub use profile::{Cluster, FileAnalysisResult, count_lines_of_code, profile_file, rank_profiles};
pub use rank::{IdfProvider, inverse_document_frequency, score, score_all, sort_by_tf_idf};
pub use stopwords::Stopwords;
