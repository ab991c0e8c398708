//! Per-file concept profiles.

use std::{collections::BTreeMap, fmt, iter};

use arca_config::ScoringSettings;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    Concept, ConceptError, ConceptExtractor, ConceptOccurrence, CorpusBuilder, ScoredConcept,
};

/// Whether a file is data-access-related.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Cluster {
    /// Not data-access-related (`0`).
    Other,
    /// Data-access-related (`1`).
    DataAccess,
}

impl Cluster {
    /// Returns `DataAccess` when the flag is set.
    pub fn from_flag(positive: bool) -> Self {
        if positive {
            Self::DataAccess
        } else {
            Self::Other
        }
    }

    /// Returns true for `DataAccess`.
    pub fn is_positive(self) -> bool {
        self == Self::DataAccess
    }
}

impl From<Cluster> for u8 {
    fn from(cluster: Cluster) -> Self {
        match cluster {
            Cluster::Other => 0,
            Cluster::DataAccess => 1,
        }
    }
}

impl TryFrom<u8> for Cluster {
    type Error = ConceptError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Other),
            1 => Ok(Self::DataAccess),
            other => Err(ConceptError::bad_format(
                "cluster",
                format!("must be 0 or 1, got {other}"),
            )),
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// One source file under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysisResult {
    /// Repository identifier.
    pub repository: String,
    /// File path or canonical file identifier.
    pub file: String,
    /// Concept occurrences in the file.
    pub tokens: BTreeMap<Concept, ConceptOccurrence>,
    /// Concepts ranked by corpus relevance, most relevant first.
    #[serde(default)]
    pub ranked: Vec<ScoredConcept>,
    /// Non-blank lines in the file.
    pub file_number_of_lines_of_code: usize,
    /// Classification, once tagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Cluster>,
}

impl FileAnalysisResult {
    /// Creates an unranked, untagged result.
    pub fn new(
        repository: impl Into<String>,
        file: impl Into<String>,
        tokens: BTreeMap<Concept, ConceptOccurrence>,
        file_number_of_lines_of_code: usize,
    ) -> Self {
        Self {
            repository: repository.into(),
            file: file.into(),
            tokens,
            ranked: Vec::new(),
            file_number_of_lines_of_code,
            cluster: None,
        }
    }

    /// Total occurrences across all concepts.
    pub fn total_occurrences(&self) -> usize {
        self.tokens.values().map(|o| o.number_of_occurrence).sum()
    }
}

/// Counts the non-blank lines of a text.
pub fn count_lines_of_code(content: &str) -> usize {
    content.lines().filter(|l| !l.trim().is_empty()).count()
}

/// Builds the profile of one file from its full source text.
///
/// A file with no usable concepts still yields a result with an empty profile.
pub fn profile_file(
    extractor: &ConceptExtractor,
    repository: &str,
    file: &str,
    content: &str,
) -> Result<FileAnalysisResult, ConceptError> {
    let tokens = extractor.profile(file, content)?;
    let lines = count_lines_of_code(content);
    debug!("profiled {file}: {} concepts, {lines} lines", tokens.len());
    Ok(FileAnalysisResult::new(repository, file, tokens, lines))
}

/// Scores every profile against the batch and fills in `ranked`.
///
/// All profiles are added to one corpus before any is scored. Scores at or
/// below the significance threshold are dropped. With `max_per_file`, each
/// profile keeps only its top concepts, in both `ranked` and `tokens`.
pub fn rank_profiles(
    results: &mut [FileAnalysisResult],
    scoring: &ScoringSettings,
    max_per_file: Option<usize>,
) -> Result<(), ConceptError> {
    let mut builder = CorpusBuilder::new();
    for result in results.iter() {
        builder.add_document(result.tokens.iter().flat_map(|(concept, occ)| {
            iter::repeat_n(concept.as_str(), occ.number_of_occurrence)
        }));
    }
    let corpus = builder.build();

    for (idx, result) in results.iter_mut().enumerate() {
        let mut ranked = corpus.score_significant(idx, scoring)?;
        if let Some(max) = max_per_file {
            ranked.truncate(max);
            result
                .tokens
                .retain(|concept, _| ranked.iter().any(|s| s.name == concept.as_str()));
        }
        result.ranked = ranked;
    }

    Ok(())
}
