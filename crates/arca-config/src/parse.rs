//! Configuration file parsing.
//!
//! Parses individual `.arca.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Concept extraction section.
    pub concepts: Option<RawConceptSettings>,
    /// Relevance scoring section.
    pub scoring: Option<RawScoringSettings>,
    /// File tagging section.
    pub tagging: Option<RawTaggingSettings>,
    /// Source discovery section.
    pub analysis: Option<RawAnalysisSettings>,
    /// Ground truth per project: project name -> known data-access files.
    pub ground_truth: Option<HashMap<String, RawGroundTruth>>,
}

/// Raw concept extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConceptSettings {
    /// Concepts shorter than this many characters are noise.
    pub min_concept_length: Option<usize>,
    /// Whether generic English stop words are removed.
    pub remove_stopwords: Option<bool>,
    /// Whether concepts need at least one dictionary word to survive.
    pub dictionary_filter: Option<bool>,
    /// Path to a newline-separated word list replacing the built-in dictionary.
    pub dictionary: Option<String>,
    /// Path to a reserved-keyword JSON table replacing the built-in one.
    pub keywords: Option<String>,
    /// Keep only this many top-relevance concepts per file profile.
    pub max_concepts_per_file: Option<usize>,
}

/// Raw relevance scoring settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawScoringSettings {
    /// Batch scores at or below this value are discarded.
    pub significance_threshold: Option<f64>,
    /// Decimal places kept for batch scores.
    pub precision: Option<u32>,
}

/// Raw tagging settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTaggingSettings {
    /// Minimum concept density for a file to be tagged as data-access-related.
    pub threshold_density: Option<f64>,
    /// Number of aggregated concepts used as vocabulary in fully automated mode.
    pub top_n: Option<usize>,
    /// Caller-supplied data vocabulary. Accepts a string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub data_concepts: Option<Vec<String>>,
    /// Required co-occurring terms. Accepts a string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub anchor_points: Option<Vec<String>>,
    /// Directory where clustering and metrics artifacts are written.
    pub output_dir: Option<String>,
}

/// Raw source discovery settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnalysisSettings {
    /// Glob patterns selecting source files.
    pub include: Option<Vec<String>>,
    /// Glob patterns excluding source files.
    pub exclude: Option<Vec<String>>,
    /// Name of the one-line file holding the canonical repository URL.
    pub marker_file: Option<String>,
    /// Maximum bytes read from each source file.
    pub sample_size: Option<usize>,
}

/// Raw ground truth for one project.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGroundTruth {
    /// Files (relative to the project root) known to be data-access-related.
    pub data_files: Vec<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
