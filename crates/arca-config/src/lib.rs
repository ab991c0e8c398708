//! Configuration system for arca.
//!
//! arca uses TOML configuration files named `.arca.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.arca.toml` files
//! found, then loading `~/.arca.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAnalysisSettings, RawConceptSettings, RawConfig, RawGroundTruth, RawScoringSettings,
    RawTaggingSettings, parse_config_file, parse_config_str,
};
pub use patterns::SourcePatterns;
pub use resolve::resolve_setting_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default minimum density for a file to be tagged as data-access-related.
pub const DEFAULT_THRESHOLD_DENSITY: f64 = 0.2;

/// Default number of aggregated concepts used in fully automated tagging.
pub const DEFAULT_TOP_N: usize = 30;

/// Default batch score at or below which concepts are discarded.
pub const DEFAULT_SIGNIFICANCE_THRESHOLD: f64 = 1.0;

/// Default number of decimal places kept for batch scores.
pub const DEFAULT_SCORE_PRECISION: u32 = 2;

/// Default minimum concept length; anything shorter is noise.
pub const DEFAULT_MIN_CONCEPT_LENGTH: usize = 2;

/// Default name of the canonical-repository marker file.
pub const DEFAULT_MARKER_FILE: &str = ".repository-url";

/// Default directory for clustering and metrics artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = ".arca";

/// Default number of bytes read from each source file.
pub const DEFAULT_SAMPLE_SIZE: usize = 1_048_576;

/// Default include patterns for source discovery.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &[
    "**/*.js", "**/*.jsx", "**/*.mjs", "**/*.cjs", "**/*.ts", "**/*.tsx", "**/*.py", "**/*.java",
    "**/*.go", "**/*.rb", "**/*.php", "**/*.cs", "**/*.rs",
];

/// Default exclude patterns for source discovery.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/vendor/**",
    "**/target/**",
    "**/dist/**",
    "**/build/**",
    "**/*.min.js",
];

/// Top-level merged configuration for arca.
///
/// This represents the fully resolved configuration after merging all discovered `.arca.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Concept extraction settings.
    pub concepts: ConceptSettings,
    /// Relevance scoring settings.
    pub scoring: ScoringSettings,
    /// File tagging settings.
    pub tagging: TaggingSettings,
    /// Source discovery settings.
    pub analysis: AnalysisSettings,
    /// Ground truth registered per project, sorted by project name.
    pub ground_truth: Vec<GroundTruth>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.arca.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Compiles the source include/exclude patterns.
    pub fn compile_patterns(&self) -> Result<SourcePatterns, ConfigError> {
        SourcePatterns::compile(&self.analysis)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Returns the ground truth registered for a project, if any.
    pub fn ground_truth_for(&self, project: &str) -> Option<&GroundTruth> {
        self.ground_truth.iter().find(|g| g.project == project)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// Ground truth tables are omitted; they are data, not settings.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            concepts: &self.concepts,
            scoring: &self.scoring,
            tagging: &self.tagging,
            analysis: &self.analysis,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Settings for concept extraction and noise filtering.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConceptSettings {
    /// Concepts shorter than this many characters are dropped.
    pub min_concept_length: usize,
    /// Whether generic English stop words are removed.
    pub remove_stopwords: bool,
    /// Whether concepts need at least one dictionary word to survive.
    pub dictionary_filter: bool,
    /// Word list replacing the built-in dictionary.
    pub dictionary: Option<PathBuf>,
    /// Reserved-keyword table replacing the built-in one.
    pub keywords: Option<PathBuf>,
    /// Keep only this many top-relevance concepts per file profile.
    pub max_concepts_per_file: Option<usize>,
}

impl Default for ConceptSettings {
    fn default() -> Self {
        Self {
            min_concept_length: DEFAULT_MIN_CONCEPT_LENGTH,
            remove_stopwords: true,
            dictionary_filter: true,
            dictionary: None,
            keywords: None,
            max_concepts_per_file: None,
        }
    }
}

/// Settings for corpus relevance scoring.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Batch scores at or below this value are discarded.
    pub significance_threshold: f64,
    /// Decimal places kept for batch scores.
    pub precision: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            significance_threshold: DEFAULT_SIGNIFICANCE_THRESHOLD,
            precision: DEFAULT_SCORE_PRECISION,
        }
    }
}

/// Settings for the density classifier and tagging runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TaggingSettings {
    /// Minimum concept density for a positive tag.
    pub threshold_density: f64,
    /// Vocabulary size in fully automated mode.
    pub top_n: usize,
    /// Caller-supplied data vocabulary for semi-automated mode.
    pub data_concepts: Vec<String>,
    /// Required co-occurring terms.
    pub anchor_points: Option<Vec<String>>,
    /// Directory where artifacts are written.
    pub output_dir: PathBuf,
}

impl Default for TaggingSettings {
    fn default() -> Self {
        Self {
            threshold_density: DEFAULT_THRESHOLD_DENSITY,
            top_n: DEFAULT_TOP_N,
            data_concepts: Vec::new(),
            anchor_points: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Settings for discovering source files in a project.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Glob patterns selecting source files.
    pub include: Vec<String>,
    /// Glob patterns excluding source files.
    pub exclude: Vec<String>,
    /// Name of the one-line canonical URL file at the project root.
    pub marker_file: String,
    /// Maximum bytes read from each source file.
    pub sample_size: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            include: to_strings(DEFAULT_INCLUDE_PATTERNS),
            exclude: to_strings(DEFAULT_EXCLUDE_PATTERNS),
            marker_file: DEFAULT_MARKER_FILE.to_string(),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Files known to be data-access-related in one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruth {
    /// Project name the ground truth belongs to.
    pub project: String,
    /// Project-relative paths of the data-access files.
    pub data_files: Vec<String>,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Concept extraction settings.
    concepts: &'a ConceptSettings,
    /// Relevance scoring settings.
    scoring: &'a ScoringSettings,
    /// File tagging settings.
    tagging: &'a TaggingSettings,
    /// Source discovery settings.
    analysis: &'a AnalysisSettings,
}

/// Converts a static string slice list into owned strings.
fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
