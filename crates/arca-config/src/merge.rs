//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::{
    AnalysisSettings, ConceptSettings, Config, ConfigError, GroundTruth, ScoringSettings,
    TaggingSettings,
    parse::{
        RawAnalysisSettings, RawConceptSettings, RawConfig, RawScoringSettings,
        RawTaggingSettings,
    },
    resolve::resolve_setting_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing this config file.
    fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - List settings: replaced wholesale, never concatenated
/// - Ground truth: merged by project name, first definition wins completely
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut concepts = ConceptSettings::default();
    let mut scoring = ScoringSettings::default();
    let mut tagging = TaggingSettings::default();
    let mut analysis = AnalysisSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let dir = parsed.dir();
        if let Some(ref raw) = parsed.config.concepts {
            apply_concepts(&mut concepts, raw, &dir)?;
        }
        if let Some(ref raw) = parsed.config.scoring {
            apply_scoring(&mut scoring, raw);
        }
        if let Some(ref raw) = parsed.config.tagging {
            apply_tagging(&mut tagging, raw, &dir)?;
        }
        if let Some(ref raw) = parsed.config.analysis {
            apply_analysis(&mut analysis, raw);
        }
    }

    let ground_truth = merge_ground_truth(configs)?;
    let config_root = configs.first().map(ParsedConfig::dir);

    Ok(Config {
        concepts,
        scoring,
        tagging,
        analysis,
        ground_truth,
        config_root,
    })
}

/// Applies raw concept settings, resolving paths against the config directory.
fn apply_concepts(
    result: &mut ConceptSettings,
    raw: &RawConceptSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.min_concept_length {
        result.min_concept_length = v;
    }
    if let Some(v) = raw.remove_stopwords {
        result.remove_stopwords = v;
    }
    if let Some(v) = raw.dictionary_filter {
        result.dictionary_filter = v;
    }
    if let Some(ref v) = raw.dictionary {
        result.dictionary = Some(resolve_setting_path(v, dir)?);
    }
    if let Some(ref v) = raw.keywords {
        result.keywords = Some(resolve_setting_path(v, dir)?);
    }
    if let Some(v) = raw.max_concepts_per_file {
        result.max_concepts_per_file = Some(v);
    }
    Ok(())
}

/// Applies raw scoring settings.
fn apply_scoring(result: &mut ScoringSettings, raw: &RawScoringSettings) {
    if let Some(v) = raw.significance_threshold {
        result.significance_threshold = v;
    }
    if let Some(v) = raw.precision {
        result.precision = v;
    }
}

/// Applies raw tagging settings, resolving the output directory.
fn apply_tagging(
    result: &mut TaggingSettings,
    raw: &RawTaggingSettings,
    dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(v) = raw.threshold_density {
        result.threshold_density = v;
    }
    if let Some(v) = raw.top_n {
        result.top_n = v;
    }
    if let Some(ref v) = raw.data_concepts {
        result.data_concepts.clone_from(v);
    }
    if let Some(ref v) = raw.anchor_points {
        result.anchor_points = Some(v.clone());
    }
    if let Some(ref v) = raw.output_dir {
        result.output_dir = resolve_setting_path(v, dir)?;
    }
    Ok(())
}

/// Applies raw analysis settings.
fn apply_analysis(result: &mut AnalysisSettings, raw: &RawAnalysisSettings) {
    if let Some(ref v) = raw.include {
        result.include.clone_from(v);
    }
    if let Some(ref v) = raw.exclude {
        result.exclude.clone_from(v);
    }
    if let Some(ref v) = raw.marker_file {
        result.marker_file.clone_from(v);
    }
    if let Some(v) = raw.sample_size {
        result.sample_size = v;
    }
}

/// Merges ground truth by project name; the highest-precedence definition wins.
fn merge_ground_truth(configs: &[ParsedConfig]) -> Result<Vec<GroundTruth>, ConfigError> {
    let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for parsed in configs {
        let Some(ref truth) = parsed.config.ground_truth else {
            continue;
        };
        for (project, raw) in truth {
            merged
                .entry(project.clone())
                .or_insert_with(|| raw.data_files.clone());
        }
    }

    merged
        .into_iter()
        .map(|(project, data_files)| {
            for file in &data_files {
                check_data_file(&project, file)?;
            }
            Ok(GroundTruth {
                project,
                data_files,
            })
        })
        .collect()
}

/// Rejects ground-truth paths that cannot match a project-relative file.
fn check_data_file(project: &str, file: &str) -> Result<(), ConfigError> {
    let reason = if file.trim().is_empty() {
        "path is empty"
    } else if Path::new(file).is_absolute() {
        "path must be relative to the project root"
    } else if file.split(['/', '\\']).any(|part| part == "..") {
        "path leaves the project root"
    } else {
        return Ok(());
    };
    Err(ConfigError::InvalidGroundTruth {
        project: project.to_string(),
        file: file.to_string(),
        reason,
    })
}
