//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// The density threshold lies outside `[0, 1]`.
    ThresholdOutOfRange {
        /// Configured threshold.
        value: f64,
    },
    /// Automated tagging would use an empty vocabulary.
    TopNZero,
    /// No include patterns are configured, so no files are analyzed.
    NoIncludePatterns,
    /// Anchor points are set but no data concepts are.
    AnchorsWithoutConcepts,
    /// A configured file path does not exist.
    PathMissing {
        /// Name of the setting.
        setting: String,
        /// Path that doesn't exist.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange { value } => {
                write!(f, "tagging.threshold_density {value} is outside [0, 1]")
            }
            Self::TopNZero => write!(f, "tagging.top_n is 0; automated tagging tags nothing"),
            Self::NoIncludePatterns => {
                write!(f, "analysis.include is empty; no files will be analyzed")
            }
            Self::AnchorsWithoutConcepts => {
                write!(
                    f,
                    "tagging.anchor_points is set but tagging.data_concepts is empty"
                )
            }
            Self::PathMissing { setting, path } => {
                write!(f, "{setting} path does not exist: {path}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let threshold = config.tagging.threshold_density;
    if !(0.0..=1.0).contains(&threshold) {
        warnings.push(ConfigWarning::ThresholdOutOfRange { value: threshold });
    }

    if config.tagging.top_n == 0 {
        warnings.push(ConfigWarning::TopNZero);
    }

    if config.analysis.include.is_empty() {
        warnings.push(ConfigWarning::NoIncludePatterns);
    }

    if config.tagging.anchor_points.is_some() && config.tagging.data_concepts.is_empty() {
        warnings.push(ConfigWarning::AnchorsWithoutConcepts);
    }

    let paths = [
        ("concepts.dictionary", &config.concepts.dictionary),
        ("concepts.keywords", &config.concepts.keywords),
    ];
    for (setting, path) in paths {
        let Some(path) = path else {
            continue;
        };
        if !path.is_file() {
            warnings.push(ConfigWarning::PathMissing {
                setting: setting.to_string(),
                path: path.display().to_string(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::TaggingSettings;

    #[test]
    fn test_validate_default_config() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let config = Config {
            tagging: TaggingSettings {
                threshold_density: 1.5,
                ..TaggingSettings::default()
            },
            ..Config::default()
        };
        let warnings = config.validate();
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::ThresholdOutOfRange { .. }))
        );
    }

    #[test]
    fn test_validate_anchors_without_concepts() {
        let mut config = Config::default();
        config.tagging.anchor_points = Some(vec!["id".into()]);
        config.tagging.top_n = 0;
        let warnings = config.validate();
        assert!(warnings.contains(&ConfigWarning::AnchorsWithoutConcepts));
        assert!(warnings.contains(&ConfigWarning::TopNZero));
    }

    #[test]
    fn test_validate_missing_dictionary() {
        let mut config = Config::default();
        config.concepts.dictionary = Some(PathBuf::from("/nonexistent/words-12345.txt"));
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| matches!(
            w,
            ConfigWarning::PathMissing { setting, .. } if setting == "concepts.dictionary"
        )));
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::NoIncludePatterns;
        assert!(warning.to_string().contains("analysis.include"));
    }
}
