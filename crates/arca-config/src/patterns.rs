//! Include/exclude pattern compilation and matching.
//!
//! Compiles glob patterns from the analysis settings into matchers that decide
//! which files of a project are analyzed.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{AnalysisSettings, ConfigError};

/// Compiled source discovery patterns.
#[derive(Debug, Clone)]
pub struct SourcePatterns {
    /// Compiled include patterns.
    include: GlobSet,
    /// Compiled exclude patterns.
    exclude: GlobSet,
}

impl SourcePatterns {
    /// Compiles include/exclude patterns from analysis settings.
    pub fn compile(settings: &AnalysisSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(&settings.include, "include")?,
            exclude: build_set(&settings.exclude, "exclude")?,
        })
    }

    /// Checks if a project-relative path should be analyzed.
    ///
    /// A file matches if it matches at least one include pattern
    /// and does not match any exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Builds a glob set from a list of patterns.
fn build_set(patterns: &[String], kind: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: format!("<combined {kind} patterns>"),
        source: e,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(include: &[&str], exclude: &[&str]) -> AnalysisSettings {
        AnalysisSettings {
            include: include.iter().map(|s| (*s).to_string()).collect(),
            exclude: exclude.iter().map(|s| (*s).to_string()).collect(),
            ..AnalysisSettings::default()
        }
    }

    #[test]
    fn test_include_and_exclude() {
        let patterns =
            SourcePatterns::compile(&settings(&["**/*.js"], &["**/node_modules/**"])).unwrap();
        assert!(patterns.matches(Path::new("src/db/movie.js")));
        assert!(!patterns.matches(Path::new("node_modules/lib/index.js")));
        assert!(!patterns.matches(Path::new("README.md")));
    }

    #[test]
    fn test_default_patterns_compile() {
        let patterns = SourcePatterns::compile(&AnalysisSettings::default()).unwrap();
        assert!(patterns.matches(Path::new("app/models/user.py")));
        assert!(!patterns.matches(Path::new("dist/app.js")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = SourcePatterns::compile(&settings(&["[invalid"], &[]));
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_no_includes_matches_nothing() {
        let patterns = SourcePatterns::compile(&settings(&[], &[])).unwrap();
        assert!(!patterns.matches(Path::new("a.js")));
    }
}
