//! Integration tests for arca-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use arca_config::{Config, ConfigError, ConfigWarning};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config() {
    let env = TestEnv::new();
    env.create_file(
        ".arca.toml",
        r#"
root = true

[tagging]
threshold_density = 0.3
data_concepts = ["movie", "actor"]
"#,
    );

    let config = Config::load(env.path()).unwrap();

    assert!((config.tagging.threshold_density - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.tagging.data_concepts, vec!["movie", "actor"]);
    assert_eq!(config.tagging.top_n, 30);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
}

#[test]
fn test_load_nested_configs_merging() {
    let env = TestEnv::new();
    let subdir = env.create_dir("project/subdir");

    env.create_file(
        ".arca.toml",
        r#"
root = true

[tagging]
threshold_density = 0.1
top_n = 12

[ground_truth.movies]
data_files = ["db/movies.js"]
"#,
    );
    env.create_file(
        "project/.arca.toml",
        r#"
[tagging]
threshold_density = 0.5

[ground_truth.shop]
data_files = ["store.py"]
"#,
    );

    let config = Config::load(&subdir).unwrap();

    // Closest config wins for threshold, parent supplies top_n
    assert!((config.tagging.threshold_density - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.tagging.top_n, 12);

    let projects: Vec<_> = config
        .ground_truth
        .iter()
        .map(|g| g.project.as_str())
        .collect();
    assert_eq!(projects, vec!["movies", "shop"]);
    assert_eq!(
        config.config_root.as_deref(),
        Some(env.path().join("project").as_path())
    );
}

#[test]
fn test_root_stops_discovery() {
    let env = TestEnv::new();
    let child = env.create_dir("child");

    env.create_file(".arca.toml", "[tagging]\ntop_n = 99\n");
    env.create_file("child/.arca.toml", "root = true\n");

    let config = Config::load(&child).unwrap();
    assert_eq!(config.tagging.top_n, 30);
}

#[test]
fn test_load_invalid_toml() {
    let env = TestEnv::new();
    env.create_file(".arca.toml", "root = true\n[tagging\n");

    let result = Config::load(env.path());
    assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
}

#[test]
fn test_dictionary_path_resolved_and_validated() {
    let env = TestEnv::new();
    env.create_file(
        ".arca.toml",
        "root = true\n[concepts]\ndictionary = \"words.txt\"\n",
    );

    let config = Config::load(env.path()).unwrap();
    assert_eq!(
        config.concepts.dictionary,
        Some(env.path().join("words.txt"))
    );
    assert!(
        config
            .validate()
            .iter()
            .any(|w| matches!(w, ConfigWarning::PathMissing { .. }))
    );

    env.create_file("words.txt", "movie\n");
    assert!(config.validate().is_empty());
}

#[test]
fn test_compiled_patterns_from_config() {
    let env = TestEnv::new();
    env.create_file(
        ".arca.toml",
        "root = true\n[analysis]\ninclude = [\"**/*.ts\"]\nexclude = [\"**/gen/**\"]\n",
    );

    let config = Config::load(env.path()).unwrap();
    let patterns = config.compile_patterns().unwrap();

    assert!(patterns.matches(Path::new("src/app.ts")));
    assert!(!patterns.matches(Path::new("src/gen/app.ts")));
    assert!(!patterns.matches(Path::new("src/app.js")));
}
