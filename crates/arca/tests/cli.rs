//! CLI integration tests for arca commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// A mongoose model file.
const MOVIE_JS: &str = "\
const mongoose = require('mongoose');
const Movie = mongoose.model('Movie', { title: String, genre: String });
async function findMovies(genre) {
  return Movie.find({ genre });
}
module.exports = { findMovies };
";

/// An express entry point with no data access.
const SERVER_JS: &str = "\
const express = require('express');
const app = express();
app.get('/health', (req, res) => res.send('ok'));
app.listen(3000);
";

/// Engine output with one call site in the model file.
const ALERTS_CSV: &str = r#""mongoose","Data access","recommendation","find;;Movie.find({ genre });;Movie,genre;;READ;;1;;import+call","/src/models/movie.js","4","10","4","33"
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get an arca command.
fn arca() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("arca").unwrap()
}

/// Helper to run `arca` with HOME isolated to the provided directory.
fn arca_with_home(home: &Path) -> Command {
    let mut cmd = arca();
    cmd.env("HOME", home);
    cmd
}

/// Helper to run `arca` inside `dir`, with HOME isolated to an empty `dir/home`.
///
/// HOME must differ from the working directory, or `init` writes the global config.
fn arca_in(dir: &Path) -> Command {
    let home = dir.join("home");
    fs::create_dir_all(&home).unwrap();
    let mut cmd = arca_with_home(&home);
    cmd.current_dir(dir);
    cmd
}

/// Writes the `movies` project and its engine output into `dir`.
fn setup_project(dir: &Path) {
    let root = dir.join("movies");
    fs::create_dir_all(root.join("src/models")).unwrap();
    fs::write(root.join("src/models/movie.js"), MOVIE_JS).unwrap();
    fs::write(root.join("src/server.js"), SERVER_JS).unwrap();
    fs::write(dir.join("alerts.csv"), ALERTS_CSV).unwrap();
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

/// Runs a successful command and returns its stdout without colors.
fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    strip_ansi(&String::from_utf8_lossy(&assert.get_output().stdout))
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();
        arca_in(dir.path()).arg("init").assert().success();

        let config_path = dir.path().join(".arca.toml");
        assert!(config_path.exists());

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# [tagging]"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".arca.toml"), "existing").unwrap();

        arca_in(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already exists"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".arca.toml"), "old content").unwrap();

        arca_in(dir.path()).args(["init", "--force"]).assert().success();

        let contents = fs::read_to_string(dir.path().join(".arca.toml")).unwrap();
        assert!(!contents.contains("old content"));
        assert!(contents.contains("# [tagging]"));
    }

    #[test]
    fn updates_gitignore_when_present() {
        let dir = temp_dir();
        fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();

        arca_in(dir.path()).arg("init").assert().success();

        let gitignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert!(gitignore.contains(".arca/"));
    }

    #[test]
    fn does_not_duplicate_gitignore_entry() {
        let dir = temp_dir();
        fs::write(dir.path().join(".gitignore"), "*.log\n.arca/\n").unwrap();

        arca_in(dir.path()).arg("init").assert().success();

        let gitignore = fs::read_to_string(dir.path().join(".gitignore")).unwrap();
        assert_eq!(gitignore.matches(".arca/").count(), 1);
    }

    #[test]
    fn works_with_invalid_existing_config() {
        let dir = temp_dir();
        fs::write(dir.path().join(".arca.toml"), "[invalid").unwrap();

        arca_in(dir.path()).args(["init", "--force"]).assert().success();
    }

    #[test]
    fn global_flag_writes_home_config() {
        let dir = temp_dir();
        arca_in(dir.path()).args(["init", "--global"]).assert().success();

        assert!(dir.path().join("home/.arca.toml").is_file());
        assert!(!dir.path().join(".arca.toml").exists());
    }

    #[test]
    fn prints_config_preview() {
        let dir = temp_dir();
        let stdout = stdout_of(arca_in(dir.path()).arg("init"));
        assert!(
            stdout.contains("Configuration written:"),
            "output did not include preview header: {stdout}"
        );
        assert!(
            stdout.contains("threshold_density"),
            "output did not include template content: {stdout}"
        );
    }
}

mod status {
    use super::*;

    #[test]
    fn succeeds_without_config() {
        let dir = temp_dir();
        arca_in(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("No configuration files found"));
    }

    #[test]
    fn succeeds_with_valid_config() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".arca.toml"),
            "[tagging]\ndata_concepts = [\"movie\"]\n",
        )
        .unwrap();

        let stdout = stdout_of(arca_in(dir.path()).arg("status"));
        assert!(stdout.contains("semi-automated"), "{stdout}");
        assert!(stdout.contains("No issues found."), "{stdout}");
    }

    #[test]
    fn fails_on_threshold_out_of_range() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".arca.toml"),
            "[tagging]\nthreshold_density = 2.5\n",
        )
        .unwrap();

        arca_in(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Warnings (1):"));
    }

    #[test]
    fn lists_ground_truth() {
        let dir = temp_dir();
        fs::write(
            dir.path().join(".arca.toml"),
            "[ground_truth.movies]\ndata_files = [\"src/models/movie.js\"]\n",
        )
        .unwrap();

        let stdout = stdout_of(arca_in(dir.path()).arg("status"));
        assert!(stdout.contains("movies (1 data files)"), "{stdout}");
    }

    #[test]
    fn fails_on_invalid_toml() {
        let dir = temp_dir();
        fs::write(dir.path().join(".arca.toml"), "[invalid").unwrap();

        arca_in(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod config {
    use super::*;

    #[test]
    fn prints_defaults_without_config() {
        let dir = temp_dir();
        let stdout = stdout_of(arca_in(dir.path()).arg("config"));
        assert!(stdout.contains("[tagging]"), "{stdout}");
        assert!(stdout.contains("top_n = 30"), "{stdout}");
    }

    #[test]
    fn reflects_local_overrides() {
        let dir = temp_dir();
        fs::write(dir.path().join(".arca.toml"), "[tagging]\ntop_n = 7\n").unwrap();

        let stdout = stdout_of(arca_in(dir.path()).arg("config"));
        assert!(stdout.contains("top_n = 7"), "{stdout}");
    }
}

mod concepts {
    use super::*;

    #[test]
    fn prints_file_concepts() {
        let dir = temp_dir();
        fs::write(dir.path().join("movie.js"), MOVIE_JS).unwrap();

        arca_in(dir.path())
            .args(["concepts", "movie.js"])
            .assert()
            .success()
            .stdout(predicate::str::contains("movie"));
    }

    #[test]
    fn json_output_is_an_array() {
        let dir = temp_dir();
        fs::write(dir.path().join("movie.js"), MOVIE_JS).unwrap();

        let stdout = stdout_of(arca_in(dir.path()).args(["concepts", "movie.js", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        let concepts = json.as_array().unwrap();
        assert!(concepts.iter().any(|c| c == "movie"), "{stdout}");
    }

    #[test]
    fn fails_on_nonexistent_file() {
        let dir = temp_dir();
        arca_in(dir.path())
            .args(["concepts", "missing.js"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod rank {
    use super::*;

    #[test]
    fn ranks_project_concepts() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args(["rank", "movies"]));
        assert!(stdout.contains("movies (2 files)"), "{stdout}");
        assert!(stdout.contains("movie"), "{stdout}");
    }

    #[test]
    fn json_output_lists_scored_concepts() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args(["rank", "movies", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        let ranked = json.as_array().unwrap();
        let movie = ranked.iter().find(|c| c["name"] == "movie").unwrap();
        assert!(movie["relevancy"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn respects_limit() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args(["rank", "movies", "-n", "1", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
    }

    #[test]
    fn fails_on_missing_directory() {
        let dir = temp_dir();
        arca_in(dir.path())
            .args(["rank", "nowhere"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}

mod tag {
    use super::*;

    #[test]
    fn writes_clustering_results() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args(["tag", "movies", "-c", "movie"]));
        assert!(stdout.contains("1 of 2 files tagged data-access"), "{stdout}");

        let results = dir.path().join(".arca/clustering-results.json");
        assert!(results.is_file());
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(results).unwrap()).unwrap();
        assert_eq!(json["project"], "movies");
        assert!(!dir.path().join(".arca/classification-metrics.json").exists());
    }

    #[test]
    fn writes_metrics_with_ground_truth() {
        let dir = temp_dir();
        setup_project(dir.path());
        fs::write(
            dir.path().join(".arca.toml"),
            "[ground_truth.movies]\ndata_files = [\"src/models/movie.js\"]\n",
        )
        .unwrap();

        let stdout =
            stdout_of(arca_in(dir.path()).args(["tag", "movies", "-c", "movie", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["metrics"]["tp"], 1);
        assert_eq!(json["artifacts"].as_array().unwrap().len(), 2);
        assert!(dir.path().join(".arca/classification-metrics.json").is_file());
    }

    #[test]
    fn uses_configured_vocabulary() {
        let dir = temp_dir();
        setup_project(dir.path());
        fs::write(
            dir.path().join(".arca.toml"),
            "[tagging]\ndata_concepts = [\"movie\"]\n",
        )
        .unwrap();

        let stdout = stdout_of(arca_in(dir.path()).args(["tag", "movies"]));
        assert!(stdout.contains("semi-automated"), "{stdout}");
        assert!(stdout.contains("vocabulary: movie"), "{stdout}");
    }

    #[test]
    fn fully_automated_without_vocabulary() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args(["tag", "movies", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(json["results"]["mode"], "fully-automated");
    }

    #[test]
    fn accepts_engine_csv() {
        let dir = temp_dir();
        setup_project(dir.path());

        arca_in(dir.path())
            .args(["tag", "movies", "--csv", "alerts.csv", "-c", "movie"])
            .assert()
            .success();
        assert!(dir.path().join(".arca/clustering-results.json").is_file());
    }
}

mod tree {
    use super::*;

    #[test]
    fn shows_files_and_call_sites() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args([
            "tree",
            "movies",
            "--csv",
            "alerts.csv",
            "--plain",
        ]));
        assert!(stdout.contains("movie.js"), "{stdout}");
        assert!(stdout.contains("READ find mongoose"), "{stdout}");
        assert!(stdout.contains("server.js"), "{stdout}");
    }

    #[test]
    fn json_output_counts_fragments() {
        let dir = temp_dir();
        setup_project(dir.path());

        let stdout = stdout_of(arca_in(dir.path()).args([
            "tree", "movies", "--csv", "alerts.csv", "--json",
        ]));
        let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert!(json["path"].as_str().unwrap().ends_with("movies"));
        assert!(stdout.contains("\"READ\""), "{stdout}");
    }

    #[test]
    fn does_not_write_artifacts() {
        let dir = temp_dir();
        setup_project(dir.path());

        arca_in(dir.path())
            .args(["tree", "movies", "--csv", "alerts.csv"])
            .assert()
            .success();
        assert!(!dir.path().join(".arca").exists());
    }

    #[test]
    fn requires_csv() {
        let dir = temp_dir();
        setup_project(dir.path());

        arca_in(dir.path()).args(["tree", "movies"]).assert().failure();
    }

    #[test]
    fn fails_on_missing_csv() {
        let dir = temp_dir();
        setup_project(dir.path());

        arca_in(dir.path())
            .args(["tree", "movies", "--csv", "missing.csv"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }
}
