//! Source discovery.
//!
//! Walks a project root to find the files to analyze, applying the configured
//! include/exclude patterns and skipping hidden entries and symlinks.

use std::{
    ffi::OsStr,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use arca_config::SourcePatterns;
use log::debug;
use walkdir::WalkDir;

use crate::{AnalysisError, Project};

/// A source file found under a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the project root.
    pub rel_path: PathBuf,
}

impl SourceFile {
    /// The relative path with `/` separators.
    pub fn relative(&self) -> String {
        self.rel_path.to_string_lossy().replace('\\', "/")
    }
}

/// Discovers the project's source files in a stable order.
pub fn discover_sources(
    project: &Project,
    patterns: &SourcePatterns,
) -> Result<Vec<SourceFile>, AnalysisError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(&project.root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("{}: skipping unreadable entry: {e}", project.name);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        let rel_path = match abs_path.strip_prefix(&project.root) {
            Ok(p) => p.to_path_buf(),
            Err(_) => continue,
        };

        if !patterns.matches(&rel_path) {
            continue;
        }

        files.push(SourceFile { abs_path, rel_path });
    }

    debug!("{}: discovered {} source files", project.name, files.len());
    Ok(files)
}

/// Checks if a file name is hidden (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Reads at most `limit` bytes of a file as text, replacing invalid UTF-8.
pub fn read_source(path: &Path, limit: usize) -> Result<String, AnalysisError> {
    let io_err = |source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let mut bytes = Vec::new();
    file.take(limit as u64)
        .read_to_end(&mut bytes)
        .map_err(io_err)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use arca_config::AnalysisSettings;
    use tempfile::TempDir;

    use super::*;

    fn project(temp: &TempDir) -> Project {
        Project::open("app", temp.path(), ".repository-url").unwrap()
    }

    fn relative(files: &[SourceFile]) -> Vec<String> {
        files.iter().map(SourceFile::relative).collect()
    }

    #[test]
    fn finds_sources_and_applies_default_excludes() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/models")).unwrap();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::write(root.join("src/models/movie.js"), "x").unwrap();
        fs::write(root.join("src/app.ts"), "x").unwrap();
        fs::write(root.join("README.md"), "x").unwrap();
        fs::write(root.join("node_modules/lib/index.js"), "x").unwrap();

        let patterns = SourcePatterns::compile(&AnalysisSettings::default()).unwrap();
        let files = discover_sources(&project(&temp), &patterns).unwrap();
        assert_eq!(relative(&files), ["src/app.ts", "src/models/movie.js"]);
    }

    #[test]
    fn skips_hidden_entries() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/hook.js"), "x").unwrap();
        fs::write(root.join(".eslintrc.js"), "x").unwrap();
        fs::write(root.join("index.js"), "x").unwrap();

        let patterns = SourcePatterns::compile(&AnalysisSettings::default()).unwrap();
        let files = discover_sources(&project(&temp), &patterns).unwrap();
        assert_eq!(relative(&files), ["index.js"]);
    }

    #[test]
    fn read_source_truncates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("big.js");
        fs::write(&path, "abcdef").unwrap();
        assert_eq!(read_source(&path, 3).unwrap(), "abc");
        assert!(read_source(&temp.path().join("missing.js"), 3).is_err());
    }
}
