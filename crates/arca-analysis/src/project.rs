//! Projects under analysis and their canonical names.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use arca_tree::canonicalize_location;
use log::info;

use crate::AnalysisError;

/// A project root opened for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project name, used for ground truth lookup and artifacts.
    pub name: String,
    /// Local directory holding the sources.
    pub root: PathBuf,
    /// Canonical repository URL read from the marker file.
    pub canonical: Option<String>,
}

impl Project {
    /// Opens a project directory and reads its marker file.
    pub fn open(name: &str, root: &Path, marker_file: &str) -> Result<Self, AnalysisError> {
        if !root.is_dir() {
            return Err(AnalysisError::fail(
                name,
                format!("{} is not a directory", root.display()),
            ));
        }
        let canonical = read_marker(root, marker_file)?;
        if let Some(url) = &canonical {
            info!("{name}: canonical name {url}");
        }
        Ok(Self {
            name: name.to_string(),
            root: root.to_path_buf(),
            canonical,
        })
    }

    /// The local root as a location prefix.
    pub fn local_id(&self) -> String {
        self.root
            .to_string_lossy()
            .replace('\\', "/")
            .trim_end_matches('/')
            .to_string()
    }

    /// The repository identifier: the canonical URL when known, else the local root.
    pub fn id(&self) -> String {
        match &self.canonical {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.local_id(),
        }
    }

    /// The identifier of a project-relative path, with an optional `#` suffix.
    pub fn location(&self, relative: &str, suffix: Option<&str>) -> String {
        let local = format!("{}/{}", self.local_id(), relative.trim_start_matches('/'));
        let local = match suffix {
            Some(suffix) => format!("{local}#{suffix}"),
            None => local,
        };
        match &self.canonical {
            Some(url) => canonicalize_location(&local, &self.local_id(), url),
            None => local,
        }
    }
}

/// Derives a project name from the last component of its root.
pub fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

/// Reads the first non-blank line of the marker file, if the file exists.
pub fn read_marker(root: &Path, marker_file: &str) -> Result<Option<String>, AnalysisError> {
    let path = root.join(marker_file);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AnalysisError::Io { path, source }),
    }
}
