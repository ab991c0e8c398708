//! Value objects of the repository tree.
//!
//! A repository owns directories and files, a directory owns child directories
//! and files, and a file owns the code fragments detected in it. Every node is
//! identified by its path, which is unique within the parent scope.

use std::{fmt, str::FromStr};

use arca_concepts::{Cluster, Concept};
use serde::Serialize;

use crate::TreeError;

/// The kind of data operation a code fragment performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Inserts data.
    Create,
    /// Reads data.
    Read,
    /// Modifies data.
    Update,
    /// Removes data.
    Delete,
    /// Anything else, such as a connection or an HTTP route.
    Other,
}

impl Operation {
    /// Returns the upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        }
    }
}

impl FromStr for Operation {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(Self::Create),
            "READ" => Ok(Self::Read),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "OTHER" => Ok(Self::Other),
            _ => Err(TreeError::UnknownOperation {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for creating a code fragment.
#[derive(Debug, Clone)]
pub struct FragmentParams {
    /// Location of the call site: `<root>/<dirs>/<file>[#suffix]`.
    pub location: String,
    /// Identifier of the detected technology, e.g. `mongoose`.
    pub technology: String,
    /// Kind of data operation.
    pub operation: Operation,
    /// Name of the invoked method.
    pub method: String,
    /// Source text of the call site.
    pub sample: String,
    /// Concepts mined from the sample.
    pub concepts: Vec<Concept>,
    /// Trace of the heuristics that fired.
    pub heuristics: String,
    /// Detection score, as reported.
    pub score: String,
}

/// A single detected call site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeFragment {
    /// Location of the call site, including any `#` suffix.
    pub location: String,
    /// Identifier of the detected technology.
    pub technology: String,
    /// Kind of data operation.
    pub operation: Operation,
    /// Name of the invoked method.
    pub method: String,
    /// Source text of the call site.
    pub sample: String,
    /// Concepts mined from the sample.
    pub concepts: Vec<Concept>,
    /// Trace of the heuristics that fired.
    pub heuristics: String,
    /// Detection score, as reported.
    pub score: String,
}

impl CodeFragment {
    /// Creates a fragment, rejecting empty required fields.
    pub fn new(params: FragmentParams) -> Result<Self, TreeError> {
        require("location", &params.location)?;
        require("technology", &params.technology)?;
        require("method", &params.method)?;
        require("score", &params.score)?;
        Ok(Self {
            location: params.location,
            technology: params.technology,
            operation: params.operation,
            method: params.method,
            sample: params.sample,
            concepts: params.concepts,
            heuristics: params.heuristics,
            score: params.score,
        })
    }

    /// The location without its `#` suffix, i.e. the path of the owning file.
    pub fn file_path(&self) -> &str {
        strip_suffix(&self.location)
    }
}

/// Fails with `BadFormat` when a required value is blank.
fn require(field: &'static str, value: &str) -> Result<(), TreeError> {
    if value.trim().is_empty() {
        Err(TreeError::BadFormat { field })
    } else {
        Ok(())
    }
}

/// Drops a trailing `#...` location suffix.
pub fn strip_suffix(location: &str) -> &str {
    location.split_once('#').map_or(location, |(path, _)| path)
}

/// A source file in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    /// Full path of the file, starting at the repository root.
    pub path: String,
    /// Last path segment.
    pub name: String,
    /// Classification, when tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<Cluster>,
    /// Non-blank lines of code, when measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<usize>,
    /// Concepts attached to the file.
    pub concepts: Vec<Concept>,
    /// Fragments detected in the file, in insertion order.
    pub fragments: Vec<CodeFragment>,
}

impl File {
    /// Creates an empty file node.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            cluster: None,
            lines_of_code: None,
            concepts: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Appends a fragment unless an identical one is already present.
    pub fn add_fragment(&mut self, fragment: &CodeFragment) -> bool {
        if self.fragments.contains(fragment) {
            return false;
        }
        self.fragments.push(fragment.clone());
        true
    }

    /// Adds concepts not already attached.
    pub fn add_concepts(&mut self, concepts: &[Concept]) {
        for concept in concepts {
            if !self.concepts.contains(concept) {
                self.concepts.push(concept.clone());
            }
        }
    }
}

/// A directory in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directory {
    /// Full path of the directory, starting at the repository root.
    pub path: String,
    /// Last path segment.
    pub name: String,
    /// Child directories in insertion order.
    pub directories: Vec<Self>,
    /// Files directly inside this directory.
    pub files: Vec<File>,
}

impl Directory {
    /// Creates an empty directory node.
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Returns an iterator over this directory and all descendants in pre-order.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }
}

/// Iterator for pre-order traversal of directories.
pub struct PreorderIter<'a> {
    /// Directories still to visit (rightmost children pushed first).
    stack: Vec<&'a Directory>,
}

impl<'a> PreorderIter<'a> {
    /// Starts a traversal over several sibling roots.
    pub fn over(roots: &'a [Directory]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a Directory;

    fn next(&mut self) -> Option<Self::Item> {
        let dir = self.stack.pop()?;
        for child in dir.directories.iter().rev() {
            self.stack.push(child);
        }
        Some(dir)
    }
}
