//! Code-fragment records handed from extraction to assembly.

use arca_concepts::Concept;
use arca_tree::{CodeFragment, FragmentParams, Operation, TreeError};
use serde::Serialize;

use crate::{Alert, Project};

/// One detected call site, located in its project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentRecord {
    /// Technology identifier.
    #[serde(rename = "type")]
    pub technology: String,
    /// Repository identifier.
    pub repository: String,
    /// File identifier.
    pub file: String,
    /// File identifier plus the span suffix.
    pub location: String,
    /// Kind of data operation.
    pub operation: Operation,
    /// Invoked method.
    pub method: String,
    /// Source text of the call site.
    pub sample: String,
    /// Concepts mined from the sample and tokens.
    pub concepts: Vec<Concept>,
    /// Trace of the heuristics that fired.
    pub heuristics: String,
    /// Detection score.
    pub score: String,
    /// Non-blank lines of the owning file, once measured.
    pub file_number_of_lines_of_code: usize,
}

impl FragmentRecord {
    /// Locates an alert inside a project.
    pub fn from_alert(project: &Project, alert: Alert, concepts: Vec<Concept>) -> Self {
        let file = project.location(alert.relative_path(), None);
        let location = project.location(alert.relative_path(), Some(&alert.span()));
        Self {
            technology: alert.name,
            repository: project.id(),
            file,
            location,
            operation: alert.message.operation,
            method: alert.message.method,
            sample: alert.message.sample,
            concepts,
            heuristics: alert.message.heuristics,
            score: alert.message.score,
            file_number_of_lines_of_code: 0,
        }
    }

    /// Builds the tree value for this record.
    pub fn to_code_fragment(&self) -> Result<CodeFragment, TreeError> {
        CodeFragment::new(FragmentParams {
            location: self.location.clone(),
            technology: self.technology.clone(),
            operation: self.operation,
            method: self.method.clone(),
            sample: self.sample.clone(),
            concepts: self.concepts.clone(),
            heuristics: self.heuristics.clone(),
            score: self.score.clone(),
        })
    }
}
