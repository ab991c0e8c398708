//! End-to-end analysis of one project.
//!
//! Runs the analyzer stages, tags the ranked files and folds files and call
//! sites into the repository tree.

use std::path::Path;

use arca_concepts::Concept;
use arca_config::{Config, TaggingSettings};
use arca_tagging::{DbDetails, TaggingReport, tag_files_fully_automated, tag_files_semi_automated};
use arca_tree::{FileEntry, Repository, TreeEntry, build_directory_tree};
use log::info;

use crate::{AnalysisError, Analyzer, Extraction, Project, StaticAnalyzer};

/// A project after extraction and ranking.
#[derive(Debug, Clone)]
pub struct ProjectAnalysis {
    /// The analyzed project.
    pub project: Project,
    /// Ranked profiles and call sites.
    pub extraction: Extraction,
}

/// Where a tagging run takes its data concepts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vocabulary {
    /// The project's top aggregated concepts.
    Automatic,
    /// A caller-supplied vocabulary, optionally with anchors.
    Supplied(DbDetails),
}

impl Vocabulary {
    /// Uses the configured data concepts, or the automatic vocabulary when none are set.
    pub fn from_settings(settings: &TaggingSettings) -> Result<Self, AnalysisError> {
        if settings.data_concepts.is_empty() {
            Ok(Self::Automatic)
        } else {
            Ok(Self::Supplied(DbDetails::from_settings(settings)?))
        }
    }
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Ranked and tagged analysis.
    pub analysis: ProjectAnalysis,
    /// Tagging outcome and written artifacts.
    pub tagging: TaggingReport,
    /// Assembled repository tree.
    pub tree: Repository,
}

/// Runs every analyzer stage on one project.
pub fn analyze(
    analyzer: &Analyzer,
    name: &str,
    root: &Path,
) -> Result<ProjectAnalysis, AnalysisError> {
    let project = analyzer.initialize(name, root)?;
    let sources = analyzer.identify(&project)?;
    let extraction = analyzer.extract(&project, &sources)?;
    let extraction = analyzer.interpret(&project, extraction)?;
    info!(
        "{}: analyzed {} files, {} call sites",
        project.name,
        extraction.results.len(),
        extraction.fragments.len()
    );
    Ok(ProjectAnalysis {
        project,
        extraction,
    })
}

/// Tags the analyzed files and writes the tagging artifacts.
pub fn tag(
    analysis: &mut ProjectAnalysis,
    vocabulary: Vocabulary,
    config: &Config,
) -> Result<TaggingReport, AnalysisError> {
    let name = analysis.project.name.as_str();
    let truth = config.ground_truth_for(name);
    let results = &mut analysis.extraction.results;
    let report = match vocabulary {
        Vocabulary::Automatic => {
            tag_files_fully_automated(name, results, &config.tagging, truth)?
        }
        Vocabulary::Supplied(details) => {
            tag_files_semi_automated(name, results, details, &config.tagging, truth)?
        }
    };
    info!(
        "{name}: {} of {} files tagged data-access",
        report.results.positives().count(),
        report.results.files.len()
    );
    Ok(report)
}

/// Folds the analysis into a repository tree.
///
/// File metadata is inserted first, then each call site under its file.
pub fn assemble(analysis: &ProjectAnalysis) -> Result<Repository, AnalysisError> {
    let mut entries: Vec<(TreeEntry, Vec<Concept>)> = analysis
        .extraction
        .results
        .iter()
        .map(|result| {
            let concepts = result.tokens.keys().cloned().collect();
            (TreeEntry::File(FileEntry::from(result)), concepts)
        })
        .collect();
    for record in &analysis.extraction.fragments {
        entries.push((
            TreeEntry::Fragment(record.to_code_fragment()?),
            record.concepts.clone(),
        ));
    }
    let project = &analysis.project;
    Ok(build_directory_tree(
        &project.local_id(),
        project.canonical.as_deref(),
        entries,
    ))
}

/// Analyzes, tags and assembles one project.
pub fn run(
    analyzer: &Analyzer,
    name: &str,
    root: &Path,
    vocabulary: Vocabulary,
    config: &Config,
) -> Result<PipelineReport, AnalysisError> {
    let mut analysis = analyze(analyzer, name, root)?;
    let tagging = tag(&mut analysis, vocabulary, config)?;
    let tree = assemble(&analysis)?;
    Ok(PipelineReport {
        analysis,
        tagging,
        tree,
    })
}
