//! The analyzer capability interface.
//!
//! An analyzer takes a project through four stages: `initialize` opens it,
//! `identify` lists its sources, `extract` builds per-file profiles and
//! fragments, and `interpret` ranks the profiles against the project corpus.
//! Each stage also has a list form that runs it over several projects.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use arca_concepts::{ConceptExtractor, FileAnalysisResult, rank_profiles};
use arca_config::{AnalysisSettings, Config, ScoringSettings, SourcePatterns};
use log::info;

use crate::{
    AnalysisError, CodeQlAnalyzer, FragmentRecord, NlpAnalyzer, Project, SourceFile,
    discover_sources,
};

/// What extraction produced for one project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// One profile per source file.
    pub results: Vec<FileAnalysisResult>,
    /// Detected call sites; empty for pure concept analysis.
    pub fragments: Vec<FragmentRecord>,
}

/// The four analysis stages.
pub trait StaticAnalyzer {
    /// Opens the project rooted at `root`.
    fn initialize(&self, name: &str, root: &Path) -> Result<Project, AnalysisError>;

    /// Lists the source files to analyze.
    fn identify(&self, project: &Project) -> Result<Vec<SourceFile>, AnalysisError>;

    /// Profiles the sources.
    fn extract(
        &self,
        project: &Project,
        sources: &[SourceFile],
    ) -> Result<Extraction, AnalysisError>;

    /// Ranks the profiles against the project corpus.
    fn interpret(
        &self,
        project: &Project,
        extraction: Extraction,
    ) -> Result<Extraction, AnalysisError>;

    /// Opens several projects.
    fn initialize_all(&self, roots: &[(String, PathBuf)]) -> Result<Vec<Project>, AnalysisError> {
        roots
            .iter()
            .map(|(name, root)| self.initialize(name, root))
            .collect()
    }

    /// Lists the sources of several projects.
    fn identify_all(&self, projects: &[Project]) -> Result<Vec<Vec<SourceFile>>, AnalysisError> {
        projects.iter().map(|p| self.identify(p)).collect()
    }

    /// Profiles several projects; `sources` pairs with `projects` by index.
    fn extract_all(
        &self,
        projects: &[Project],
        sources: &[Vec<SourceFile>],
    ) -> Result<Vec<Extraction>, AnalysisError> {
        projects
            .iter()
            .zip(sources)
            .map(|(p, s)| self.extract(p, s))
            .collect()
    }

    /// Ranks several projects; `extractions` pairs with `projects` by index.
    fn interpret_all(
        &self,
        projects: &[Project],
        extractions: Vec<Extraction>,
    ) -> Result<Vec<Extraction>, AnalysisError> {
        projects
            .iter()
            .zip(extractions)
            .map(|(p, e)| self.interpret(p, e))
            .collect()
    }
}

/// Settings and compiled state shared by every analyzer variant.
#[derive(Debug, Clone)]
pub struct AnalyzerContext {
    /// Concept extraction pipeline.
    pub extractor: ConceptExtractor,
    /// Compiled include/exclude patterns.
    pub patterns: SourcePatterns,
    /// Discovery settings.
    pub analysis: AnalysisSettings,
    /// Batch scoring settings.
    pub scoring: ScoringSettings,
    /// Per-file cap on ranked concepts.
    pub max_concepts_per_file: Option<usize>,
}

impl AnalyzerContext {
    /// Builds the context from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        Ok(Self {
            extractor: ConceptExtractor::from_settings(&config.concepts)?,
            patterns: config.compile_patterns()?,
            analysis: config.analysis.clone(),
            scoring: config.scoring.clone(),
            max_concepts_per_file: config.concepts.max_concepts_per_file,
        })
    }

    /// Opens a project, reading its marker file.
    pub fn open(&self, name: &str, root: &Path) -> Result<Project, AnalysisError> {
        Project::open(name, root, &self.analysis.marker_file)
    }

    /// Walks the project for sources.
    pub fn sources(&self, project: &Project) -> Result<Vec<SourceFile>, AnalysisError> {
        discover_sources(project, &self.patterns)
    }

    /// Ranks every profile of an extraction in one batch.
    pub fn rank(
        &self,
        project: &Project,
        mut extraction: Extraction,
    ) -> Result<Extraction, AnalysisError> {
        rank_profiles(
            &mut extraction.results,
            &self.scoring,
            self.max_concepts_per_file,
        )?;
        info!(
            "{}: ranked {} files",
            project.name,
            extraction.results.len()
        );
        Ok(extraction)
    }
}

/// Selects an analyzer variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    /// Fragments from the analysis engine's CSV, profiled from their samples.
    CodeQlCsv,
    /// Whole-file concept profiles, no fragments.
    Nlp,
}

impl FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "codeql" | "codeql-csv" | "csv" => Ok(Self::CodeQlCsv),
            "nlp" => Ok(Self::Nlp),
            other => Err(format!("unknown analyzer: {other}")),
        }
    }
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodeQlCsv => write!(f, "codeql-csv"),
            Self::Nlp => write!(f, "nlp"),
        }
    }
}

/// An analyzer of either variant.
#[derive(Debug, Clone)]
pub enum Analyzer {
    /// CSV-backed analyzer.
    CodeQlCsv(CodeQlAnalyzer),
    /// Concept-only analyzer.
    Nlp(NlpAnalyzer),
}

impl Analyzer {
    /// Creates the analyzer of the given kind.
    ///
    /// The CSV-backed variant requires the path of the engine's output.
    pub fn new(
        kind: AnalyzerKind,
        config: &Config,
        csv: Option<PathBuf>,
    ) -> Result<Self, AnalysisError> {
        let context = AnalyzerContext::from_config(config)?;
        match kind {
            AnalyzerKind::CodeQlCsv => {
                let csv = csv.ok_or(AnalysisError::MissingInput {
                    what: "analysis CSV",
                })?;
                Ok(Self::CodeQlCsv(CodeQlAnalyzer::new(context, csv)))
            }
            AnalyzerKind::Nlp => Ok(Self::Nlp(NlpAnalyzer::new(context))),
        }
    }

    /// The variant tag.
    pub fn kind(&self) -> AnalyzerKind {
        match self {
            Self::CodeQlCsv(_) => AnalyzerKind::CodeQlCsv,
            Self::Nlp(_) => AnalyzerKind::Nlp,
        }
    }

    /// The shared context.
    pub fn context(&self) -> &AnalyzerContext {
        match self {
            Self::CodeQlCsv(a) => a.context(),
            Self::Nlp(a) => a.context(),
        }
    }
}

impl StaticAnalyzer for Analyzer {
    fn initialize(&self, name: &str, root: &Path) -> Result<Project, AnalysisError> {
        match self {
            Self::CodeQlCsv(a) => a.initialize(name, root),
            Self::Nlp(a) => a.initialize(name, root),
        }
    }

    fn identify(&self, project: &Project) -> Result<Vec<SourceFile>, AnalysisError> {
        match self {
            Self::CodeQlCsv(a) => a.identify(project),
            Self::Nlp(a) => a.identify(project),
        }
    }

    fn extract(
        &self,
        project: &Project,
        sources: &[SourceFile],
    ) -> Result<Extraction, AnalysisError> {
        match self {
            Self::CodeQlCsv(a) => a.extract(project, sources),
            Self::Nlp(a) => a.extract(project, sources),
        }
    }

    fn interpret(
        &self,
        project: &Project,
        extraction: Extraction,
    ) -> Result<Extraction, AnalysisError> {
        match self {
            Self::CodeQlCsv(a) => a.interpret(project, extraction),
            Self::Nlp(a) => a.interpret(project, extraction),
        }
    }
}
