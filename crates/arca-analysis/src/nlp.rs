//! Whole-file concept analysis.

use std::path::Path;

use arca_concepts::profile_file;
use log::debug;

use crate::{
    AnalysisError, AnalyzerContext, Extraction, Project, SourceFile, StaticAnalyzer, read_source,
};

/// Profiles each source file from its full text.
#[derive(Debug, Clone)]
pub struct NlpAnalyzer {
    /// Shared settings and compiled state.
    context: AnalyzerContext,
}

impl NlpAnalyzer {
    /// Creates the analyzer.
    pub fn new(context: AnalyzerContext) -> Self {
        Self { context }
    }

    /// The shared context.
    pub fn context(&self) -> &AnalyzerContext {
        &self.context
    }
}

impl StaticAnalyzer for NlpAnalyzer {
    fn initialize(&self, name: &str, root: &Path) -> Result<Project, AnalysisError> {
        self.context.open(name, root)
    }

    fn identify(&self, project: &Project) -> Result<Vec<SourceFile>, AnalysisError> {
        self.context.sources(project)
    }

    fn extract(
        &self,
        project: &Project,
        sources: &[SourceFile],
    ) -> Result<Extraction, AnalysisError> {
        let repository = project.id();
        let mut results = Vec::with_capacity(sources.len());
        for source in sources {
            let content = read_source(&source.abs_path, self.context.analysis.sample_size)
                .map_err(|e| AnalysisError::fail(&project.name, e.to_string()))?;
            let file = project.location(&source.relative(), None);
            results.push(profile_file(
                &self.context.extractor,
                &repository,
                &file,
                &content,
            )?);
        }
        debug!("{}: profiled {} files", project.name, results.len());
        Ok(Extraction {
            results,
            fragments: Vec::new(),
        })
    }

    fn interpret(
        &self,
        project: &Project,
        extraction: Extraction,
    ) -> Result<Extraction, AnalysisError> {
        self.context.rank(project, extraction)
    }
}
