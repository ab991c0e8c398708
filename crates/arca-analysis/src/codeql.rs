//! Analysis driven by the external engine's CSV output.
//!
//! Running the engine is someone else's job; this analyzer reads the CSV it
//! left behind. Each file is profiled from the samples and tokens of the call
//! sites detected in it, so files without call sites get an empty profile. A
//! call site's concepts are ranked against every sample of its file.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use arca_concepts::{Concept, FileAnalysisResult, count_lines_of_code, sort_by_tf_idf};
use log::{debug, info};

use crate::{
    AnalysisError, AnalyzerContext, Extraction, FragmentRecord, Project, SourceFile,
    StaticAnalyzer, parse_alerts, read_source,
};

/// Consumes a CSV of detected call sites.
#[derive(Debug, Clone)]
pub struct CodeQlAnalyzer {
    /// Shared settings and compiled state.
    context: AnalyzerContext,
    /// Path of the engine's CSV output.
    csv: PathBuf,
}

impl CodeQlAnalyzer {
    /// Creates the analyzer for one CSV file.
    pub fn new(context: AnalyzerContext, csv: PathBuf) -> Self {
        Self { context, csv }
    }

    /// The shared context.
    pub fn context(&self) -> &AnalyzerContext {
        &self.context
    }

    /// Path of the CSV being consumed.
    pub fn csv(&self) -> &Path {
        &self.csv
    }
}

/// Orders a call site's concepts by relevance to all samples of its file.
fn rank_by_file(concepts: Vec<Concept>, samples: Option<&str>) -> Vec<Concept> {
    let names = concepts.iter().map(|c| c.as_str().to_string()).collect();
    let mut by_name: HashMap<String, Concept> = concepts
        .into_iter()
        .map(|c| (c.as_str().to_string(), c))
        .collect();
    sort_by_tf_idf(names, samples)
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .collect()
}

impl StaticAnalyzer for CodeQlAnalyzer {
    fn initialize(&self, name: &str, root: &Path) -> Result<Project, AnalysisError> {
        let project = self.context.open(name, root)?;
        if !self.csv.is_file() {
            return Err(AnalysisError::fail(
                name,
                format!("no analysis output at {}", self.csv.display()),
            ));
        }
        Ok(project)
    }

    fn identify(&self, project: &Project) -> Result<Vec<SourceFile>, AnalysisError> {
        self.context.sources(project)
    }

    fn extract(
        &self,
        project: &Project,
        sources: &[SourceFile],
    ) -> Result<Extraction, AnalysisError> {
        let text = fs::read_to_string(&self.csv).map_err(|e| {
            AnalysisError::fail(
                &project.name,
                format!("cannot read {}: {e}", self.csv.display()),
            )
        })?;
        let alerts = parse_alerts(&text)?;
        info!("{}: {} call sites in {}", project.name, alerts.len(), self.csv.display());

        let extractor = &self.context.extractor;
        let mut samples: BTreeMap<String, String> = BTreeMap::new();
        let mut detected = Vec::with_capacity(alerts.len());
        for alert in alerts {
            let relative = alert.relative_path().to_string();
            let text = alert.text();
            let concepts = extractor.extract(&relative, &text)?;
            let sample = samples.entry(relative.clone()).or_default();
            sample.push_str(&text);
            sample.push('\n');
            detected.push((relative, alert, concepts));
        }

        let mut records: BTreeMap<String, Vec<FragmentRecord>> = BTreeMap::new();
        for (relative, alert, concepts) in detected {
            let concepts = rank_by_file(concepts, samples.get(&relative).map(String::as_str));
            records
                .entry(relative)
                .or_default()
                .push(FragmentRecord::from_alert(project, alert, concepts));
        }

        let repository = project.id();
        let mut results = Vec::with_capacity(sources.len());
        let mut fragments = Vec::new();
        for source in sources {
            let relative = source.relative();
            let content = read_source(&source.abs_path, self.context.analysis.sample_size)
                .map_err(|e| AnalysisError::fail(&project.name, e.to_string()))?;
            let lines = count_lines_of_code(&content);
            let text = samples.get(&relative).map_or("", String::as_str);
            let tokens = extractor.profile(&relative, text)?;
            results.push(FileAnalysisResult::new(
                &repository,
                project.location(&relative, None),
                tokens,
                lines,
            ));
            for mut record in records.remove(&relative).unwrap_or_default() {
                record.file_number_of_lines_of_code = lines;
                fragments.push(record);
            }
        }

        for (relative, rest) in records {
            debug!(
                "{}: {relative} is not a discovered source, keeping {} call sites",
                project.name,
                rest.len()
            );
            fragments.extend(rest);
        }

        Ok(Extraction { results, fragments })
    }

    fn interpret(
        &self,
        project: &Project,
        extraction: Extraction,
    ) -> Result<Extraction, AnalysisError> {
        self.context.rank(project, extraction)
    }
}
