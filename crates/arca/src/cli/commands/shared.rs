//! Shared helpers for command implementations.

use std::{fs, path::Path};

use arca_analysis::{
    AnalysisError, Analyzer, AnalyzerKind, ProjectAnalysis, analyze, project_name,
};

use crate::cli::{args::ProjectArgs, context::CommandContext};

/// Opens and analyzes a project directory given on the command line.
pub fn analyze_project(
    ctx: &CommandContext,
    kind: AnalyzerKind,
    dir: &Path,
    name: Option<&str>,
    csv: Option<&Path>,
) -> Result<ProjectAnalysis, AnalysisError> {
    let root = ctx.resolve(dir);
    let root = fs::canonicalize(&root).map_err(|source| AnalysisError::Io {
        path: root.clone(),
        source,
    })?;
    let name = name.map_or_else(|| project_name(&root), str::to_string);
    let analyzer = Analyzer::new(kind, &ctx.config, csv.map(|p| ctx.resolve(p)))?;
    analyze(&analyzer, &name, &root)
}

/// Analyzes the project selected by shared project arguments.
pub fn analyze_args(
    ctx: &CommandContext,
    args: &ProjectArgs,
) -> Result<ProjectAnalysis, AnalysisError> {
    analyze_project(
        ctx,
        args.kind(),
        &args.dir,
        args.name.as_deref(),
        args.csv.as_deref(),
    )
}
