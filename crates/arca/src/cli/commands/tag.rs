//! Implementation of `arca tag`.

use std::{path::PathBuf, process::ExitCode};

use arca_analysis::{AnalysisError, Vocabulary, tag};
use arca_tagging::{ClassificationMetrics, ClusteringResults, DbDetails};
use log::warn;
use serde::Serialize;

use crate::cli::{
    args::TagCommand,
    context::CommandContext,
    output::{classification_table, dim, fail, metrics_table, print_json, subheader, success},
};

use super::shared::analyze_args;

/// JSON output for `arca tag`.
#[derive(Serialize)]
struct JsonTagOutput<'a> {
    /// Per-file outcomes and the vocabulary used.
    results: &'a ClusteringResults,
    /// Metrics, when ground truth is registered for the project.
    #[serde(skip_serializing_if = "Option::is_none")]
    metrics: Option<&'a ClassificationMetrics>,
    /// Artifact files written.
    artifacts: &'a [PathBuf],
}

/// Tags the project's data-access files and writes the tagging artifacts.
pub fn run(ctx: &CommandContext, cmd: &TagCommand) -> ExitCode {
    let mut analysis = match analyze_args(ctx, &cmd.project) {
        Ok(analysis) => analysis,
        Err(e) => return fail(e),
    };
    let vocabulary = match vocabulary(ctx, cmd) {
        Ok(vocabulary) => vocabulary,
        Err(e) => return fail(e),
    };
    let report = match tag(&mut analysis, vocabulary, &ctx.config) {
        Ok(report) => report,
        Err(e) => return fail(e),
    };

    if cmd.output.json {
        return print_json(&JsonTagOutput {
            results: &report.results,
            metrics: report.metrics.as_ref(),
            artifacts: &report.artifacts,
        });
    }

    let results = &report.results;
    let vocabulary: Vec<&str> = results
        .details
        .data_concepts
        .iter()
        .map(|c| c.as_str())
        .collect();
    println!(
        "{}",
        subheader(&format!("{} ({})", results.project, results.mode))
    );
    println!("{}", dim(&format!("vocabulary: {}", vocabulary.join(", "))));
    if let Some(anchors) = &results.details.anchor_points {
        let anchors: Vec<&str> = anchors.iter().map(|c| c.as_str()).collect();
        println!("{}", dim(&format!("anchors: {}", anchors.join(", "))));
    }
    println!("{}", classification_table(&results.files));
    println!(
        "{}",
        success(&format!(
            "{} of {} files tagged data-access",
            results.positives().count(),
            results.files.len()
        ))
    );
    if let Some(metrics) = &report.metrics {
        println!();
        println!("{}", metrics_table(metrics));
    }
    for path in &report.artifacts {
        println!("{}", dim(&format!("wrote {}", path.display())));
    }
    ExitCode::SUCCESS
}

/// Picks the vocabulary from the flags, falling back to configuration.
fn vocabulary(ctx: &CommandContext, cmd: &TagCommand) -> Result<Vocabulary, AnalysisError> {
    if cmd.concepts.is_empty() {
        if !cmd.anchors.is_empty() {
            warn!("--anchor has no effect without --concept");
        }
        return Vocabulary::from_settings(&ctx.config.tagging);
    }
    let anchors = (!cmd.anchors.is_empty()).then_some(cmd.anchors.as_slice());
    Ok(Vocabulary::Supplied(DbDetails::from_strings(
        &cmd.concepts,
        anchors,
    )?))
}
