//! Rendering and JSON serialization for CLI output.

use std::{fmt::Display, process::ExitCode};

use arca_concepts::ScoredConcept;
pub use arca_highlight::{dim, header, subheader, success, warning};
use arca_highlight::Highlighter;
use arca_tagging::{ClassificationMetrics, Cluster, FileClassification};
use arca_tree::{CodeFragment, Directory, File, Repository};
use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

/// Indentation per tree level.
const INDENT: &str = "  ";

/// Prints an error and returns failure.
pub fn fail(err: impl Display) -> ExitCode {
    eprintln!("error: {err}");
    ExitCode::FAILURE
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => fail(format!("failed to serialize JSON: {e}")),
    }
}

/// Builds a table of ranked concepts.
pub fn concept_table(concepts: &[ScoredConcept]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Concept", "Score"]);
    for (idx, concept) in concepts.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&concept.name),
            Cell::new(format!("{:.2}", concept.relevancy)),
        ]);
    }
    table
}

/// Builds a table of per-file classifications.
pub fn classification_table(files: &[FileClassification]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["File", "Density", "Cluster", "Data concepts"]);
    for file in files {
        table.add_row(vec![
            Cell::new(&file.file),
            Cell::new(format!("{:.2}", file.density)),
            Cell::new(file.cluster),
            Cell::new(file.concepts.join(", ")),
        ]);
    }
    table
}

/// Builds a table of classification metrics.
pub fn metrics_table(metrics: &ClassificationMetrics) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Accuracy", "Precision", "Recall", "F1", "TP", "TN", "FP", "FN"]);
    table.add_row(vec![
        Cell::new(metrics.accuracy),
        Cell::new(metrics.precision),
        Cell::new(metrics.recall),
        Cell::new(metrics.f1),
        Cell::new(metrics.true_positives),
        Cell::new(metrics.true_negatives),
        Cell::new(metrics.false_positives),
        Cell::new(metrics.false_negatives),
    ]);
    table
}

/// Renders a repository tree as indented text.
///
/// With a highlighter, fragment samples are syntax-highlighted.
pub fn render_tree(repo: &Repository, highlighter: Option<&Highlighter>) -> String {
    let mut out = format!("{}\n", header(&repo.path));
    for file in &repo.files {
        render_file(&mut out, file, 1, highlighter);
    }
    for dir in &repo.directories {
        render_directory(&mut out, dir, 1, highlighter);
    }
    out
}

/// Renders a directory and everything below it.
fn render_directory(out: &mut String, dir: &Directory, depth: usize, hl: Option<&Highlighter>) {
    out.push_str(&format!("{}{}/\n", INDENT.repeat(depth), subheader(&dir.name)));
    for file in &dir.files {
        render_file(out, file, depth + 1, hl);
    }
    for child in &dir.directories {
        render_directory(out, child, depth + 1, hl);
    }
}

/// Renders a file line followed by its fragments.
fn render_file(out: &mut String, file: &File, depth: usize, hl: Option<&Highlighter>) {
    let mut line = format!("{}{}", INDENT.repeat(depth), file.name);
    if file.cluster == Some(Cluster::DataAccess) {
        line.push_str(&format!(" {}", success("[data-access]")));
    }
    if let Some(loc) = file.lines_of_code {
        line.push_str(&format!(" {}", dim(&format!("{loc} loc"))));
    }
    out.push_str(&line);
    out.push('\n');
    for fragment in &file.fragments {
        render_fragment(out, fragment, depth + 1, hl);
    }
}

/// Renders one fragment: its operation line, then the indented sample.
fn render_fragment(
    out: &mut String,
    fragment: &CodeFragment,
    depth: usize,
    hl: Option<&Highlighter>,
) {
    let span = fragment
        .location
        .split_once('#')
        .map_or("", |(_, suffix)| suffix);
    out.push_str(&format!(
        "{}{} {} {} {}\n",
        INDENT.repeat(depth),
        subheader(fragment.operation.as_str()),
        fragment.method,
        dim(&fragment.technology),
        dim(span)
    ));
    let sample = match hl {
        Some(hl) => hl.highlight_sample(&fragment.sample, &fragment.location),
        None => fragment.sample.clone(),
    };
    let pad = INDENT.repeat(depth + 1);
    for line in sample.lines() {
        out.push_str(&format!("{pad}{line}\n"));
    }
}
