//! Implementation of `arca tree`.

use std::process::ExitCode;

use arca_analysis::{AnalyzerKind, assemble};
use arca_highlight::Highlighter;

use crate::cli::{
    args::TreeCommand,
    context::CommandContext,
    output::{fail, print_json, render_tree},
};

use super::shared::analyze_project;

/// Prints the project's files and call sites as a tree.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let analysis = match analyze_project(
        ctx,
        AnalyzerKind::CodeQlCsv,
        &cmd.dir,
        cmd.name.as_deref(),
        Some(cmd.csv.as_path()),
    ) {
        Ok(analysis) => analysis,
        Err(e) => return fail(e),
    };
    let tree = match assemble(&analysis) {
        Ok(tree) => tree,
        Err(e) => return fail(e),
    };

    if cmd.output.json {
        return print_json(&tree);
    }

    let highlighter = (!cmd.plain).then(Highlighter::new);
    print!("{}", render_tree(&tree, highlighter.as_ref()));
    ExitCode::SUCCESS
}
