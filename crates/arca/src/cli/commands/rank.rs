//! Implementation of `arca rank`.

use std::process::ExitCode;

use arca_concepts::aggregate;

use crate::cli::{
    args::RankCommand,
    context::CommandContext,
    output::{concept_table, dim, fail, print_json, subheader},
};

use super::shared::analyze_args;

/// Prints the project's top concepts, summed over all files.
pub fn run(ctx: &CommandContext, cmd: &RankCommand) -> ExitCode {
    let analysis = match analyze_args(ctx, &cmd.project) {
        Ok(analysis) => analysis,
        Err(e) => return fail(e),
    };
    let limit = cmd.limit.unwrap_or(ctx.config.tagging.top_n);
    let mut ranked = aggregate(&analysis.extraction.results);
    ranked.truncate(limit);

    if cmd.output.json {
        return print_json(&ranked);
    }

    println!(
        "{}",
        subheader(&format!(
            "{} ({} files)",
            analysis.project.id(),
            analysis.extraction.results.len()
        ))
    );
    if ranked.is_empty() {
        println!("{}", dim("(no significant concepts)"));
    } else {
        println!("{}", concept_table(&ranked));
    }
    ExitCode::SUCCESS
}
