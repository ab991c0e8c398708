//! Implementation of `arca concepts`.

use std::{fs, process::ExitCode};

use arca_concepts::ConceptExtractor;

use crate::cli::{
    args::ConceptsCommand,
    context::CommandContext,
    output::{dim, fail, print_json},
};

/// Prints the concepts mined from one source file.
pub fn run(ctx: &CommandContext, cmd: &ConceptsCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return fail(format!("failed to read {}: {e}", path.display())),
    };
    let extractor = match ConceptExtractor::from_settings(&ctx.config.concepts) {
        Ok(extractor) => extractor,
        Err(e) => return fail(e),
    };
    let file_name = path.to_string_lossy();
    let concepts = match extractor.extract(&file_name, &content) {
        Ok(concepts) => concepts,
        Err(e) => return fail(e),
    };

    if cmd.output.json {
        return print_json(&concepts);
    }
    if concepts.is_empty() {
        println!("{}", dim("(no concepts)"));
    }
    for concept in &concepts {
        println!("{concept}");
    }
    ExitCode::SUCCESS
}
