//! Implementation of `arca status`.

use std::process::ExitCode;

use arca_config::{ConfigWarning, discover_config_files, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, tagging setup, ground truth and validation warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("arca init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        if is_global_config(path) {
            println!("   {} {}", path.display(), dim("(global)"));
        } else {
            println!("   {}", path.display());
        }
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Tagging:"));
    if config.tagging.data_concepts.is_empty() {
        println!(
            "   fully automated {}",
            dim(&format!("(top {} concepts)", config.tagging.top_n))
        );
    } else {
        println!(
            "   semi-automated {}",
            dim(&format!("({})", config.tagging.data_concepts.join(", ")))
        );
    }
    if let Some(anchors) = &config.tagging.anchor_points {
        println!("   anchors {}", dim(&format!("({})", anchors.join(", "))));
    }
    println!(
        "   artifacts {}",
        dim(&format!("-> {}", config.tagging.output_dir.display()))
    );
    println!();

    println!("{}", subheader("Patterns:"));
    for pattern in &config.analysis.include {
        println!("   + {pattern}");
    }
    for pattern in &config.analysis.exclude {
        println!("   - {pattern}");
    }
    println!();

    if !config.ground_truth.is_empty() {
        println!("{}", subheader("Ground truth:"));
        for truth in &config.ground_truth {
            println!(
                "   {} {}",
                truth.project,
                dim(&format!("({} data files)", truth.data_files.len()))
            );
        }
        println!();
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::ThresholdOutOfRange { .. } => {
                "Hint: threshold_density is a ratio of occurrences to lines, usually 0.1 to 0.5"
            }
            ConfigWarning::TopNZero => "Hint: set tagging.top_n to a positive number",
            ConfigWarning::NoIncludePatterns => "Hint: add globs to analysis.include",
            ConfigWarning::AnchorsWithoutConcepts => {
                "Hint: anchors only apply with tagging.data_concepts"
            }
            ConfigWarning::PathMissing { .. } => "Hint: check paths in the [concepts] section",
        };
        println!("{}", dim(hint));
    }
}
