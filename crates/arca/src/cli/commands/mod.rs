//! Command implementations and dispatch.

pub mod concepts;
pub mod config;
pub mod init;
pub mod rank;
mod shared;
pub mod status;
pub mod tag;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Concepts(cmd) => concepts::run(ctx, &cmd),
        Commands::Rank(cmd) => rank::run(ctx, &cmd),
        Commands::Tag(cmd) => tag::run(ctx, &cmd),
        Commands::Tree(cmd) => tree::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Status => status::run(ctx),
    }
}
