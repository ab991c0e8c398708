//! Clap argument definitions for the `arca` CLI.

use std::path::PathBuf;

use arca_analysis::AnalyzerKind;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "arca")]
#[command(about = "Architecture recovery - data-access tagging and domain concepts for codebases")]
pub struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `arca` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract the concepts of a single source file
    Concepts(ConceptsCommand),

    /// Rank a project's concepts across all its files
    Rank(RankCommand),

    /// Tag a project's data-access files
    Tag(TagCommand),

    /// Show a project's files and detected call sites as a tree
    Tree(TreeCommand),

    /// Initialize arca configuration in the current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Show configuration files and validation warnings
    Status,
}

impl Commands {
    /// Whether the command reads the merged configuration.
    ///
    /// `init` must work even when an existing config file is invalid.
    pub fn needs_config(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

/// Shared output flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments selecting a project and its analyzer.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project directory
    pub dir: PathBuf,

    /// Project name [default: directory name]
    #[arg(long)]
    pub name: Option<String>,

    /// CSV written by the analysis engine; profiles files from detected call sites
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl ProjectArgs {
    /// The analyzer these arguments select.
    pub fn kind(&self) -> AnalyzerKind {
        if self.csv.is_some() {
            AnalyzerKind::CodeQlCsv
        } else {
            AnalyzerKind::Nlp
        }
    }
}

/// Arguments for `arca concepts`.
#[derive(Args, Debug, Clone)]
pub struct ConceptsCommand {
    /// Source file
    pub file: PathBuf,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `arca rank`.
#[derive(Args, Debug, Clone)]
pub struct RankCommand {
    #[command(flatten)]
    /// Project selection.
    pub project: ProjectArgs,

    /// Number of concepts to show [default: tagging.top_n]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `arca tag`.
#[derive(Args, Debug, Clone)]
pub struct TagCommand {
    #[command(flatten)]
    /// Project selection.
    pub project: ProjectArgs,

    /// Data concept; repeat for several. Without any, the configured vocabulary
    /// is used, or the project's top concepts if none is configured
    #[arg(short = 'c', long = "concept")]
    pub concepts: Vec<String>,

    /// Anchor term that must appear in a file for a positive tag; repeatable
    #[arg(short = 'a', long = "anchor")]
    pub anchors: Vec<String>,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `arca tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeCommand {
    /// Project directory
    pub dir: PathBuf,

    /// Project name [default: directory name]
    #[arg(long)]
    pub name: Option<String>,

    /// CSV written by the analysis engine
    #[arg(long, required = true)]
    pub csv: PathBuf,

    /// Print samples without syntax highlighting
    #[arg(long)]
    pub plain: bool,

    #[command(flatten)]
    /// Output formatting flags.
    pub output: OutputArgs,
}

/// Arguments for `arca init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.arca.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}
