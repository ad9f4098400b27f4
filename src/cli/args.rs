//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::RenderStyle;

/// Validate that (parent,child) edges form a single well-formed binary search tree
#[derive(Parser, Debug)]
#[command(name = "bstcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .bstcheck.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an edge list, e.g. `bstcheck check "(2,1)" "(4,2)" "(4,7)"`
    Check {
        /// Edge tokens of the form (parent,child)
        tokens: Vec<String>,

        /// Read edges from a file ("-" for stdin)
        #[arg(short, long, value_hint = ValueHint::FilePath, conflicts_with = "tokens")]
        file: Option<PathBuf>,

        /// Reject malformed tokens instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Diagram style for a valid tree
        #[arg(long, value_enum)]
        render: Option<RenderStyle>,
    },

    /// Run the built-in example edge lists
    Demo,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Print a commented config template
    Template,
}
