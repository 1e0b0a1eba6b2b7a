//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical allocation table: push values onto any row, keep subtotals consistent
#[derive(Parser, Debug)]
#[command(name = "alloctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Table file (default: `table` from config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Directory holding a local .alloctree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the table with values and variance
    Show,

    /// Print the hierarchy as a tree
    Tree,

    /// Increase a row by a percentage and print the result
    Percent {
        /// Row id
        id: String,
        /// Percentage increase (non-negative)
        #[arg(allow_hyphen_values = true)]
        percentage: f64,
    },

    /// Set a row to an absolute value and print the result
    Value {
        /// Row id
        id: String,
        /// New value (non-negative)
        #[arg(allow_hyphen_values = true)]
        value: f64,
        /// Apply a value of 0 without asking
        #[arg(short, long)]
        yes: bool,
    },

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
    /// Show effective settings
    Show,
    /// Print a template config file
    Template,
    /// Show config file locations
    Path,
}
