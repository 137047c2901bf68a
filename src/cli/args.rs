//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::Language;

/// Search a family tree and show root-to-person lineages
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Extra config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Tree data file (.json or .toml), overrides data_file from config
    #[arg(short = 'f', long, global = true, env = "FAMTREE_DATA_FILE", value_hint = ValueHint::FilePath)]
    pub data: Option<PathBuf>,

    /// Label language (english|gujarati)
    #[arg(short, long, global = true)]
    pub lang: Option<Language>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find a person and print the path from the root
    Search {
        /// Name to search (spelling variants like Mit/Meet match)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Print the result as JSON ({"found": ..., "path": [...]})
        #[arg(long)]
        json: bool,
    },

    /// Show the tree (or the subtree below a person)
    Show {
        /// Start at this person instead of the root
        #[arg(long)]
        from: Option<String>,
        /// Highlight the path to this person
        #[arg(long)]
        highlight: Option<String>,
        /// Limit the number of generations shown
        #[arg(long)]
        depth: Option<usize>,
        /// Include birth and death years
        #[arg(long)]
        years: bool,
    },

    /// Show details for one person
    Person {
        /// Name to look up
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// List persons without children
    Leaves,

    /// Show tree statistics
    Info,

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

    /// Create config template
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
