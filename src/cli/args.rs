//! Command line argument parsing for the boolsearch CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::query::SearchMode;

/// boolsearch - inverted index and boolean search over HTML documents
#[derive(Parser, Debug, Clone)]
#[command(name = "boolsearch")]
#[command(about = "Build, query and inspect a boolean inverted index")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BoolSearchArgs {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Index configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BoolSearchArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1).min(3)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build an index from a directory of HTML files
    Build(BuildArgs),

    /// Search an index
    Search(SearchArgs),

    /// Show index statistics
    Stats(StatsArgs),

    /// Show the title and text extracted from an HTML file
    Parse(ParseArgs),

    /// Index a few built-in documents and run sample queries
    Demo,
}

/// Arguments for building an index
#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// Directory containing *.html / *.htm files
    #[arg(value_name = "DOCS_DIR")]
    pub docs_dir: PathBuf,

    /// Index file to write
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Id assigned to the first document
    #[arg(long, default_value = "1")]
    pub first_id: u32,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Index file to read
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// How the query terms are combined (auto: one term is looked up, several are ANDed)
    #[arg(short, long, default_value = "auto")]
    pub mode: SearchMode,

    /// Use the query terms as typed instead of running them through the analyzer
    #[arg(long)]
    pub raw: bool,

    /// Maximum number of document ids to show (0 = all)
    #[arg(short, long, default_value = "0")]
    pub limit: usize,

    /// Directory the index was built from; its documents form the NOT universe.
    /// Without it the universe is every document that has at least one term,
    /// so documents that produced no terms never match NOT.
    #[arg(long, value_name = "DOCS_DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Id of the first document in --docs-dir, as given to build
    #[arg(long, default_value = "1")]
    pub first_id: u32,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Index file to read
    #[arg(value_name = "INDEX_FILE")]
    pub index_file: PathBuf,

    /// Number of most frequent terms to list
    #[arg(short, long, default_value = "10")]
    pub top: usize,
}

/// Arguments for parsing a single HTML file
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// HTML file to parse
    #[arg(value_name = "HTML_FILE")]
    pub html_file: PathBuf,

    /// Also list the terms the analyzer produces
    #[arg(long)]
    pub terms: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
