use clap::{Args as ClapArgs, Parser, Subcommand};
use engine::FilterTag;
use parsers::DEFAULT_MAX_FILE_SIZE;
use std::path::PathBuf;

use crate::output::Format;

fn parse_filter_tag(s: &str) -> Result<FilterTag, String> {
    s.parse()
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Refactor Toolbox - browse and search the syntax tree of a source file",
    long_about = "Refactor Toolbox parses a source file into an abstract syntax tree and lets you explore it from the terminal.

Every property of every node is indexed by name and value, so a filter such as `name=foo` finds all nodes carrying that pair. Several filters combine with OR.

Examples:
  refactor-toolbox parsers                          # Languages and parser ids
  refactor-toolbox terms src/app.js --key name      # Values seen under `name`
  refactor-toolbox search src/app.js -f name=foo    # Nodes with name == foo
  refactor-toolbox tree src/app.js -f type=IfStatement --show start",
    subcommand_required = true
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
    /// Suppress all log output
    #[arg(long, global = true)]
    pub quiet: bool,
    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported languages and their parsers
    Parsers,
    /// List property names and the values seen under them
    Terms(TermsArgs),
    /// Find nodes matching tag=term filters
    Search(SearchArgs),
    /// Render the (filtered) tree
    Tree(TreeArgs),
}

/// Which file to load and how to parse it.
#[derive(ClapArgs, Debug, Clone)]
pub struct SourceArgs {
    /// Source file to parse
    pub file: PathBuf,
    /// Language name; detected from the file extension when omitted
    #[arg(long, short = 'l')]
    pub language: Option<String>,
    /// Parser id; defaults to the configured or first parser of the language
    #[arg(long, short = 'p')]
    pub parser: Option<String>,
    /// Maximum file size to load (in bytes, 0 disables the limit)
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_SIZE)]
    pub max_file_size: u64,
}

#[derive(ClapArgs)]
pub struct TermsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Only list values of this property, as filter suggestions
    #[arg(long, short = 'k')]
    pub key: Option<String>,
    /// Keep suggestions containing this text (case-insensitive)
    #[arg(long = "match", short = 'm', requires = "key")]
    pub query: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(ClapArgs)]
pub struct SearchArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Filter as tag=term; repeat to match any of several
    #[arg(long = "filter", short = 'f', value_parser = parse_filter_tag)]
    pub filters: Vec<FilterTag>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
    /// Print the source text of each match
    #[arg(long = "source")]
    pub show_source: bool,
}

#[derive(ClapArgs)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    /// Filter as tag=term; repeat to match any of several
    #[arg(long = "filter", short = 'f', value_parser = parse_filter_tag)]
    pub filters: Vec<FilterTag>,
    /// Show this property in addition to the default keys
    #[arg(long = "show")]
    pub show: Vec<String>,
    /// Hide this property
    #[arg(long = "hide")]
    pub hide: Vec<String>,
    /// Show every property
    #[arg(long = "all-keys")]
    pub all_keys: bool,
    /// Collapse the node at this path
    #[arg(long = "collapse")]
    pub collapse: Vec<String>,
    /// Render only the node at this path of the unfiltered tree
    #[arg(long = "at", conflicts_with = "filters")]
    pub at: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
