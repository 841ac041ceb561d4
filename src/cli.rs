//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Assetgraph - asset bundle dependency analyzer
///
/// Reads asset bundle classes from a project and reports registration
/// order, dependency cycles and usage.
#[derive(Parser, Debug)]
#[command(
    name = "assetgraph",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Dependency analyzer for asset bundles",
    long_about = "Assetgraph reads the asset bundle classes of a project (application, \
                  module and widget bundles), builds the dependency graph between them \
                  and reports registration order, dependency cycles and usage.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  assetgraph list\n    \
                  assetgraph order\n    \
                  assetgraph order SiteAsset\n    \
                  assetgraph cycles\n    \
                  assetgraph show AppAsset\n    \
                  assetgraph analyze --strict --format json"
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "ASSETGRAPH_PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file (defaults to assetgraph.yaml in the project)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Extraction root, relative to the project; replaces root discovery
    #[arg(long = "root", global = true, value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How command results are written to stdout
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every asset descriptor in the project
    List,

    /// Print the registration order, dependencies first
    Order(OrderArgs),

    /// Report dependency cycles
    Cycles,

    /// Order the project, or report the cycle that prevents it
    Analyze(AnalyzeArgs),

    /// Show direct dependencies and dependents of a descriptor
    Show(ShowArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the order command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Order every descriptor:\n    assetgraph order\n\n\
                  Order only what SiteAsset needs:\n    assetgraph order SiteAsset")]
pub struct OrderArgs {
    /// Restrict the order to this descriptor and its dependencies
    pub name: Option<String>,
}

/// Arguments for the analyze command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Analyze the project:\n    assetgraph analyze\n\n\
                  Fail on cycles (CI):\n    assetgraph analyze --strict")]
pub struct AnalyzeArgs {
    /// Exit with an error when a cycle is found
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show a descriptor:\n    assetgraph show AppAsset\n\n\
                  Show by class name:\n    assetgraph show 'app\\assets\\AppAsset'")]
pub struct ShowArgs {
    /// Descriptor name or fully qualified class name
    pub name: String,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    assetgraph completions bash > ~/.bash_completion.d/assetgraph\n\n\
                  Generate zsh completions:\n    assetgraph completions zsh > ~/.zfunc/_assetgraph\n\n\
                  Generate fish completions:\n    assetgraph completions fish > ~/.config/fish/completions/assetgraph.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
