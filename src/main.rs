//! Assetgraph - asset bundle dependency analyzer
//!
//! Command line entry point: parses arguments, sets up logging and
//! dispatches to the command implementations.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use assetgraph::cli::{Cli, Commands};
use assetgraph::commands::{self, ProjectOptions};

/// Log to stderr; stdout carries command output
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "assetgraph=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = ProjectOptions::from_cli(&cli);
    let result = match cli.command {
        Commands::List => commands::list::run(&options),
        Commands::Order(args) => commands::order::run(&options, args),
        Commands::Cycles => commands::cycles::run(&options),
        Commands::Analyze(args) => commands::analyze::run(&options, args),
        Commands::Show(args) => commands::show::run(&options, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        if let Some(help) = e.help() {
            eprintln!("  help: {help}");
        }
        std::process::exit(1);
    }
}
