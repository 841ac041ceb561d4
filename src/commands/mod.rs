//! Command implementations for the assetgraph CLI
//!
//! Every analysis command opens one [`ProjectAssetIndex`] per invocation
//! and answers from it.

pub mod analyze;
pub mod completions;
pub mod cycles;
pub mod helpers;
pub mod list;
pub mod order;
pub mod show;
pub mod version;

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Project selection and output options shared by analysis commands
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Project root; current directory when absent
    pub project: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Explicit extraction roots, replacing discovery when non-empty
    pub roots: Vec<PathBuf>,
    pub format: OutputFormat,
}

impl ProjectOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            project: cli.project.clone(),
            config: cli.config.clone(),
            roots: cli.roots.clone(),
            format: cli.format,
        }
    }
}
