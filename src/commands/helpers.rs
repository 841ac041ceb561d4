//! Shared helpers for analysis commands

use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::error::{AssetGraphError, Result, project};
use crate::extractor::ExtractionRoot;
use crate::project::ProjectAssetIndex;

use super::ProjectOptions;

/// Get project path from CLI argument or current directory
fn project_path(options: &ProjectOptions) -> Result<PathBuf> {
    match &options.project {
        Some(path) => Ok(path.clone()),
        None => std::env::current_dir().map_err(|e| AssetGraphError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Load configuration and index the selected project
pub fn open_index(options: &ProjectOptions) -> Result<ProjectAssetIndex> {
    let root = project_path(options)?;
    if !root.is_dir() {
        return Err(project::root_missing(root.display().to_string()));
    }

    let config = ProjectConfig::load(&root, options.config.as_deref())?;

    if options.roots.is_empty() {
        ProjectAssetIndex::open(&root, config)
    } else {
        let roots: Vec<ExtractionRoot> = options
            .roots
            .iter()
            .map(ExtractionRoot::application)
            .collect();
        ProjectAssetIndex::with_roots(&root, config, &roots)
    }
}
