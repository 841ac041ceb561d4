//! Configuration file handling for assetgraph
//!
//! This module contains data structures for:
//! - `assetgraph.yaml` - Project configuration (roots, suffixes, exclusions)

pub mod project;

// Re-export commonly used types
pub use project::{CONFIG_FILE_NAME, DuplicatePolicy, ProjectConfig, RootsConfig};
