//! Assetgraph - asset bundle dependency analyzer
//!
//! Reads the asset bundle classes of a project, builds the dependency
//! graph between them and answers ordering, cycle and usage questions.
//!
//! ```text
//! project root ─► ProjectAssetIndex ─► DependencyGraph ─► order / cycles / usage
//!                  (extractor + parser)
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod project;
pub mod ui;

pub use descriptor::AssetDescriptor;
pub use error::{AssetGraphError, Result};
pub use graph::{Analysis, DependencyGraph};
pub use project::ProjectAssetIndex;
