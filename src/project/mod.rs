//! Per-request index of every asset descriptor in a project
//!
//! [`ProjectAssetIndex`] walks the project's extraction roots once and
//! keeps the result, so every analysis in a request shares one
//! descriptor set instead of walking the tree again.
//!
//! Root discovery follows the project configuration:
//! - application roots (`assets/`): no owning module
//! - module directories (`modules/`): each immediate subdirectory is a
//!   module, named after the directory
//! - widget roots (`widgets/`): no owning module
//!
//! Discovered roots that do not exist are skipped. Roots passed in
//! explicitly must exist.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{DuplicatePolicy, ProjectConfig};
use crate::descriptor::AssetDescriptor;
use crate::error::{Result, descriptor, project};
use crate::extractor::{ExtractionRoot, Extractor};
use crate::graph::DependencyGraph;

/// Two descriptors that derived the same name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameConflict {
    pub name: String,
    /// Source of the descriptor that was replaced
    pub shadowed: PathBuf,
    /// Source of the descriptor that took its place
    pub kept: PathBuf,
}

/// All descriptors of one project, extracted once
#[derive(Debug, Clone)]
pub struct ProjectAssetIndex {
    root: PathBuf,
    config: ProjectConfig,
    descriptors: Vec<AssetDescriptor>,
    conflicts: Vec<NameConflict>,
}

impl ProjectAssetIndex {
    /// Index a project using the roots from its configuration
    ///
    /// # Errors
    ///
    /// Returns `AssetGraphError::ProjectRootNotFound` if `root` is not a
    /// directory, or `AssetGraphError::DuplicateDescriptor` under the
    /// `reject` duplicate policy.
    pub fn open(root: &Path, config: ProjectConfig) -> Result<Self> {
        let root = canonical_root(root)?;
        let roots = discover_roots(&root, &config);
        Self::extract(root, config, &roots)
    }

    /// Index a project using explicit roots instead of discovery
    ///
    /// Relative roots are taken relative to the project root.
    ///
    /// # Errors
    ///
    /// As [`open`](Self::open), plus `AssetGraphError::RootNotFound` if an
    /// explicit root is missing.
    pub fn with_roots(root: &Path, config: ProjectConfig, roots: &[ExtractionRoot]) -> Result<Self> {
        let root = canonical_root(root)?;
        let roots: Vec<ExtractionRoot> = roots
            .iter()
            .map(|r| ExtractionRoot {
                // without `.` components
                path: root.join(&r.path).components().collect(),
                ..r.clone()
            })
            .collect();
        Self::extract(root, config, &roots)
    }

    fn extract(root: PathBuf, config: ProjectConfig, roots: &[ExtractionRoot]) -> Result<Self> {
        let mut descriptors = Vec::new();
        {
            let extractor = Extractor::new(&config, &root)?;
            for extraction_root in roots {
                descriptors.extend(extractor.extract(extraction_root)?);
            }
        }

        let index = Self::from_descriptors(root, config, descriptors)?;
        tracing::info!(
            project = %index.root.display(),
            roots = roots.len(),
            descriptors = index.descriptors.len(),
            conflicts = index.conflicts.len(),
            "indexed asset descriptors"
        );
        Ok(index)
    }

    /// Build an index from already extracted descriptors
    ///
    /// The same source file seen twice (overlapping roots) is kept once.
    /// Distinct files with the same name are handled per the configured
    /// duplicate policy: under `shadow` the later descriptor replaces the
    /// earlier one in place and a [`NameConflict`] is recorded.
    pub fn from_descriptors(
        root: PathBuf,
        config: ProjectConfig,
        descriptors: Vec<AssetDescriptor>,
    ) -> Result<Self> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut seen_files: HashSet<PathBuf> = HashSet::new();
        let mut kept: Vec<AssetDescriptor> = Vec::new();
        let mut conflicts = Vec::new();

        for candidate in descriptors {
            if !candidate.source_file_path.as_os_str().is_empty()
                && !seen_files.insert(candidate.source_file_path.clone())
            {
                continue;
            }

            let Some(&position) = positions.get(&candidate.name) else {
                positions.insert(candidate.name.clone(), kept.len());
                kept.push(candidate);
                continue;
            };

            let existing = &kept[position];
            if config.duplicates == DuplicatePolicy::Reject {
                return Err(descriptor::duplicate(
                    candidate.name.clone(),
                    existing.source_file_path.display().to_string(),
                    candidate.source_file_path.display().to_string(),
                ));
            }

            tracing::warn!(
                "descriptor '{}' in {} shadows {}",
                candidate.name,
                candidate.source_file_path.display(),
                existing.source_file_path.display()
            );
            conflicts.push(NameConflict {
                name: candidate.name.clone(),
                shadowed: existing.source_file_path.clone(),
                kept: candidate.source_file_path.clone(),
            });
            kept[position] = candidate;
        }

        Ok(Self {
            root,
            config,
            descriptors: kept,
            conflicts,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Descriptors in extraction order, one per name
    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.descriptors
    }

    pub fn conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    /// Dependency graph over the indexed descriptors
    pub fn graph(&self) -> DependencyGraph<'_> {
        DependencyGraph::build(&self.descriptors)
            .with_external_namespaces(&self.config.external_namespaces)
    }
}

fn canonical_root(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(project::root_missing(root.display().to_string()));
    }
    dunce::canonicalize(root).map_err(|_| project::root_missing(root.display().to_string()))
}

/// Sorted immediate subdirectories of `dir`
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("cannot list {}: {err}", dir.display());
            return Vec::new();
        }
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

/// Extraction roots for a project, per its configuration
///
/// Only existing directories are returned, in order: application roots,
/// then module roots, then widget roots.
pub fn discover_roots(project_root: &Path, config: &ProjectConfig) -> Vec<ExtractionRoot> {
    let mut roots = Vec::new();

    for dir in &config.roots.application {
        let path = project_root.join(dir);
        if path.is_dir() {
            roots.push(ExtractionRoot::application(path));
        } else {
            tracing::debug!("no application root at {}", path.display());
        }
    }

    for dir in &config.roots.modules {
        let path = project_root.join(dir);
        if !path.is_dir() {
            tracing::debug!("no module directory at {}", path.display());
            continue;
        }
        for module_dir in subdirectories(&path) {
            let Some(module) = module_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };
            roots.push(ExtractionRoot::module(module_dir, module));
        }
    }

    for dir in &config.roots.widgets {
        let path = project_root.join(dir);
        if path.is_dir() {
            roots.push(ExtractionRoot::widget(path));
        } else {
            tracing::debug!("no widget root at {}", path.display());
        }
    }

    roots
}
