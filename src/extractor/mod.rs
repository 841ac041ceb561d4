//! Descriptor extraction from a directory tree
//!
//! This module handles:
//! - Walking an extraction root recursively, in file-name order
//! - Skipping excluded subtrees (`vendor/**` and friends)
//! - Selecting files by descriptor suffix (`AppAsset.php`, `ChartBundle.php`)
//! - Reading each file into an [`AssetDescriptor`]
//!
//! Extraction is best-effort: files that cannot be read are skipped
//! without being reported or counted. Only a missing root fails.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::config::ProjectConfig;
use crate::descriptor::{AssetDescriptor, Origin, parse_source};
use crate::error::{Result, config as config_error, project};

/// One directory to extract descriptors from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRoot {
    pub path: PathBuf,
    pub owning_module: Option<String>,
    pub origin: Origin,
}

impl ExtractionRoot {
    /// Application-level root
    pub fn application(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owning_module: None,
            origin: Origin::Application,
        }
    }

    /// Root owned by a module
    pub fn module(path: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            owning_module: Some(module.into()),
            origin: Origin::Module,
        }
    }

    /// Widget root
    pub fn widget(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owning_module: None,
            origin: Origin::Widget,
        }
    }
}

/// Reads descriptors from extraction roots
pub struct Extractor<'a> {
    config: &'a ProjectConfig,
    /// Base for exclusion globs
    project_root: &'a Path,
    excludes: Vec<Glob<'a>>,
}

impl<'a> Extractor<'a> {
    /// Create an extractor, compiling the configured exclusion globs
    pub fn new(config: &'a ProjectConfig, project_root: &'a Path) -> Result<Self> {
        let excludes = config
            .exclude
            .iter()
            .map(|pattern| {
                Glob::new(pattern).map_err(|e| {
                    config_error::invalid(format!("invalid exclude glob '{pattern}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            project_root,
            excludes,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(self.project_root) else {
            return false;
        };
        // forward slashes for platform-independent matching
        let normalized = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if normalized.is_empty() {
            return false;
        }
        let candidate = CandidatePath::from(normalized.as_str());
        self.excludes
            .iter()
            .any(|glob| glob.matched(&candidate).is_some())
    }

    fn is_descriptor_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.config.matches_suffix(name))
    }

    /// Extract every descriptor under `root`
    ///
    /// Descriptors come back in directory-traversal order, which is
    /// deterministic for a fixed filesystem state.
    ///
    /// # Errors
    ///
    /// Returns `AssetGraphError::RootNotFound` if `root.path` is not a
    /// directory.
    pub fn extract(&self, root: &ExtractionRoot) -> Result<Vec<AssetDescriptor>> {
        if !root.path.is_dir() {
            return Err(project::asset_root_missing(root.path.display().to_string()));
        }

        let mut descriptors = Vec::new();
        let walker = WalkDir::new(&root.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!("skipping unreadable entry: {err}");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.is_descriptor_file(entry.path()) {
                continue;
            }
            if let Some(descriptor) = read_descriptor(entry.path(), root) {
                descriptors.push(descriptor);
            }
        }

        tracing::debug!(
            root = %root.path.display(),
            count = descriptors.len(),
            "extracted descriptors"
        );
        Ok(descriptors)
    }
}

/// Read one descriptor file; `None` if the file cannot be read
fn read_descriptor(path: &Path, root: &ExtractionRoot) -> Option<AssetDescriptor> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!("skipping {}: {err}", path.display());
            return None;
        }
    };
    let source = String::from_utf8_lossy(&bytes);

    let mut descriptor = AssetDescriptor::from_parsed(path, parse_source(&source));
    descriptor.module_path.clone_from(&root.path);
    descriptor.owning_module.clone_from(&root.owning_module);
    descriptor.origin = root.origin;

    for issue in &descriptor.issues {
        tracing::warn!(
            "{}:{}: ${}: {}",
            path.display(),
            issue.line,
            issue.field,
            issue.message
        );
    }
    Some(descriptor)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AssetGraphError;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn bundle(class: &str, depends: &[&str]) -> String {
        let depends = depends
            .iter()
            .map(|d| format!("'{d}'"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "<?php\nnamespace app\\assets;\n\nclass {class} extends \\yii\\web\\AssetBundle\n{{\n    public $depends = [{depends}];\n}}\n"
        )
    }

    fn names(descriptors: &[AssetDescriptor]) -> Vec<&str> {
        descriptors.iter().map(|d| d.name.as_str()).collect()
    }

    #[test]
    fn test_extract_matches_suffixes_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "assets/AppAsset.php", &bundle("AppAsset", &[]));
        write(
            temp.path(),
            "assets/ChartBundle.php",
            &bundle("ChartBundle", &["AppAsset"]),
        );
        write(temp.path(), "assets/Helper.php", "<?php class Helper {}");
        write(temp.path(), "assets/README.md", "AppAsset.php");

        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let descriptors = extractor
            .extract(&ExtractionRoot::application(temp.path().join("assets")))
            .unwrap();

        assert_eq!(names(&descriptors), vec!["AppAsset", "ChartBundle"]);
        assert_eq!(descriptors[1].declared_dependencies, vec!["AppAsset"]);
        assert_eq!(descriptors[0].origin, Origin::Application);
        assert_eq!(descriptors[0].module_path, temp.path().join("assets"));
    }

    #[test]
    fn test_extract_recurses_in_name_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "assets/z/ZAsset.php", &bundle("ZAsset", &[]));
        write(temp.path(), "assets/BAsset.php", &bundle("BAsset", &[]));
        write(temp.path(), "assets/a/deep/AAsset.php", &bundle("AAsset", &[]));

        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let root = ExtractionRoot::application(temp.path().join("assets"));

        let first = extractor.extract(&root).unwrap();
        let second = extractor.extract(&root).unwrap();
        // uppercase file names sort before lowercase directory names
        assert_eq!(names(&first), vec!["BAsset", "AAsset", "ZAsset"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_module_root_sets_owner() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "modules/admin/assets/AdminAsset.php",
            &bundle("AdminAsset", &[]),
        );

        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let descriptors = extractor
            .extract(&ExtractionRoot::module(temp.path().join("modules/admin"), "admin"))
            .unwrap();

        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].owning_module.as_deref(), Some("admin"));
        assert_eq!(descriptors[0].origin, Origin::Module);
    }

    #[test]
    fn test_extract_skips_excluded_subtrees() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "widgets/ChartAsset.php", &bundle("ChartAsset", &[]));
        write(
            temp.path(),
            "widgets/node_modules/pkg/VendorAsset.php",
            &bundle("VendorAsset", &[]),
        );

        let config = ProjectConfig::from_yaml("exclude: ['widgets/node_modules/**']\n").unwrap();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let descriptors = extractor
            .extract(&ExtractionRoot::widget(temp.path().join("widgets")))
            .unwrap();

        assert_eq!(names(&descriptors), vec!["ChartAsset"]);
    }

    #[test]
    fn test_extract_keeps_partial_descriptors() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "assets/BrokenAsset.php",
            "<?php class BrokenAsset { public $css = ['a.css' 'b.css']; public $js = ['app.js']; }",
        );

        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let descriptors = extractor
            .extract(&ExtractionRoot::application(temp.path().join("assets")))
            .unwrap();

        assert_eq!(descriptors.len(), 1);
        assert!(descriptors[0].style_files.is_empty());
        assert_eq!(descriptors[0].script_files, vec!["app.js"]);
        assert_eq!(descriptors[0].issues.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_skips_unreadable_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "assets/AppAsset.php", &bundle("AppAsset", &[]));
        std::os::unix::fs::symlink(
            temp.path().join("missing-target.php"),
            temp.path().join("assets/DanglingAsset.php"),
        )
        .unwrap();

        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();
        let descriptors = extractor
            .extract(&ExtractionRoot::application(temp.path().join("assets")))
            .unwrap();

        assert_eq!(names(&descriptors), vec!["AppAsset"]);
    }

    #[test]
    fn test_extract_missing_root() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::default();
        let extractor = Extractor::new(&config, temp.path()).unwrap();

        let result = extractor.extract(&ExtractionRoot::application(temp.path().join("nope")));
        assert!(matches!(
            result.unwrap_err(),
            AssetGraphError::RootNotFound { .. }
        ));
    }
}
