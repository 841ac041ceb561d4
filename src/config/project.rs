//! Project configuration (assetgraph.yaml) data structures
//!
//! Every key is optional. A project without the file gets the defaults,
//! which match the layout of a stock Yii application: `assets/` for
//! application bundles, `modules/<id>/` for module bundles and `widgets/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wax::Glob;

use crate::error::{Result, config};

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "assetgraph.yaml";

/// How to treat two descriptors that derive the same name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Later descriptor replaces the earlier one; the conflict is recorded
    #[default]
    Shadow,
    /// Extraction fails on the first conflict
    Reject,
}

/// Directories scanned for descriptors, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootsConfig {
    /// Application-level roots (no owning module)
    pub application: Vec<PathBuf>,

    /// Directories whose immediate subdirectories are modules
    pub modules: Vec<PathBuf>,

    /// Widget roots (no owning module)
    pub widgets: Vec<PathBuf>,
}

impl Default for RootsConfig {
    fn default() -> Self {
        Self {
            application: vec![PathBuf::from("assets")],
            modules: vec![PathBuf::from("modules")],
            widgets: vec![PathBuf::from("widgets")],
        }
    }
}

/// Project configuration from assetgraph.yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub roots: RootsConfig,

    /// File name suffixes that mark a descriptor source file
    pub suffixes: Vec<String>,

    /// Globs, relative to the project root, that are never scanned
    pub exclude: Vec<String>,

    /// Namespace prefixes whose classes are always-satisfied leaves
    pub external_namespaces: Vec<String>,

    pub duplicates: DuplicatePolicy,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            roots: RootsConfig::default(),
            suffixes: vec!["Asset.php".to_string(), "Bundle.php".to_string()],
            exclude: vec![
                "vendor/**".to_string(),
                "node_modules/**".to_string(),
                "runtime/**".to_string(),
                "web/assets/**".to_string(),
            ],
            external_namespaces: vec!["yii\\".to_string()],
            duplicates: DuplicatePolicy::Shadow,
        }
    }
}

impl ProjectConfig {
    /// Parse project configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for a project
    ///
    /// An explicit path must exist. Without one, `assetgraph.yaml` in the
    /// project root is used when present, defaults otherwise.
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = project_root.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    tracing::debug!(
                        "no {} in {}, using defaults",
                        CONFIG_FILE_NAME,
                        project_root.display()
                    );
                    return Ok(Self::default());
                }
                path
            }
        };

        let yaml = std::fs::read_to_string(&path)
            .map_err(|e| config::read_failed(path.display().to_string(), e.to_string()))?;

        let parsed: Self = serde_yaml::from_str(&yaml)
            .map_err(|e| config::parse_failed(path.display().to_string(), e.to_string()))?;
        parsed.validate()?;

        tracing::debug!("loaded configuration from {}", path.display());
        Ok(parsed)
    }

    fn validate(&self) -> Result<()> {
        if self.suffixes.is_empty() {
            return Err(config::invalid("suffixes must not be empty"));
        }
        if self.suffixes.iter().any(String::is_empty) {
            return Err(config::invalid("suffixes must not contain empty entries"));
        }
        for pattern in &self.exclude {
            Glob::new(pattern)
                .map_err(|e| config::invalid(format!("invalid exclude glob '{pattern}': {e}")))?;
        }
        Ok(())
    }

    /// Check whether a file name carries one of the descriptor suffixes
    pub fn matches_suffix(&self, file_name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| file_name.len() > suffix.len() && file_name.ends_with(suffix.as_str()))
    }
}
