//! Asset descriptor data model
//!
//! An [`AssetDescriptor`] is one declared bundle of front-end resources,
//! read from a bundle class file. Descriptors are the nodes of the
//! dependency graph; `declared_dependencies` are its edges.

pub mod lexer;
pub mod parser;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use parser::{Field, ParsedSource, parse_source};

/// Kind of root a descriptor was found under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    #[default]
    Application,
    Module,
    Widget,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Application => write!(f, "application"),
            Origin::Module => write!(f, "module"),
            Origin::Widget => write!(f, "widget"),
        }
    }
}

/// A field that was declared but could not be read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Property name without the `$` sigil
    pub field: String,
    /// 1-based line of the assignment
    pub line: usize,
    pub message: String,
}

/// One declared asset bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    /// Graph node key, derived from the source file name
    pub name: String,

    /// Declared class name, when the file has a `class` declaration
    pub class_name: Option<String>,

    pub namespace: Option<String>,

    pub source_file_path: PathBuf,

    /// Root directory the descriptor was found under
    pub module_path: PathBuf,

    /// Module label; absent means application-level
    pub owning_module: Option<String>,

    pub origin: Origin,

    pub base_path: Option<String>,
    pub base_url: Option<String>,
    pub source_path: Option<String>,

    pub style_files: Vec<String>,
    pub script_files: Vec<String>,

    /// Dependency identifiers, verbatim and unresolved
    pub declared_dependencies: Vec<String>,

    pub issues: Vec<ParseIssue>,
}

impl AssetDescriptor {
    /// Create a descriptor with only a name set
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the declared dependencies
    #[must_use]
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Build a descriptor from parsed source text
    ///
    /// The name is the file stem of `source_file_path`. Malformed fields are
    /// left empty; their issues are kept on the descriptor.
    pub fn from_parsed(source_file_path: &Path, parsed: ParsedSource) -> Self {
        let name = source_file_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            class_name: parsed.class_name,
            namespace: parsed.namespace,
            source_file_path: source_file_path.to_path_buf(),
            base_path: parsed.base_path.value(),
            base_url: parsed.base_url.value(),
            source_path: parsed.source_path.value(),
            style_files: parsed.css.value().unwrap_or_default(),
            script_files: parsed.js.value().unwrap_or_default(),
            declared_dependencies: parsed.depends.value().unwrap_or_default(),
            issues: parsed.issues,
            ..Self::default()
        }
    }

    /// Fully qualified class name (`namespace\Class`), when a namespace is declared
    pub fn qualified_name(&self) -> Option<String> {
        let namespace = self.namespace.as_deref()?;
        let class = self.class_name.as_deref().unwrap_or(&self.name);
        Some(format!("{namespace}\\{class}"))
    }

    /// Owning module label, `application` when absent
    pub fn module_label(&self) -> &str {
        self.owning_module.as_deref().unwrap_or("application")
    }
}
