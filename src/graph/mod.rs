//! Dependency graph over asset descriptors
//!
//! The graph is a lookup from descriptor name to descriptor. Edges are not
//! stored separately: they are each descriptor's `declared_dependencies`,
//! resolved against the node set on demand.
//!
//! ```text
//! name → descriptor            ("SiteAsset" → SiteAsset { depends: [AppAsset, yii\web\YiiAsset] })
//! qualified name → name        ("app\assets\AppAsset" → "AppAsset")
//! ```
//!
//! A dependency identifier that matches no node is a leaf: it imposes no
//! ordering constraint and has no outgoing edges. Identifiers under an
//! external namespace prefix never match a node.
//!
//! The graph is ephemeral: build it from the current descriptor set,
//! analyze, drop it.

pub mod analysis;
pub mod cycles;
pub mod sort;
pub mod usage;

use std::collections::HashMap;

use crate::descriptor::AssetDescriptor;

pub use analysis::{Analysis, analyze};
pub use cycles::{Cycle, find_cycles};
pub use sort::{order_for, topological_order};
pub use usage::{UsageReport, usage};

/// Name-keyed view over a descriptor set
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    /// Node names in first-seen input order, each name once
    order: Vec<&'a str>,
    nodes: HashMap<&'a str, &'a AssetDescriptor>,
    /// `namespace\Class` → node name
    qualified: HashMap<String, &'a str>,
    external_namespaces: Vec<String>,
}

impl<'a> DependencyGraph<'a> {
    /// Build the graph from a descriptor sequence
    ///
    /// A later descriptor with an already-seen name replaces the earlier
    /// one; the node keeps the position of the first occurrence.
    pub fn build(descriptors: &'a [AssetDescriptor]) -> Self {
        let mut order = Vec::new();
        let mut nodes = HashMap::new();
        let mut qualified = HashMap::new();

        for descriptor in descriptors {
            let name = descriptor.name.as_str();
            if nodes.insert(name, descriptor).is_none() {
                order.push(name);
            }
            if let Some(fqcn) = descriptor.qualified_name() {
                qualified.insert(fqcn, name);
            }
        }

        Self {
            order,
            nodes,
            qualified,
            external_namespaces: Vec::new(),
        }
    }

    /// Treat identifiers under these namespace prefixes as leaves
    #[must_use]
    pub fn with_external_namespaces(mut self, prefixes: &[String]) -> Self {
        self.external_namespaces = prefixes
            .iter()
            .map(|p| p.trim_start_matches('\\').to_string())
            .collect();
        self
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Look up a node by exact name
    pub fn get(&self, name: &str) -> Option<&'a AssetDescriptor> {
        self.nodes.get(name).copied()
    }

    /// Node names in input order
    pub fn names(&self) -> &[&'a str] {
        &self.order
    }

    /// Nodes in input order
    pub fn descriptors(&self) -> impl Iterator<Item = &'a AssetDescriptor> + '_ {
        self.order.iter().filter_map(|name| self.nodes.get(name).copied())
    }

    /// Whether `identifier` lies under an external namespace prefix
    pub fn is_external(&self, identifier: &str) -> bool {
        let identifier = identifier.trim_start_matches('\\');
        self.external_namespaces
            .iter()
            .any(|prefix| identifier.starts_with(prefix.as_str()))
    }

    /// Resolve a dependency identifier to a node name
    ///
    /// Matches a node name exactly, or a node's fully qualified class
    /// name. External identifiers and unknown names resolve to `None`.
    pub fn resolve(&self, identifier: &str) -> Option<&'a str> {
        let identifier = identifier.trim_start_matches('\\');
        if self.is_external(identifier) {
            return None;
        }
        if let Some((name, _)) = self.nodes.get_key_value(identifier) {
            return Some(*name);
        }
        self.qualified.get(identifier).copied()
    }

    /// Resolved dependency node names of `name`, in declaration order
    pub fn dependencies_of(&self, name: &str) -> Vec<&'a str> {
        self.get(name)
            .map(|descriptor| {
                descriptor
                    .declared_dependencies
                    .iter()
                    .filter_map(|dep| self.resolve(dep))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Declared identifiers of `name` that match no node
    pub fn unresolved_of(&self, name: &str) -> Vec<&'a str> {
        self.get(name)
            .map(|descriptor| {
                descriptor
                    .declared_dependencies
                    .iter()
                    .filter(|dep| self.resolve(dep).is_none())
                    .map(String::as_str)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One node on an explicit DFS stack, with its place in the dependency list
pub(crate) struct Frame<'a> {
    pub(crate) name: &'a str,
    dependencies: Vec<&'a str>,
    next: usize,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(graph: &DependencyGraph<'a>, name: &'a str) -> Self {
        Self {
            name,
            dependencies: graph.dependencies_of(name),
            next: 0,
        }
    }

    /// Next unvisited resolved dependency, advancing past it
    pub(crate) fn next_dependency(&mut self) -> Option<&'a str> {
        let dep = self.dependencies.get(self.next).copied()?;
        self.next += 1;
        Some(dep)
    }
}
