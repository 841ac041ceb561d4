//! Direct dependency / used-by lookup for a single descriptor
//!
//! A flat, one-level query: no transitive closure in either direction.

use serde::Serialize;

use super::DependencyGraph;
use crate::error::{Result, descriptor};

/// What one descriptor depends on and what depends on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub name: String,
    /// Declared dependency identifiers, verbatim
    pub dependencies: Vec<String>,
    /// Declared identifiers that match no descriptor
    pub unresolved: Vec<String>,
    /// The unresolved identifiers that lie under an external namespace
    pub external: Vec<String>,
    /// Descriptors that declare a dependency on this one
    pub used_by: Vec<String>,
}

/// Report direct dependencies and direct dependents of `name`
///
/// # Errors
///
/// Returns `AssetGraphError::DescriptorNotFound` if `name` is not a node.
pub fn usage(graph: &DependencyGraph<'_>, name: &str) -> Result<UsageReport> {
    let target = graph
        .resolve(name)
        .and_then(|resolved| graph.get(resolved))
        .ok_or_else(|| descriptor::not_found(name))?;

    let used_by = graph
        .descriptors()
        .filter(|other| other.name != target.name)
        .filter(|other| {
            other
                .declared_dependencies
                .iter()
                .any(|dep| graph.resolve(dep) == Some(target.name.as_str()))
        })
        .map(|other| other.name.clone())
        .collect();

    let unresolved: Vec<String> = graph
        .unresolved_of(&target.name)
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let external = unresolved
        .iter()
        .filter(|dep| graph.is_external(dep))
        .cloned()
        .collect();

    Ok(UsageReport {
        name: target.name.clone(),
        dependencies: target.declared_dependencies.clone(),
        unresolved,
        external,
        used_by,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::AssetGraphError;
    use crate::graph::tests::create_test_descriptor;

    fn fixture() -> Vec<crate::descriptor::AssetDescriptor> {
        vec![
            create_test_descriptor("AppAsset", &["yii\\web\\YiiAsset"]),
            create_test_descriptor("SiteAsset", &["AppAsset"]),
            create_test_descriptor("ChartAsset", &["AppAsset", "SiteAsset"]),
            create_test_descriptor("AdminAsset", &["ChartAsset"]),
        ]
    }

    #[test]
    fn test_usage_direct_only() {
        let descriptors = fixture();
        let graph = DependencyGraph::build(&descriptors);

        let report = usage(&graph, "AppAsset").unwrap();
        assert_eq!(report.dependencies, vec!["yii\\web\\YiiAsset"]);
        assert_eq!(report.unresolved, vec!["yii\\web\\YiiAsset"]);
        // AdminAsset reaches AppAsset only transitively
        assert_eq!(report.used_by, vec!["SiteAsset", "ChartAsset"]);
    }

    #[test]
    fn test_usage_dependencies_verbatim() {
        let descriptors = fixture();
        let graph = DependencyGraph::build(&descriptors);

        let report = usage(&graph, "ChartAsset").unwrap();
        assert_eq!(report.dependencies, vec!["AppAsset", "SiteAsset"]);
        assert!(report.unresolved.is_empty());
        assert_eq!(report.used_by, vec!["AdminAsset"]);
    }

    #[test]
    fn test_usage_separates_external_from_missing() {
        let descriptors = vec![
            create_test_descriptor("AppAsset", &[]),
            create_test_descriptor("SiteAsset", &["yii\\web\\YiiAsset", "AppAset", "AppAsset"]),
        ];
        let graph = DependencyGraph::build(&descriptors)
            .with_external_namespaces(&["yii\\".to_string()]);

        let report = usage(&graph, "SiteAsset").unwrap();
        assert_eq!(report.unresolved, vec!["yii\\web\\YiiAsset", "AppAset"]);
        assert_eq!(report.external, vec!["yii\\web\\YiiAsset"]);
    }

    #[test]
    fn test_usage_no_dependencies() {
        let descriptors = vec![
            create_test_descriptor("Leaf", &[]),
            create_test_descriptor("User", &["Leaf"]),
        ];
        let graph = DependencyGraph::build(&descriptors);

        let report = usage(&graph, "Leaf").unwrap();
        assert!(report.dependencies.is_empty());
        assert_eq!(report.used_by, vec!["User"]);
    }

    #[test]
    fn test_usage_excludes_self_reference() {
        let descriptors = vec![create_test_descriptor("Loop", &["Loop"])];
        let graph = DependencyGraph::build(&descriptors);

        let report = usage(&graph, "Loop").unwrap();
        assert_eq!(report.dependencies, vec!["Loop"]);
        assert!(report.used_by.is_empty());
    }

    #[test]
    fn test_usage_not_found() {
        let descriptors = fixture();
        let graph = DependencyGraph::build(&descriptors);

        let err = usage(&graph, "MissingAsset").unwrap_err();
        assert!(matches!(
            err,
            AssetGraphError::DescriptorNotFound { ref name } if name == "MissingAsset"
        ));
    }
}
