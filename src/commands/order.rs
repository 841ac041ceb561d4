//! Order command implementation

use crate::cli::{OrderArgs, OutputFormat};
use crate::descriptor::AssetDescriptor;
use crate::error::Result;
use crate::graph::{DependencyGraph, order_for, topological_order};
use crate::ui;

use super::ProjectOptions;
use super::helpers::open_index;

/// Explain descriptors left out of `order` because of cycles
///
/// For a target order, a dropped dependency always drops the target too,
/// so the order is incomplete exactly when the target is not last.
fn omission_warning(
    graph: &DependencyGraph<'_>,
    target: Option<&str>,
    order: &[&AssetDescriptor],
) -> Option<String> {
    match target {
        Some(name) => {
            let resolved = graph.resolve(name);
            let placed = order.last().map(|d| d.name.as_str());
            (placed != resolved).then(|| {
                format!("'{name}' depends on a dependency cycle and cannot be ordered")
            })
        }
        None => (order.len() < graph.len()).then(|| {
            format!(
                "{} descriptor(s) omitted from the order because of dependency cycles",
                graph.len() - order.len()
            )
        }),
    }
}

/// Run order command
///
/// Descriptors caught in or depending on a cycle are left out; run
/// `cycles` to see why.
pub fn run(options: &ProjectOptions, args: OrderArgs) -> Result<()> {
    let index = open_index(options)?;
    let graph = index.graph();

    let order = match args.name.as_deref() {
        Some(name) => order_for(&graph, name)?,
        None => topological_order(&graph),
    };

    if let Some(warning) = omission_warning(&graph, args.name.as_deref(), &order) {
        tracing::warn!("{warning}");
    }

    let mut out = std::io::stdout().lock();
    match options.format {
        OutputFormat::Json => {
            let names: Vec<&str> = order.iter().map(|d| d.name.as_str()).collect();
            ui::write_json(&mut out, &names)
        }
        OutputFormat::Text => {
            ui::write_order(&mut out, &order)?;
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cyclic() -> Vec<AssetDescriptor> {
        vec![
            AssetDescriptor::new("Base"),
            AssetDescriptor::new("X").with_dependencies(["Y", "Base"]),
            AssetDescriptor::new("Y").with_dependencies(["X"]),
            AssetDescriptor::new("Page").with_dependencies(["X"]),
        ]
    }

    #[test]
    fn test_warns_for_whole_order_with_cycle() {
        let descriptors = cyclic();
        let graph = DependencyGraph::build(&descriptors);
        let order = topological_order(&graph);

        let warning = omission_warning(&graph, None, &order).unwrap();
        assert!(warning.starts_with("3 descriptor(s) omitted"));
    }

    #[test]
    fn test_warns_for_target_in_cycle() {
        let descriptors = cyclic();
        let graph = DependencyGraph::build(&descriptors);

        let order = order_for(&graph, "X").unwrap();
        assert!(order.is_empty());
        let warning = omission_warning(&graph, Some("X"), &order).unwrap();
        assert!(warning.contains("'X' depends on a dependency cycle"));

        let order = order_for(&graph, "Page").unwrap();
        assert!(omission_warning(&graph, Some("Page"), &order).is_some());
    }

    #[test]
    fn test_no_warning_when_complete() {
        let descriptors = cyclic();
        let graph = DependencyGraph::build(&descriptors);

        let order = order_for(&graph, "Base").unwrap();
        assert_eq!(omission_warning(&graph, Some("Base"), &order), None);

        let acyclic = vec![
            AssetDescriptor::new("A"),
            AssetDescriptor::new("B").with_dependencies(["A"]),
        ];
        let graph = DependencyGraph::build(&acyclic);
        let order = topological_order(&graph);
        assert_eq!(omission_warning(&graph, None, &order), None);
    }
}
