//! Combined ordering and cycle check in one pass
//!
//! [`analyze`] returns either a complete registration order or the first
//! cycle that blocks one, so callers never have to remember to run cycle
//! detection before trusting the order.

use std::collections::HashSet;

use serde::Serialize;

use super::{Cycle, DependencyGraph, Frame};
use crate::descriptor::AssetDescriptor;

/// Outcome of a full analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum Analysis<'a> {
    /// Every descriptor, dependencies first
    Ordered(Vec<&'a AssetDescriptor>),
    /// A cycle; first and last names are equal
    Cyclic(Cycle),
}

impl Analysis<'_> {
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Analysis::Cyclic(_))
    }
}

struct AnalysisContext<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    on_stack: HashSet<&'a str>,
    done: HashSet<&'a str>,
    path: Vec<&'a str>,
    result: Vec<&'a AssetDescriptor>,
}

/// Depth-first walk from `start` on an explicit stack, appending finished
/// nodes in post-order; stops at the first edge back onto the stack
fn visit<'a>(ctx: &mut AnalysisContext<'_, 'a>, start: &'a str) -> Result<(), Cycle> {
    if ctx.done.contains(start) {
        return Ok(());
    }

    ctx.on_stack.insert(start);
    ctx.path.push(start);
    let mut stack = vec![Frame::new(ctx.graph, start)];

    while let Some(frame) = stack.last_mut() {
        if let Some(dep) = frame.next_dependency() {
            if ctx.done.contains(dep) {
                continue;
            }
            if ctx.on_stack.contains(dep) {
                let pos = ctx.path.iter().position(|n| *n == dep).unwrap_or(0);
                let mut cycle: Cycle = ctx.path[pos..].iter().map(ToString::to_string).collect();
                cycle.push(dep.to_string());
                return Err(cycle);
            }
            ctx.on_stack.insert(dep);
            ctx.path.push(dep);
            stack.push(Frame::new(ctx.graph, dep));
            continue;
        }

        let name = frame.name;
        stack.pop();
        ctx.path.pop();
        ctx.on_stack.remove(name);
        ctx.done.insert(name);
        if let Some(descriptor) = ctx.graph.get(name) {
            ctx.result.push(descriptor);
        }
    }
    Ok(())
}

/// Order the graph, or report the cycle that prevents ordering
///
/// The order is the same one [`topological_order`](super::topological_order)
/// produces for an acyclic graph. For a cyclic graph the reported cycle is
/// the first one met when visiting nodes in input order, which is also the
/// first cycle [`find_cycles`](super::find_cycles) reports.
pub fn analyze<'a>(graph: &DependencyGraph<'a>) -> Analysis<'a> {
    let mut ctx = AnalysisContext {
        graph,
        on_stack: HashSet::new(),
        done: HashSet::new(),
        path: Vec::new(),
        result: Vec::new(),
    };

    for &name in graph.names() {
        if let Err(cycle) = visit(&mut ctx, name) {
            tracing::info!(cycle = %cycle.join(" -> "), "dependency cycle found");
            return Analysis::Cyclic(cycle);
        }
    }
    Analysis::Ordered(ctx.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{create_chain, create_test_descriptor};
    use crate::graph::{find_cycles, topological_order};

    #[test]
    fn test_acyclic_matches_topological_order() {
        let descriptors = vec![
            create_test_descriptor("C", &["A", "B"]),
            create_test_descriptor("A", &[]),
            create_test_descriptor("B", &["A", "yii\\web\\YiiAsset"]),
        ];
        let graph = DependencyGraph::build(&descriptors);

        match analyze(&graph) {
            Analysis::Ordered(order) => assert_eq!(order, topological_order(&graph)),
            Analysis::Cyclic(cycle) => panic!("unexpected cycle {cycle:?}"),
        }
    }

    #[test]
    fn test_cyclic_reports_first_detected_cycle() {
        let descriptors = vec![
            create_test_descriptor("Root", &["X"]),
            create_test_descriptor("X", &["Y"]),
            create_test_descriptor("Y", &["X"]),
            create_test_descriptor("P", &["Q"]),
            create_test_descriptor("Q", &["P"]),
        ];
        let graph = DependencyGraph::build(&descriptors);

        let analysis = analyze(&graph);
        assert!(analysis.is_cyclic());
        assert_eq!(analysis, Analysis::Cyclic(find_cycles(&graph)[0].clone()));
        assert_eq!(
            analysis,
            Analysis::Cyclic(vec!["X".to_string(), "Y".to_string(), "X".to_string()])
        );
    }

    #[test]
    fn test_long_chain() {
        let descriptors = create_chain(100_000, false);
        let graph = DependencyGraph::build(&descriptors);
        match analyze(&graph) {
            Analysis::Ordered(order) => {
                assert_eq!(order.len(), 100_000);
                assert_eq!(order[0].name, "N99999");
            }
            Analysis::Cyclic(cycle) => panic!("unexpected cycle of {} names", cycle.len()),
        }

        let descriptors = create_chain(100_000, true);
        let graph = DependencyGraph::build(&descriptors);
        match analyze(&graph) {
            Analysis::Cyclic(cycle) => assert_eq!(cycle.len(), 100_001),
            Analysis::Ordered(_) => panic!("expected a cycle"),
        }
    }

    #[test]
    fn test_empty_graph_is_ordered() {
        let graph = DependencyGraph::build(&[]);
        assert_eq!(analyze(&graph), Analysis::Ordered(vec![]));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let descriptors = vec![create_test_descriptor("A", &["A"])];
        let graph = DependencyGraph::build(&descriptors);

        let json = serde_json::to_value(analyze(&graph)).unwrap_or_default();
        assert_eq!(json["status"], "cyclic");
        assert_eq!(json["result"][0], "A");
    }
}
