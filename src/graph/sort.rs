//! Topological registration order using depth-first search (DFS)
//!
//! Produces an order in which every descriptor comes after the
//! descriptors it depends on, so registering them in sequence never
//! registers a bundle before its dependencies.
//!
//! ## Algorithm
//!
//! DFS with three-state marking:
//!
//! 1. **unvisited**: node hasn't been processed
//! 2. **in progress**: node is on the current DFS stack
//! 3. **done**: node has been fully processed, and is either **placed** in
//!    the output or **dropped**
//!
//! Nodes are visited in input order; each node is appended after all its
//! dependencies (post-order). Re-entering an in-progress node means a cycle:
//! that branch short-circuits instead of failing. A node whose dependencies
//! could not all be placed is dropped, so the order never lists a
//! descriptor ahead of one of its dependencies. In `X → Y, Y → X` both
//! `X` and `Y` are dropped, and so is anything that depends on them.
//!
//! Run [`find_cycles`](super::find_cycles) first, or use
//! [`analyze`](super::analyze), when the order must be complete.

use std::collections::HashMap;

use super::{DependencyGraph, Frame};
use crate::descriptor::AssetDescriptor;
use crate::error::{Result, descriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Placed,
    Dropped,
}

/// Context for topological sort operations
struct TopoSortContext<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    marks: HashMap<&'a str, Mark>,
    /// Result descriptors in dependency order
    result: Vec<&'a AssetDescriptor>,
}

/// Depth-first walk from `start` on an explicit stack; returns whether
/// `start` ended up placed
///
/// - in progress → cycle, short-circuit without placing
/// - placed/dropped → already processed
/// - otherwise visit every dependency, then place or drop
fn topo_dfs<'a>(ctx: &mut TopoSortContext<'_, 'a>, start: &'a str) -> bool {
    match ctx.marks.get(start) {
        Some(Mark::InProgress | Mark::Dropped) => return false,
        Some(Mark::Placed) => return true,
        None => {}
    }

    ctx.marks.insert(start, Mark::InProgress);
    // each frame carries whether all its dependencies so far were placed
    let mut stack = vec![(Frame::new(ctx.graph, start), true)];

    while let Some((frame, complete)) = stack.last_mut() {
        if let Some(dep) = frame.next_dependency() {
            // keep going so independent dependencies still get placed
            match ctx.marks.get(dep).copied() {
                Some(Mark::Placed) => {}
                Some(Mark::InProgress | Mark::Dropped) => *complete = false,
                None => {
                    ctx.marks.insert(dep, Mark::InProgress);
                    stack.push((Frame::new(ctx.graph, dep), true));
                }
            }
            continue;
        }

        let Some((frame, complete)) = stack.pop() else {
            break;
        };
        place(ctx, frame.name, complete);
        match stack.last_mut() {
            Some((_, parent_complete)) => *parent_complete &= complete,
            None => return complete,
        }
    }
    false
}

fn place<'a>(ctx: &mut TopoSortContext<'_, 'a>, name: &'a str, complete: bool) {
    if complete {
        ctx.marks.insert(name, Mark::Placed);
        if let Some(descriptor) = ctx.graph.get(name) {
            ctx.result.push(descriptor);
        }
    } else {
        ctx.marks.insert(name, Mark::Dropped);
        tracing::debug!(name, "dropped from registration order: depends on a cycle");
    }
}

fn sort_from<'a>(graph: &DependencyGraph<'a>, roots: &[&'a str]) -> Vec<&'a AssetDescriptor> {
    let mut ctx = TopoSortContext {
        graph,
        marks: HashMap::new(),
        result: Vec::new(),
    };
    for &name in roots {
        topo_dfs(&mut ctx, name);
    }
    ctx.result
}

/// Registration order for the whole graph
///
/// Returns descriptors in dependency order (dependencies first, dependents
/// last). Unrelated descriptors keep their input order. Dependencies on
/// identifiers that match no node impose no constraint and never appear in
/// the output.
///
/// # Example
///
/// ```text
/// Input:  A (no deps), B → A, C → A, B
/// Result: [A, B, C]
///
/// Input:  C → B, B → A, A
/// Result: [A, B, C]
/// ```
pub fn topological_order<'a>(graph: &DependencyGraph<'a>) -> Vec<&'a AssetDescriptor> {
    sort_from(graph, graph.names())
}

/// Registration order needed to register one descriptor
///
/// The target's transitive dependency closure in dependency order, with
/// the target last.
///
/// # Errors
///
/// Returns `AssetGraphError::DescriptorNotFound` if `name` is not a node.
pub fn order_for<'a>(graph: &DependencyGraph<'a>, name: &str) -> Result<Vec<&'a AssetDescriptor>> {
    let target = graph
        .resolve(name)
        .ok_or_else(|| descriptor::not_found(name))?;
    Ok(sort_from(graph, &[target]))
}
