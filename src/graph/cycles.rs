//! Cycle detection for asset dependencies
//!
//! Depth-first search with two marker sets:
//!
//! 1. **on stack**: node is on the current DFS path
//! 2. **done**: node and everything reachable from it has been explored
//!
//! Reaching a node that is on the stack closes a cycle. The cycle is the
//! path slice from that node to the current node, with the start repeated
//! at the end:
//!
//! ```text
//! path: [A, B, C]   edge C → B   cycle: [B, C, B]
//! ```
//!
//! Cycles are reported, not rejected. Every node is explored to completion
//! at most once, so the search terminates on any finite graph.

use std::collections::HashSet;

use super::{DependencyGraph, Frame};

/// A dependency cycle: first and last names are equal
pub type Cycle = Vec<String>;

struct CycleContext<'g, 'a> {
    graph: &'g DependencyGraph<'a>,
    on_stack: HashSet<&'a str>,
    done: HashSet<&'a str>,
    path: Vec<&'a str>,
    cycles: Vec<Cycle>,
}

impl<'a> CycleContext<'_, 'a> {
    fn enter(&mut self, name: &'a str) -> Frame<'a> {
        self.on_stack.insert(name);
        self.path.push(name);
        Frame::new(self.graph, name)
    }

    fn leave(&mut self, name: &'a str) {
        self.path.pop();
        self.on_stack.remove(name);
        self.done.insert(name);
    }

    /// Record the cycle closed by an edge back to `dep`
    fn close(&mut self, dep: &'a str) {
        if let Some(start) = self.path.iter().position(|n| *n == dep) {
            let mut cycle: Cycle = self.path[start..].iter().map(ToString::to_string).collect();
            cycle.push(dep.to_string());
            self.cycles.push(cycle);
        }
    }
}

/// Depth-first walk from `start` on an explicit stack
fn cycle_dfs<'a>(ctx: &mut CycleContext<'_, 'a>, start: &'a str) {
    let mut stack = vec![ctx.enter(start)];

    while let Some(frame) = stack.last_mut() {
        match frame.next_dependency() {
            Some(dep) if ctx.on_stack.contains(dep) => ctx.close(dep),
            Some(dep) if !ctx.done.contains(dep) => {
                let next = ctx.enter(dep);
                stack.push(next);
            }
            Some(_) => {}
            None => {
                let name = frame.name;
                stack.pop();
                ctx.leave(name);
            }
        }
    }
}

/// Find dependency cycles, visiting nodes in input order
///
/// Returns an empty list for an acyclic graph. Cycles that share nodes but
/// are entered from different points are reported separately.
///
/// # Example
///
/// ```text
/// X → Y, Y → X      →   [[X, Y, X]]
/// A → A             →   [[A, A]]
/// A → B, B → C      →   []
/// ```
pub fn find_cycles(graph: &DependencyGraph<'_>) -> Vec<Cycle> {
    let mut ctx = CycleContext {
        graph,
        on_stack: HashSet::new(),
        done: HashSet::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };

    for &name in graph.names() {
        if !ctx.done.contains(name) {
            cycle_dfs(&mut ctx, name);
        }
    }

    tracing::debug!(
        nodes = graph.len(),
        cycles = ctx.cycles.len(),
        "cycle detection finished"
    );
    ctx.cycles
}
