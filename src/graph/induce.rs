// src/graph/induce.rs

//! Subgraph induction by directed depth-first traversal.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::errors::{Result, RunGraphError};
use crate::graph::dependency::DependencyGraph;
use crate::graph::model::{Graph, NodeId};
use crate::graph::walk::{Forward, Reversed, Walk};

/// Induces subgraphs by walking a graph from a start node.
///
/// Every edge examined from a visited node is copied into the result together
/// with its endpoints, so the result holds the reachable nodes and all edges
/// between them in the walked direction.
#[derive(Debug, Default)]
pub struct Inducer {
    visited: HashSet<NodeId>,
}

impl Inducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Induce the subgraph reachable from `start`.
    ///
    /// - `forward`: follow outgoing edges.
    /// - `reverse`: follow incoming edges.
    /// - both: union of the two walks.
    /// - neither: warning plus a subgraph holding only `start`.
    pub fn induce(
        &mut self,
        source: &DependencyGraph,
        start: NodeId,
        forward: bool,
        reverse: bool,
    ) -> Result<DependencyGraph> {
        let graph = source.graph();
        if !graph.contains_node(start) {
            return Err(RunGraphError::InvalidEndpoint { id: start });
        }

        if !(forward || reverse) {
            warn!(
                node = graph.key_of(start).unwrap_or_default(),
                "induce called without forward or reverse walk; this might be a mid node"
            );
        }

        let mut out = Graph::new();
        out.copy_node_from(graph, start)?;

        if forward {
            self.reset();
            self.walk(&Forward(graph), start, &mut out)?;
        }
        if reverse {
            self.reset();
            self.walk(&Reversed(graph), start, &mut out)?;
        }

        debug!(
            start = graph.key_of(start).unwrap_or_default(),
            forward,
            reverse,
            nodes = out.node_count(),
            edges = out.edge_count(),
            "induced subgraph"
        );

        Ok(DependencyGraph::new(out))
    }

    fn reset(&mut self) {
        self.visited.clear();
    }

    fn walk<W: Walk>(&mut self, view: &W, start: NodeId, out: &mut Graph) -> Result<()> {
        let mut stack = vec![start];
        self.visited.insert(start);

        while let Some(u) = stack.pop() {
            for v in view.next(u) {
                let edge = view.edge(u, v);
                out.copy_edge_from(view.graph(), edge.from, edge.to)?;
                if self.visited.insert(v) {
                    stack.push(v);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(g: &DependencyGraph) -> Vec<String> {
        let mut k: Vec<String> = g.graph().nodes().map(|n| n.key().to_string()).collect();
        k.sort();
        k
    }

    fn diamond() -> DependencyGraph {
        // A -> B -> D, A -> C -> D
        let mut g = Graph::new();
        let a = g.add_node("A").unwrap();
        let b = g.add_node("B").unwrap();
        let c = g.add_node("C").unwrap();
        let d = g.add_node("D").unwrap();
        g.add_edge(a, b).unwrap();
        g.add_edge(a, c).unwrap();
        g.add_edge(b, d).unwrap();
        g.add_edge(c, d).unwrap();
        DependencyGraph::new(g)
    }

    #[test]
    fn reverse_walk_keeps_every_edge_into_shared_nodes() {
        let g = diamond();
        let d = g.graph().node_by_key("D").unwrap();

        let sub = Inducer::new().induce(&g, d, false, true).unwrap();
        assert_eq!(keys(&sub), vec!["A", "B", "C", "D"]);
        assert_eq!(sub.graph().edge_count(), 4);
    }

    #[test]
    fn neither_direction_yields_single_node() {
        let g = diamond();
        let b = g.graph().node_by_key("B").unwrap();

        let sub = Inducer::new().induce(&g, b, false, false).unwrap();
        assert_eq!(keys(&sub), vec!["B"]);
        assert_eq!(sub.graph().edge_count(), 0);
    }

    #[test]
    fn unknown_start_is_an_error() {
        let g = diamond();
        assert!(matches!(
            Inducer::new().induce(&g, NodeId(99), true, false),
            Err(RunGraphError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn inducer_is_reusable() {
        let g = diamond();
        let a = g.graph().node_by_key("A").unwrap();
        let d = g.graph().node_by_key("D").unwrap();

        let mut inducer = Inducer::new();
        let first = inducer.induce(&g, a, true, false).unwrap();
        let second = inducer.induce(&g, d, false, true).unwrap();
        assert_eq!(keys(&first), keys(&second));
    }
}
