// src/graph/walk.rs

//! Directional views used by traversals.
//!
//! [`Reversed`] walks a graph against its edges without copying or mutating
//! it: its successors are the underlying graph's predecessors.

use crate::graph::model::{EdgeRef, Graph, NodeId};

/// Minimal traversal capability shared by the forward and reversed views.
pub trait Walk {
    /// Nodes reachable from `id` in one step of this view.
    fn next(&self, id: NodeId) -> Vec<NodeId>;

    /// The underlying edge traversed when stepping from `u` to `v`, in the
    /// orientation it has in the source graph.
    fn edge(&self, u: NodeId, v: NodeId) -> EdgeRef;

    fn graph(&self) -> &Graph;
}

/// Follows edges in their natural direction.
#[derive(Debug, Clone, Copy)]
pub struct Forward<'a>(pub &'a Graph);

/// Follows edges backwards.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<'a>(pub &'a Graph);

impl Walk for Forward<'_> {
    fn next(&self, id: NodeId) -> Vec<NodeId> {
        self.0.successors(id).collect()
    }

    fn edge(&self, u: NodeId, v: NodeId) -> EdgeRef {
        EdgeRef::new(u, v)
    }

    fn graph(&self) -> &Graph {
        self.0
    }
}

impl Walk for Reversed<'_> {
    fn next(&self, id: NodeId) -> Vec<NodeId> {
        self.0.predecessors(id).collect()
    }

    fn edge(&self, u: NodeId, v: NodeId) -> EdgeRef {
        EdgeRef::new(v, u)
    }

    fn graph(&self) -> &Graph {
        self.0
    }
}
