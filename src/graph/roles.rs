// src/graph/roles.rs

//! Structural roles of nodes: roots (no incoming edges) and leafs (no
//! outgoing edges). Everything else is a mid node.

use std::collections::BTreeMap;

use crate::graph::model::{Graph, NodeId};

/// Roots and leafs of a graph, keyed by handle with the node key as value.
///
/// The two sets are disjoint except for isolated nodes, which are in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roles {
    pub roots: BTreeMap<NodeId, String>,
    pub leafs: BTreeMap<NodeId, String>,
}

impl Roles {
    /// Classify every node of `graph` in a single pass.
    pub fn classify(graph: &Graph) -> Self {
        let mut roles = Roles::default();

        for node in graph.nodes() {
            let id = node.id();
            if graph.out_degree(id) == 0 {
                roles.leafs.insert(id, node.key().to_string());
            }
            if graph.in_degree(id) == 0 {
                roles.roots.insert(id, node.key().to_string());
            }
        }

        roles
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.roots.contains_key(&id)
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.leafs.contains_key(&id)
    }

    pub fn root_keys(&self) -> Vec<String> {
        sorted_keys(&self.roots)
    }

    pub fn leaf_keys(&self) -> Vec<String> {
        sorted_keys(&self.leafs)
    }
}

fn sorted_keys(set: &BTreeMap<NodeId, String>) -> Vec<String> {
    let mut keys: Vec<String> = set.values().cloned().collect();
    keys.sort();
    keys
}
