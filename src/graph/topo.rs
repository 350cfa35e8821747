// src/graph/topo.rs

//! Topological ordering and cycle reporting.

use petgraph::algo::{tarjan_scc, toposort};

use crate::errors::{Result, RunGraphError};
use crate::graph::model::{Graph, NodeId};

/// Order the nodes of `graph` so that every edge points forward.
///
/// Fails with [`RunGraphError::CycleDetected`] listing the node keys of every
/// cycle. The order is reproducible for a fixed insertion order.
pub fn sort(graph: &Graph) -> Result<Vec<NodeId>> {
    match toposort(graph.topology(), None) {
        Ok(order) => Ok(order),
        Err(_) => Err(RunGraphError::CycleDetected {
            cycles: cycles_in(graph),
        }),
    }
}

/// Node keys of every strongly connected component that forms a cycle,
/// including single nodes with a self-loop. Keys and sets are sorted.
pub fn cycles_in(graph: &Graph) -> Vec<Vec<String>> {
    let topology = graph.topology();

    let mut cycles: Vec<Vec<String>> = tarjan_scc(topology)
        .into_iter()
        .filter(|scc| scc.len() > 1 || topology.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut keys: Vec<String> = scc
                .iter()
                .filter_map(|id| graph.key_of(*id))
                .map(str::to_string)
                .collect();
            keys.sort();
            keys
        })
        .collect();

    cycles.sort();
    cycles
}

pub fn is_dag(graph: &Graph) -> bool {
    toposort(graph.topology(), None).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[NodeId], id: NodeId) -> usize {
        order.iter().position(|n| *n == id).unwrap()
    }

    #[test]
    fn chain_sorts_in_edge_order() {
        let mut g = Graph::new();
        let c = g.add_node("C").unwrap();
        let b = g.add_node("B").unwrap();
        let a = g.add_node("A").unwrap();
        g.add_edge(a, b).unwrap();
        g.add_edge(b, c).unwrap();

        let order = sort(&g).unwrap();
        assert_eq!(order, vec![a, b, c]);
        assert!(is_dag(&g));
    }

    #[test]
    fn sort_is_reproducible() {
        let mut g = Graph::new();
        let ids: Vec<NodeId> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|k| g.add_node(*k).unwrap())
            .collect();
        g.add_edge(ids[0], ids[3]).unwrap();
        g.add_edge(ids[1], ids[3]).unwrap();

        let first = sort(&g).unwrap();
        assert_eq!(first, sort(&g).unwrap());
        assert!(position(&first, ids[0]) < position(&first, ids[3]));
        assert!(position(&first, ids[1]) < position(&first, ids[3]));
    }

    #[test]
    fn cycle_is_reported_with_its_members() {
        let mut g = Graph::new();
        let a = g.add_node("A").unwrap();
        let b = g.add_node("B").unwrap();
        let c = g.add_node("C").unwrap();
        let d = g.add_node("D").unwrap();
        g.add_edge(a, b).unwrap();
        g.add_edge(b, c).unwrap();
        g.add_edge(c, b).unwrap();
        g.add_edge(d, d).unwrap();

        match sort(&g) {
            Err(RunGraphError::CycleDetected { cycles }) => {
                assert_eq!(cycles, vec![vec!["B".to_string(), "C".to_string()], vec!["D".to_string()]]);
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
        assert!(!is_dag(&g));
    }
}
