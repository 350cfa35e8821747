// src/graph/dependency.rs

//! Role-aware dependency graph.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use tracing::error;

use crate::errors::{Result, RunGraphError};
use crate::graph::induce::Inducer;
use crate::graph::model::{Graph, NodeId};
use crate::graph::roles::Roles;
use crate::graph::topo;

/// A [`Graph`] plus a lazily computed cache of its roots and leafs.
///
/// The cache is filled on the first call to [`roots`](Self::roots),
/// [`leafs`](Self::leafs) or [`roles`](Self::roles) and is only cleared by
/// [`reset_roles`](Self::reset_roles). Mutating the graph through
/// [`graph_mut`](Self::graph_mut) does NOT invalidate it: callers that mutate
/// a graph whose roles were already computed must call `reset_roles`.
///
/// The cache is not synchronised; share a `DependencyGraph` between threads
/// only through external locking or by cloning it.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: Graph,
    roles: OnceCell<Roles>,
}

impl DependencyGraph {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            roles: OnceCell::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the underlying graph. Does not reset the role cache.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Roots and leafs, computed on first access.
    pub fn roles(&self) -> &Roles {
        self.roles.get_or_init(|| Roles::classify(&self.graph))
    }

    /// Nodes without incoming edges.
    pub fn roots(&self) -> &BTreeMap<NodeId, String> {
        &self.roles().roots
    }

    /// Nodes without outgoing edges.
    pub fn leafs(&self) -> &BTreeMap<NodeId, String> {
        &self.roles().leafs
    }

    pub fn roles_cached(&self) -> bool {
        self.roles.get().is_some()
    }

    /// Drop the cached roles so the next access recomputes them.
    pub fn reset_roles(&mut self) {
        self.roles = OnceCell::new();
    }

    /// Whether `id` is a root. Uses the cache when warm, else the live
    /// in-degree.
    pub fn is_root(&self, id: NodeId) -> bool {
        match self.roles.get() {
            Some(roles) => roles.is_root(id),
            None => self.graph.contains_node(id) && self.graph.in_degree(id) == 0,
        }
    }

    /// Whether `id` is a leaf. Uses the cache when warm, else the live
    /// out-degree.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        match self.roles.get() {
            Some(roles) => roles.is_leaf(id),
            None => self.graph.contains_node(id) && self.graph.out_degree(id) == 0,
        }
    }

    pub fn is_mid(&self, id: NodeId) -> bool {
        !(self.is_root(id) || self.is_leaf(id))
    }

    /// Topological order of the whole graph.
    pub fn sort(&self) -> Result<Vec<NodeId>> {
        topo::sort(&self.graph)
    }

    /// Induce one subgraph from `start`.
    pub fn induce(&self, start: NodeId, forward: bool, reverse: bool) -> Result<DependencyGraph> {
        Inducer::new().induce(self, start, forward, reverse)
    }

    /// Induce one subgraph per node, walking forward from roots and in
    /// reverse from leafs.
    ///
    /// A mid node gets neither walk and therefore only itself.
    pub fn induce_roles(
        &self,
        ids: impl IntoIterator<Item = NodeId>,
    ) -> Result<BTreeMap<NodeId, DependencyGraph>> {
        self.roles();
        self.induce_with(ids, |g, id| (g.is_root(id), g.is_leaf(id)))
    }

    /// Induce one subgraph per node with fixed directions; nodes may be
    /// roots, leafs or mid nodes.
    ///
    /// A root with only a reverse walk, or a leaf with only a forward walk,
    /// yields a single-node subgraph.
    pub fn induce_each(
        &self,
        ids: impl IntoIterator<Item = NodeId>,
        forward: bool,
        reverse: bool,
    ) -> Result<BTreeMap<NodeId, DependencyGraph>> {
        self.induce_with(ids, |_, _| (forward, reverse))
    }

    fn induce_with<F>(
        &self,
        ids: impl IntoIterator<Item = NodeId>,
        directions: F,
    ) -> Result<BTreeMap<NodeId, DependencyGraph>>
    where
        F: Fn(&DependencyGraph, NodeId) -> (bool, bool),
    {
        let mut inducer = Inducer::new();
        let mut out = BTreeMap::new();

        for id in ids {
            let (forward, reverse) = directions(self, id);
            out.insert(id, inducer.induce(self, id, forward, reverse)?);
        }

        Ok(out)
    }

    /// Single subgraph holding exactly `ids` and the edges between them.
    pub fn induce_all_in(&self, _ids: &[NodeId]) -> Result<DependencyGraph> {
        not_implemented("bulk induction of a shared subgraph")
    }

    /// Transitive reduction.
    pub fn reduce(&self) -> Result<DependencyGraph> {
        not_implemented("transitive reduction")
    }

    /// Transitive closure.
    pub fn closure(&self) -> Result<DependencyGraph> {
        not_implemented("transitive closure")
    }

    /// Schedule for `slots` concurrent execution threads.
    pub fn schedule(&self, _slots: i64) -> Result<Vec<Vec<NodeId>>> {
        not_implemented("parallel scheduling")
    }
}

impl From<Graph> for DependencyGraph {
    fn from(graph: Graph) -> Self {
        Self::new(graph)
    }
}

fn not_implemented<T>(what: &'static str) -> Result<T> {
    error!(operation = what, "operation is not implemented yet");
    Err(RunGraphError::NotImplemented(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> DependencyGraph {
        let mut g = Graph::new();
        let a = g.add_node("A").unwrap();
        let b = g.add_node("B").unwrap();
        let c = g.add_node("C").unwrap();
        g.add_edge(a, b).unwrap();
        g.add_edge(b, c).unwrap();
        DependencyGraph::new(g)
    }

    #[test]
    fn live_checks_before_cache_is_warm() {
        let g = chain();
        let a = g.graph().node_by_key("A").unwrap();
        let b = g.graph().node_by_key("B").unwrap();
        let c = g.graph().node_by_key("C").unwrap();

        assert!(!g.roles_cached());
        assert!(g.is_root(a) && !g.is_leaf(a));
        assert!(g.is_leaf(c) && !g.is_root(c));
        assert!(g.is_mid(b));
        assert!(!g.roles_cached());
    }

    #[test]
    fn cache_is_stale_until_reset() {
        let mut g = chain();
        let c = g.graph().node_by_key("C").unwrap();
        assert!(g.leafs().contains_key(&c));
        assert!(g.roles_cached());

        let d = g.graph_mut().add_node("D").unwrap();
        g.graph_mut().add_edge(c, d).unwrap();

        // Cached roles are ground truth until reset.
        assert!(g.is_leaf(c));
        assert!(!g.is_leaf(d));

        g.reset_roles();
        assert!(!g.is_leaf(c));
        assert!(g.is_leaf(d));
        assert_eq!(g.roles().leaf_keys(), vec!["D"]);
    }

    #[test]
    fn induce_roles_uses_walk_direction_per_role() {
        let g = chain();
        let a = g.graph().node_by_key("A").unwrap();
        let b = g.graph().node_by_key("B").unwrap();
        let c = g.graph().node_by_key("C").unwrap();

        let subs = g.induce_roles([a, b, c]).unwrap();
        assert_eq!(subs[&a].graph().node_count(), 3);
        assert_eq!(subs[&c].graph().node_count(), 3);
        assert_eq!(subs[&b].graph().node_count(), 1);
    }

    #[test]
    fn induce_each_on_wrong_end_is_single_node() {
        let g = chain();
        let a = g.graph().node_by_key("A").unwrap();
        let c = g.graph().node_by_key("C").unwrap();

        let rv = g.induce_each([a], false, true).unwrap();
        assert_eq!(rv[&a].graph().node_count(), 1);
        let fw = g.induce_each([c], true, false).unwrap();
        assert_eq!(fw[&c].graph().node_count(), 1);
    }

    #[test]
    fn unfinished_operations_fail_visibly() {
        let g = chain();
        assert!(matches!(g.reduce(), Err(RunGraphError::NotImplemented(_))));
        assert!(matches!(g.closure(), Err(RunGraphError::NotImplemented(_))));
        assert!(matches!(g.schedule(2), Err(RunGraphError::NotImplemented(_))));
        assert!(matches!(g.induce_all_in(&[]), Err(RunGraphError::NotImplemented(_))));
    }
}
