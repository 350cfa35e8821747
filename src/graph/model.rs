// src/graph/model.rs

//! Directed graph of keyed nodes with string attributes.
//!
//! Topology lives in a `petgraph` [`DiGraphMap`] keyed by [`NodeId`]; keys and
//! attributes are kept in side tables so the adjacency structure stays small
//! and the attribute maps never leak into traversal code.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{Result, RunGraphError};

/// Attribute mapping attached to nodes and edges.
///
/// Ordered so that encoding a graph is deterministic.
pub type Attributes = BTreeMap<String, String>;

/// Stable integer handle of a node within a [`Graph`].
///
/// Induced subgraphs keep the handles of the graph they were induced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node: handle, external key (the DOT ID) and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    key: String,
    attrs: Attributes,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }
}

/// An ordered `(from, to)` pair identifying an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeRef {
    pub from: NodeId,
    pub to: NodeId,
}

impl EdgeRef {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

/// Directed graph with unique node keys and no parallel edges.
///
/// Nodes and edges can be added but never removed. Enumeration follows
/// insertion order; that only keeps output stable and must not be relied on
/// for correctness.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    topology: DiGraphMap<NodeId, ()>,
    nodes: HashMap<NodeId, Node>,
    keys: HashMap<String, NodeId>,
    edge_attrs: HashMap<EdgeRef, Attributes>,
    next_id: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.topology.node_count() == 0
    }

    /// Add a node with a fresh handle.
    ///
    /// Fails with [`RunGraphError::DuplicateKey`] if `key` is already used.
    pub fn add_node(&mut self, key: impl Into<String>) -> Result<NodeId> {
        let key = key.into();
        if self.keys.contains_key(&key) {
            return Err(RunGraphError::DuplicateKey(key));
        }

        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.insert_node(Node {
            id,
            key,
            attrs: Attributes::new(),
        });
        Ok(id)
    }

    /// Return the node for `key`, adding it first if it does not exist.
    pub fn ensure_node(&mut self, key: &str) -> NodeId {
        if let Some(id) = self.node_by_key(key) {
            return id;
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.insert_node(Node {
            id,
            key: key.to_string(),
            attrs: Attributes::new(),
        });
        id
    }

    /// Add the edge `from -> to`.
    ///
    /// Adding an edge that already exists is a no-op and returns it.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<EdgeRef> {
        self.require_node(from)?;
        self.require_node(to)?;

        let edge = EdgeRef::new(from, to);
        if !self.topology.contains_edge(from, to) {
            self.topology.add_edge(from, to, ());
            self.edge_attrs.insert(edge, Attributes::new());
        }
        Ok(edge)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.topology.contains_edge(from, to)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    pub fn key_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.key.as_str())
    }

    pub fn node_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(&id).and_then(|n| n.attribute(name))
    }

    pub fn edge_attribute(&self, from: NodeId, to: NodeId, name: &str) -> Option<&str> {
        self.edge_attrs
            .get(&EdgeRef::new(from, to))
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }

    pub fn edge_attributes(&self, from: NodeId, to: NodeId) -> Option<&Attributes> {
        self.edge_attrs.get(&EdgeRef::new(from, to))
    }

    pub fn set_node_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(RunGraphError::InvalidEndpoint { id })?;
        node.attrs.insert(name.into(), value.into());
        Ok(())
    }

    pub fn set_edge_attribute(
        &mut self,
        from: NodeId,
        to: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let attrs = self
            .edge_attrs
            .get_mut(&EdgeRef::new(from, to))
            .ok_or(RunGraphError::MissingEdge { from, to })?;
        attrs.insert(name.into(), value.into());
        Ok(())
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.topology.nodes().filter_map(|id| self.nodes.get(&id))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.topology.nodes()
    }

    /// All edges, grouped by source node in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef> + '_ {
        self.topology
            .all_edges()
            .map(|(from, to, _)| EdgeRef::new(from, to))
    }

    /// Direct successors of `id` (targets of its outgoing edges).
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.topology.neighbors_directed(id, Direction::Outgoing)
    }

    /// Direct predecessors of `id` (sources of its incoming edges).
    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.topology.neighbors_directed(id, Direction::Incoming)
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.successors(id).count()
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.predecessors(id).count()
    }

    /// Copy node `id` (same handle, key and attributes) from `source`.
    ///
    /// No-op if the node is already present.
    pub fn copy_node_from(&mut self, source: &Graph, id: NodeId) -> Result<NodeId> {
        if self.contains_node(id) {
            return Ok(id);
        }
        let node = source
            .node(id)
            .ok_or(RunGraphError::InvalidEndpoint { id })?;
        if self.keys.contains_key(&node.key) {
            return Err(RunGraphError::DuplicateKey(node.key.clone()));
        }

        self.next_id = self.next_id.max(id.0 + 1);
        self.insert_node(node.clone());
        Ok(id)
    }

    /// Copy the edge `from -> to` and both endpoints from `source`.
    ///
    /// No-op for parts that are already present.
    pub fn copy_edge_from(&mut self, source: &Graph, from: NodeId, to: NodeId) -> Result<EdgeRef> {
        let attrs = source
            .edge_attributes(from, to)
            .ok_or(RunGraphError::MissingEdge { from, to })?;
        self.copy_node_from(source, from)?;
        self.copy_node_from(source, to)?;

        let edge = EdgeRef::new(from, to);
        if !self.topology.contains_edge(from, to) {
            self.topology.add_edge(from, to, ());
            self.edge_attrs.insert(edge, attrs.clone());
        }
        Ok(edge)
    }

    pub(crate) fn topology(&self) -> &DiGraphMap<NodeId, ()> {
        &self.topology
    }

    fn insert_node(&mut self, node: Node) {
        self.topology.add_node(node.id);
        self.keys.insert(node.key.clone(), node.id);
        self.nodes.insert(node.id, node);
    }

    fn require_node(&self, id: NodeId) -> Result<()> {
        if self.contains_node(id) {
            Ok(())
        } else {
            Err(RunGraphError::InvalidEndpoint { id })
        }
    }
}
