#![allow(dead_code)]

use rungraph::graph::{DependencyGraph, Graph, NodeId};

/// Builder for `Graph` to simplify test setup.
///
/// Nodes are created on first mention; keys are the handles used in tests.
///
/// ```ignore
/// let g = GraphBuilder::new()
///     .task("compile", "cc -c main.c")
///     .chain(&["main.c", "compile", "main.o"])
///     .build();
/// ```
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    pub fn node(mut self, key: &str) -> Self {
        self.graph.ensure_node(key);
        self
    }

    /// A task node (`shape=box`) with the given command.
    pub fn task(self, key: &str, cmd: &str) -> Self {
        self.attr(key, "shape", "box").attr(key, "cmd", cmd)
    }

    pub fn attr(mut self, key: &str, name: &str, value: &str) -> Self {
        let id = self.graph.ensure_node(key);
        self.graph
            .set_node_attribute(id, name, value)
            .expect("node was just ensured");
        self
    }

    pub fn edge(mut self, from: &str, to: &str) -> Self {
        let a = self.graph.ensure_node(from);
        let b = self.graph.ensure_node(to);
        self.graph.add_edge(a, b).expect("endpoints were just ensured");
        self
    }

    /// `a -> b -> c ...`
    pub fn chain(self, keys: &[&str]) -> Self {
        keys.windows(2)
            .fold(self, |builder, pair| builder.edge(pair[0], pair[1]))
    }

    pub fn id(&self, key: &str) -> NodeId {
        self.graph
            .node_by_key(key)
            .unwrap_or_else(|| panic!("no node '{key}' in builder"))
    }

    pub fn build(self) -> Graph {
        self.graph
    }

    pub fn dependency(self) -> DependencyGraph {
        DependencyGraph::new(self.graph)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `A -> B -> C`, all three marked as tasks echoing their own key.
pub fn abc_tasks() -> GraphBuilder {
    GraphBuilder::new()
        .task("A", "echo A")
        .task("B", "echo B")
        .task("C", "echo C")
        .chain(&["A", "B", "C"])
}

/// Keys of a subgraph, sorted.
pub fn sorted_keys(graph: &Graph) -> Vec<String> {
    let mut keys: Vec<String> = graph.nodes().map(|n| n.key().to_string()).collect();
    keys.sort();
    keys
}

/// Edges of a subgraph as sorted `(from, to)` key pairs.
pub fn sorted_edges(graph: &Graph) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = graph
        .edges()
        .filter_map(|e| {
            Some((
                graph.key_of(e.from)?.to_string(),
                graph.key_of(e.to)?.to_string(),
            ))
        })
        .collect();
    edges.sort();
    edges
}
