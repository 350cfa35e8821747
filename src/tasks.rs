// src/tasks.rs

//! Task discovery: which nodes are executable tasks, in which order.
//!
//! A node is a task when one of the configured [`TaskMarker`]s matches one of
//! its attributes (value compared case-insensitively). The defaults are
//! `shape=box` and `type=job`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::Result;
use crate::graph::{DependencyGraph, Node, NodeId};

/// `attribute = value` pair identifying task nodes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskMarker {
    pub attribute: String,
    pub value: String,
}

impl TaskMarker {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        node.attribute(&self.attribute)
            .is_some_and(|v| v.to_lowercase() == self.value.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMarkers(Vec<TaskMarker>);

impl TaskMarkers {
    pub fn new(markers: Vec<TaskMarker>) -> Self {
        Self(markers)
    }

    pub fn is_task(&self, node: &Node) -> bool {
        self.0.iter().any(|m| m.matches(node))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskMarker> {
        self.0.iter()
    }
}

impl Default for TaskMarkers {
    fn default() -> Self {
        Self(vec![
            TaskMarker::new("shape", "box"),
            TaskMarker::new("type", "job"),
        ])
    }
}

/// Richer view of a task node, built from its attributes:
///
/// - `label`: description (falls back to the key)
/// - `cmd`: commands, one per line
/// - `env.<NAME>`: environment variables
/// - `src.<name>`, `artifact.<name>`, `result.<name>`: path mappings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: NodeId,
    pub key: String,
    pub description: String,
    pub cmds: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub sources: BTreeMap<String, String>,
    pub artifacts: BTreeMap<String, String>,
    pub results: BTreeMap<String, String>,
}

impl Task {
    pub fn from_node(node: &Node) -> Self {
        let cmds = node
            .attribute("cmd")
            .map(|c| {
                c.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: node.id(),
            key: node.key().to_string(),
            description: node.attribute("label").unwrap_or(node.key()).to_string(),
            cmds,
            env: prefixed(node, "env."),
            sources: prefixed(node, "src."),
            artifacts: prefixed(node, "artifact."),
            results: prefixed(node, "result."),
        }
    }
}

fn prefixed(node: &Node, prefix: &str) -> BTreeMap<String, String> {
    node.attributes()
        .iter()
        .filter_map(|(k, v)| {
            k.strip_prefix(prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), v.clone()))
        })
        .collect()
}

/// Keys of the task nodes of `graph`, in topological order.
///
/// A cyclic graph is an error: there is no safe execution order.
pub fn extract_task_list(graph: &DependencyGraph, markers: &TaskMarkers) -> Result<Vec<String>> {
    Ok(task_nodes(graph, markers)?
        .into_iter()
        .map(|n| n.key().to_string())
        .collect())
}

/// Like [`extract_task_list`] but returns full [`Task`] records.
pub fn extract_tasks(graph: &DependencyGraph, markers: &TaskMarkers) -> Result<Vec<Task>> {
    Ok(task_nodes(graph, markers)?
        .into_iter()
        .map(Task::from_node)
        .collect())
}

fn task_nodes<'a>(graph: &'a DependencyGraph, markers: &TaskMarkers) -> Result<Vec<&'a Node>> {
    let order = graph.sort()?;
    Ok(order
        .into_iter()
        .filter_map(|id| graph.graph().node(id))
        .filter(|n| markers.is_task(n))
        .collect())
}
