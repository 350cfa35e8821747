// src/catalog.rs

//! Pre-induced subgraphs for every leaf and root, and resolution of
//! [`Selection`]s against them.

use std::borrow::Cow;
use std::collections::BTreeMap;

use tracing::debug;

use crate::errors::{Result, RunGraphError};
use crate::graph::{DependencyGraph, NodeId};
use crate::selection::{DirSpec, Selection};

/// Per-leaf reverse-walk subgraphs and per-root forward-walk subgraphs, keyed
/// by node key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    leafs: BTreeMap<String, DependencyGraph>,
    roots: BTreeMap<String, DependencyGraph>,
}

/// A resolved selection: output name plus the selected subgraph.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    /// `<key>.rv`, `<key>.fw` or `<key>.<focus>`.
    pub name: String,
    pub graph: Cow<'a, DependencyGraph>,
}

impl Catalog {
    pub fn build(graph: &DependencyGraph) -> Result<Self> {
        let leaf_ids: Vec<_> = graph.leafs().keys().copied().collect();
        let root_ids: Vec<_> = graph.roots().keys().copied().collect();

        let leafs = keyed(graph, graph.induce_roles(leaf_ids)?);
        let roots = keyed(graph, graph.induce_roles(root_ids)?);

        debug!(
            leafs = leafs.len(),
            roots = roots.len(),
            "induced subgraphs for leafs and roots"
        );

        Ok(Self { leafs, roots })
    }

    pub fn leafs(&self) -> &BTreeMap<String, DependencyGraph> {
        &self.leafs
    }

    pub fn roots(&self) -> &BTreeMap<String, DependencyGraph> {
        &self.roots
    }

    pub fn leaf(&self, key: &str) -> Option<&DependencyGraph> {
        self.leafs.get(key)
    }

    pub fn root(&self, key: &str) -> Option<&DependencyGraph> {
        self.roots.get(key)
    }

    /// Resolve a selection to a subgraph.
    ///
    /// The target's flags pick the base subgraph (reverse: the leaf's,
    /// forward: the root's). Both flags without a focus are not implemented;
    /// with a focus they select the leaf's subgraph. A new subgraph is then
    /// induced from the focus node inside the base using the focus flags.
    pub fn resolve(&self, selection: &Selection) -> Result<Resolved<'_>> {
        let (base, suffix) = self.base(&selection.target, selection.focus.is_some())?;
        let key = selection.target_key();

        let Some(focus) = &selection.focus else {
            return Ok(Resolved {
                name: format!("{key}.{suffix}"),
                graph: Cow::Borrowed(base),
            });
        };

        let id = base
            .graph()
            .node_by_key(&focus.ident)
            .ok_or_else(|| RunGraphError::UnknownFocus {
                focus: focus.ident.clone(),
                target: key.to_string(),
            })?;
        let sub = base.induce(id, focus.forward, focus.reverse)?;

        Ok(Resolved {
            name: format!("{key}.{}", focus.ident),
            graph: Cow::Owned(sub),
        })
    }

    fn base(&self, target: &DirSpec, has_focus: bool) -> Result<(&DependencyGraph, &'static str)> {
        let key = target.ident.as_str();
        match (target.forward, target.reverse) {
            (true, true) if !has_focus => Err(RunGraphError::NotImplemented(
                "whole-subgraph selection in both directions",
            )),
            (true, false) => self
                .roots
                .get(key)
                .map(|g| (g, "fw"))
                .ok_or_else(|| unknown_target(key, &self.roots)),
            _ => self
                .leafs
                .get(key)
                .map(|g| (g, "rv"))
                .ok_or_else(|| unknown_target(key, &self.leafs)),
        }
    }
}

fn keyed(
    graph: &DependencyGraph,
    subgraphs: BTreeMap<NodeId, DependencyGraph>,
) -> BTreeMap<String, DependencyGraph> {
    subgraphs
        .into_iter()
        .filter_map(|(id, sub)| graph.graph().key_of(id).map(|k| (k.to_string(), sub)))
        .collect()
}

fn unknown_target(key: &str, known: &BTreeMap<String, DependencyGraph>) -> RunGraphError {
    RunGraphError::UnknownTarget {
        key: key.to_string(),
        known: known.keys().cloned().collect(),
    }
}
