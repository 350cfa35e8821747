// src/graph/mod.rs

//! Dependency-graph engine.
//!
//! - [`model`] holds the keyed, attributed directed graph.
//! - [`walk`] provides forward and reversed traversal views.
//! - [`roles`] classifies roots and leafs.
//! - [`induce`] builds subgraphs by directed depth-first traversal.
//! - [`topo`] orders a graph topologically or reports its cycles.
//! - [`dependency`] wraps a graph with a cached role classification.
//!
//! Edge direction is "dependency -> dependent": roots are inputs nothing
//! points at, leafs are final targets with no outgoing edges.

pub mod dependency;
pub mod induce;
pub mod model;
pub mod roles;
pub mod topo;
pub mod walk;

pub use dependency::DependencyGraph;
pub use induce::Inducer;
pub use model::{Attributes, EdgeRef, Graph, Node, NodeId};
pub use roles::Roles;
pub use walk::{Forward, Reversed, Walk};
