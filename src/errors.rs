// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::graph::NodeId;

#[derive(Error, Debug)]
pub enum RunGraphError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("node {id} is not part of the graph")]
    InvalidEndpoint { id: NodeId },

    #[error("edge {from} -> {to} is not part of the graph")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("node key '{0}' is already used in the graph")]
    DuplicateKey(String),

    #[error("cycle detected in dependency graph: {}", format_cycles(.cycles))]
    CycleDetected { cycles: Vec<Vec<String>> },

    #[error("DOT decode error at {line}:{column}: {message}")]
    Decode {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("subgraph for node '{key}' not found (known: {})", known.join(", "))]
    UnknownTarget { key: String, known: Vec<String> },

    #[error("node '{focus}' not found in subgraph for '{target}'")]
    UnknownFocus { focus: String, target: String },

    #[error("not implemented yet: {0}")]
    NotImplemented(&'static str),

    #[error("task '{task}' failed with exit code {code}")]
    TaskFailed { task: String, code: i32 },

    #[error("{0} selection(s) failed")]
    SelectionsFailed(usize),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|c| format!("[{}]", c.join(", ")))
        .collect::<Vec<_>>()
        .join(" ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RunGraphError>;
