// src/dot/mod.rs

//! DOT codec for dependency graphs.
//!
//! Supported on input: `strict`, `digraph`, an optional graph ID, node and
//! edge statements with attribute lists, edge chains (`a -> b -> c`),
//! `node [..]` / `edge [..]` defaults, `graph [..]` and `k = v` statements
//! (ignored), `//`, `/* */` and `#` comments, quoted IDs with `+`
//! concatenation.
//!
//! Not supported: undirected graphs, subgraphs, ports and HTML strings.
//! Parallel edges are merged, so every graph behaves as `strict`.

mod lexer;
mod parser;
mod writer;

use crate::errors::Result;
use crate::graph::Graph;

pub use writer::{encode, quote};

/// Graph used when no input file is available.
pub const EXAMPLE_GRAPH: &str = r#"strict digraph {
  // Node definitions.
  A [label="yellow"];
  B [label="green"];
  C [label="red"];
  D [label="blue"];
  E [label="magenta"];
  F [label="purple"];
  // Edge definitions.
  A -> B;
  A -> C -> E -> F;
  C -> D;
  B -> F;
  B -> E;
}
"#;

/// Decode DOT text into a [`Graph`].
pub fn decode(src: &str) -> Result<Graph> {
    let tokens = lexer::Lexer::new(src).tokenize()?;
    parser::Parser::new(tokens).parse()
}
