// src/dot/writer.rs

//! DOT serialisation of a [`Graph`].

use std::fmt::Write;

use crate::dot::lexer::{is_id_continue, is_id_start};
use crate::graph::{Attributes, Graph};

const KEYWORDS: [&str; 6] = ["strict", "graph", "digraph", "subgraph", "node", "edge"];

/// Encode `graph` as a `strict digraph`.
///
/// Nodes come first, then edges, both in insertion order.
pub fn encode(graph: &Graph) -> String {
    let mut out = String::from("strict digraph {\n");

    if graph.node_count() > 0 {
        out.push_str("  // Node definitions.\n");
    }
    for node in graph.nodes() {
        let _ = writeln!(out, "  {}{};", quote(node.key()), attr_list(node.attributes()));
    }

    if graph.edge_count() > 0 {
        out.push_str("\n  // Edge definitions.\n");
    }
    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.key_of(edge.from), graph.key_of(edge.to)) else {
            continue;
        };
        let attrs = graph
            .edge_attributes(edge.from, edge.to)
            .map(attr_list)
            .unwrap_or_default();
        let _ = writeln!(out, "  {} -> {}{};", quote(from), quote(to), attrs);
    }

    out.push_str("}\n");
    out
}

fn attr_list(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let items: Vec<String> = attrs
        .iter()
        .map(|(k, v)| format!("{}={}", quote(k), quote(v)))
        .collect();
    format!(" [{}]", items.join(", "))
}

/// Emit `s` bare when it is a plain identifier, quoted otherwise.
pub fn quote(s: &str) -> String {
    if is_plain_id(s) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            // Only backslashes the decoder would treat as escapes need doubling.
            '\\' if matches!(chars.peek(), None | Some('"' | '\\' | '\n' | '\r')) => {
                out.push_str("\\\\")
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn is_plain_id(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_id_start(first)
        && chars.all(is_id_continue)
        && !KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_rules() {
        assert_eq!(quote("abc_1"), "abc_1");
        assert_eq!(quote("1abc"), "\"1abc\"");
        assert_eq!(quote("node"), "\"node\"");
        assert_eq!(quote("a b"), "\"a b\"");
        assert_eq!(quote(""), "\"\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("a\\nb"), "\"a\\nb\"");
        assert_eq!(quote("end\\"), "\"end\\\\\"");
    }
}
