// src/dot/parser.rs

//! Recursive-descent parser turning DOT tokens into a [`Graph`].

use tracing::trace;

use crate::dot::lexer::{Token, TokenKind};
use crate::errors::{Result, RunGraphError};
use crate::graph::{Attributes, Graph, NodeId};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: Graph,
    node_defaults: Attributes,
    edge_defaults: Attributes,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            graph: Graph::new(),
            node_defaults: Attributes::new(),
            edge_defaults: Attributes::new(),
        }
    }

    /// `[strict] digraph [ID] '{' stmt_list '}'`
    pub fn parse(mut self) -> Result<Graph> {
        if self.peek_keyword("strict") {
            self.pos += 1;
        }
        if self.peek_keyword("graph") {
            return Err(self.error_here("undirected graphs are not supported"));
        }
        if !self.peek_keyword("digraph") {
            return Err(self.error_here("expected 'digraph'"));
        }
        self.pos += 1;

        if !matches!(self.peek_kind(), Some(TokenKind::LBrace)) {
            let name = self.id()?;
            trace!(graph = %name, "parsing named graph");
        }
        self.expect(TokenKind::LBrace, "'{'")?;

        while !matches!(self.peek_kind(), Some(TokenKind::RBrace)) {
            if self.peek_kind().is_none() {
                return Err(self.error_here("unexpected end of input, expected '}'"));
            }
            self.statement()?;
            if matches!(self.peek_kind(), Some(TokenKind::Semi)) {
                self.pos += 1;
            }
        }
        self.pos += 1;

        if self.peek_kind().is_some() {
            return Err(self.error_here("unexpected content after closing '}'"));
        }

        Ok(self.graph)
    }

    fn statement(&mut self) -> Result<()> {
        if self.peek_keyword("subgraph") || matches!(self.peek_kind(), Some(TokenKind::LBrace)) {
            return Err(self.error_here("subgraphs are not supported"));
        }

        if self.peek_keyword("graph") {
            self.pos += 1;
            self.attr_lists()?;
            return Ok(());
        }
        if self.peek_keyword("node") {
            self.pos += 1;
            let attrs = self.attr_lists()?;
            self.node_defaults.extend(attrs);
            return Ok(());
        }
        if self.peek_keyword("edge") {
            self.pos += 1;
            let attrs = self.attr_lists()?;
            self.edge_defaults.extend(attrs);
            return Ok(());
        }

        let first = self.id()?;

        // `ID = ID` at statement level is a graph attribute.
        if matches!(self.peek_kind(), Some(TokenKind::Equals)) {
            self.pos += 1;
            self.id()?;
            return Ok(());
        }
        self.reject_port()?;

        let mut chain = vec![self.node(&first)?];
        loop {
            match self.peek_kind() {
                Some(TokenKind::Arrow) => {
                    self.pos += 1;
                    let key = self.id()?;
                    self.reject_port()?;
                    chain.push(self.node(&key)?);
                }
                Some(TokenKind::Line) => {
                    return Err(self.error_here("'--' edges are not allowed in a digraph"));
                }
                _ => break,
            }
        }

        let attrs = self.attr_lists()?;

        if chain.len() == 1 {
            for (k, v) in attrs {
                self.graph.set_node_attribute(chain[0], k, v)?;
            }
            return Ok(());
        }

        for pair in chain.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let is_new = !self.graph.contains_edge(from, to);
            self.graph.add_edge(from, to)?;
            let defaults = if is_new {
                self.edge_defaults.clone()
            } else {
                Attributes::new()
            };
            for (k, v) in defaults.into_iter().chain(attrs.clone()) {
                self.graph.set_edge_attribute(from, to, k, v)?;
            }
        }

        Ok(())
    }

    /// Look up or create a node, applying `node [..]` defaults on creation.
    fn node(&mut self, key: &str) -> Result<NodeId> {
        if let Some(id) = self.graph.node_by_key(key) {
            return Ok(id);
        }
        let id = self.graph.ensure_node(key);
        for (k, v) in self.node_defaults.clone() {
            self.graph.set_node_attribute(id, k, v)?;
        }
        Ok(id)
    }

    /// Zero or more `[a=b, c=d; e=f]` lists.
    fn attr_lists(&mut self) -> Result<Attributes> {
        let mut attrs = Attributes::new();
        while matches!(self.peek_kind(), Some(TokenKind::LBracket)) {
            self.pos += 1;
            loop {
                match self.peek_kind() {
                    Some(TokenKind::RBracket) => {
                        self.pos += 1;
                        break;
                    }
                    Some(TokenKind::Comma) | Some(TokenKind::Semi) => {
                        self.pos += 1;
                    }
                    Some(_) => {
                        let key = self.id()?;
                        self.expect(TokenKind::Equals, "'='")?;
                        let value = self.id()?;
                        attrs.insert(key, value);
                    }
                    None => return Err(self.error_here("unterminated attribute list")),
                }
            }
        }
        Ok(attrs)
    }

    /// An identifier, numeral or quoted string (with `+` concatenation).
    fn id(&mut self) -> Result<String> {
        let token = self.tokens.get(self.pos).cloned();
        match token.map(|t| t.kind) {
            Some(TokenKind::Id(s)) => {
                self.pos += 1;
                Ok(s)
            }
            Some(TokenKind::Quoted(mut s)) => {
                self.pos += 1;
                while matches!(self.peek_kind(), Some(TokenKind::Plus)) {
                    self.pos += 1;
                    match self.peek_kind().cloned() {
                        Some(TokenKind::Quoted(more)) => {
                            self.pos += 1;
                            s.push_str(&more);
                        }
                        _ => return Err(self.error_here("expected a quoted string after '+'")),
                    }
                }
                Ok(s)
            }
            _ => Err(self.error_here("expected an identifier")),
        }
    }

    fn reject_port(&self) -> Result<()> {
        if matches!(self.peek_kind(), Some(TokenKind::Colon)) {
            return Err(self.error_here("node ports are not supported"));
        }
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.peek_kind() == Some(&kind) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error_here(&format!("expected {what}")))
        }
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    /// Keywords are case-insensitive and only recognised unquoted.
    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek_kind(), Some(TokenKind::Id(s)) if s.eq_ignore_ascii_case(keyword))
    }

    fn error_here(&self, message: &str) -> RunGraphError {
        let (line, column) = match self.tokens.get(self.pos).or(self.tokens.last()) {
            Some(t) => (t.line, t.column),
            None => (1, 1),
        };
        let found = match self.peek_kind() {
            Some(kind) => format!("{kind:?}"),
            None => "end of input".to_string(),
        };
        RunGraphError::Decode {
            line,
            column,
            message: format!("{message} (found {found})"),
        }
    }
}
