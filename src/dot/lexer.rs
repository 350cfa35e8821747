// src/dot/lexer.rs

//! Tokeniser for the DOT subset understood by [`super::decode`].

use crate::errors::{Result, RunGraphError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or numeral.
    Id(String),
    /// Double-quoted string, escapes already resolved.
    Quoted(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Equals,
    Colon,
    Plus,
    /// `->`
    Arrow,
    /// `--`
    Line,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            line: 1,
            column: 1,
            at_line_start: true,
        }
    }

    /// Tokenise the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.at_line_start = true;
        } else {
            self.column += 1;
            if !c.is_whitespace() {
                self.at_line_start = false;
            }
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> RunGraphError {
        RunGraphError::Decode {
            line,
            column,
            message: message.into(),
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.chars.peek() {
            if *c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<()> {
        // Opening `/*` already consumed.
        loop {
            match self.bump() {
                Some('*') if self.chars.peek() == Some(&'/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.error(line, column, "unterminated block comment")),
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let Some(&c) = self.chars.peek() else {
                return Ok(None);
            };
            let (line, column) = (self.line, self.column);

            if c.is_whitespace() {
                self.bump();
                continue;
            }
            if c == '#' && self.at_line_start {
                self.skip_line();
                continue;
            }

            let single = |kind: TokenKind| -> Result<Option<Token>> {
                Ok(Some(Token { kind, line, column }))
            };
            return match c {
                '{' => {
                    self.bump();
                    single(TokenKind::LBrace)
                }
                '}' => {
                    self.bump();
                    single(TokenKind::RBrace)
                }
                '[' => {
                    self.bump();
                    single(TokenKind::LBracket)
                }
                ']' => {
                    self.bump();
                    single(TokenKind::RBracket)
                }
                ';' => {
                    self.bump();
                    single(TokenKind::Semi)
                }
                ',' => {
                    self.bump();
                    single(TokenKind::Comma)
                }
                '=' => {
                    self.bump();
                    single(TokenKind::Equals)
                }
                ':' => {
                    self.bump();
                    single(TokenKind::Colon)
                }
                '+' => {
                    self.bump();
                    single(TokenKind::Plus)
                }
                '/' => {
                    self.bump();
                    match self.chars.peek().copied() {
                        Some('/') => {
                            self.skip_line();
                            continue;
                        }
                        Some('*') => {
                            self.bump();
                            self.skip_block_comment(line, column)?;
                            continue;
                        }
                        _ => Err(self.error(line, column, "unexpected '/'")),
                    }
                }
                '"' => {
                    self.bump();
                    let s = self.quoted(line, column)?;
                    single(TokenKind::Quoted(s))
                }
                '<' => Err(self.error(line, column, "HTML strings are not supported")),
                '-' => {
                    self.bump();
                    match self.chars.peek().copied() {
                        Some('>') => {
                            self.bump();
                            single(TokenKind::Arrow)
                        }
                        Some('-') => {
                            self.bump();
                            single(TokenKind::Line)
                        }
                        Some(d) if d.is_ascii_digit() || d == '.' => {
                            let n = self.numeral()?;
                            single(TokenKind::Id(format!("-{n}")))
                        }
                        _ => Err(self.error(line, column, "unexpected '-'")),
                    }
                }
                c if c.is_ascii_digit() || c == '.' => {
                    let n = self.numeral()?;
                    single(TokenKind::Id(n))
                }
                c if is_id_start(c) => {
                    let mut id = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if !is_id_continue(c) {
                            break;
                        }
                        id.push(c);
                        self.bump();
                    }
                    single(TokenKind::Id(id))
                }
                other => Err(self.error(line, column, format!("unexpected character '{other}'"))),
            };
        }
    }

    /// Digits and dots. A numeral running straight into an identifier
    /// (`1abc`) is rejected rather than split into two IDs.
    fn numeral(&mut self) -> Result<String> {
        let mut n = String::new();
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            n.push(c);
            self.bump();
        }
        match self.chars.peek().copied() {
            Some(c) if is_id_start(c) => Err(self.error(
                self.line,
                self.column,
                format!("identifier character '{c}' directly after numeral '{n}'; quote the ID"),
            )),
            _ => Ok(n),
        }
    }

    /// Body of a quoted string; the opening quote is already consumed.
    ///
    /// `\"` and `\\` are unescaped, a backslash before a line break joins
    /// lines, every other backslash is kept as is.
    fn quoted(&mut self, line: usize, column: usize) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error(line, column, "unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.chars.peek().copied() {
                    Some('"') | Some('\\') => {
                        out.extend(self.bump());
                    }
                    Some('\n') => {
                        self.bump();
                    }
                    Some('\r') => {
                        self.bump();
                        if self.chars.peek() == Some(&'\n') {
                            self.bump();
                        }
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
            }
        }
    }
}

pub fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || (!c.is_ascii() && !c.is_whitespace())
}

pub fn is_id_continue(c: char) -> bool {
    is_id_start(c) || c.is_ascii_digit()
}
