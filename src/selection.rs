// src/selection.rs

//! Selection queries: `LEAF[|TASK]` with optional `>` direction markers.
//!
//! ```text
//! S        := LEAF ('|' TASKSPEC)?
//! LEAF     := DIRSPEC
//! TASKSPEC := DIRSPEC
//! DIRSPEC  := '>'? IDENT '>'?
//! ```
//!
//! A leading `>` asks for a reverse walk ("what X needs"), a trailing `>` for
//! a forward walk ("what needs X"). Without markers the walk is reverse only.

use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, RunGraphError};

/// One identifier with its direction flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirSpec {
    pub ident: String,
    pub forward: bool,
    pub reverse: bool,
}

impl DirSpec {
    fn parse(raw: &str, part: &str) -> Result<Self> {
        let mut ident = raw.trim();
        let mut forward = false;
        let mut reverse = false;

        if let Some(rest) = ident.strip_prefix('>') {
            ident = rest;
            reverse = true;
        }
        if let Some(rest) = ident.strip_suffix('>') {
            ident = rest;
            forward = true;
        }
        if !(forward || reverse) {
            reverse = true;
        }

        if ident.is_empty() {
            return Err(RunGraphError::InvalidSelection(format!(
                "empty {part} identifier in '{raw}'"
            )));
        }
        if ident.contains('>') {
            return Err(RunGraphError::InvalidSelection(format!(
                "unexpected '>' inside {part} identifier '{ident}'"
            )));
        }

        Ok(Self {
            ident: ident.to_string(),
            forward,
            reverse,
        })
    }
}

impl fmt::Display for DirSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A bare identifier already means reverse-only.
        let lead = self.reverse && self.forward;
        let trail = self.forward;
        write!(
            f,
            "{}{}{}",
            if lead { ">" } else { "" },
            self.ident,
            if trail { ">" } else { "" }
        )
    }
}

/// A parsed selection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The leaf (or root) naming the base subgraph.
    pub target: DirSpec,
    /// Optional focus node inside the base subgraph.
    pub focus: Option<DirSpec>,
}

impl Selection {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(RunGraphError::InvalidSelection(
                "empty selection".to_string(),
            ));
        }

        let mut parts = input.split('|');
        let target = parts.next().unwrap_or_default();
        let focus = parts.next();
        if parts.next().is_some() {
            return Err(RunGraphError::InvalidSelection(format!(
                "more than one '|' in '{input}'"
            )));
        }

        let target = DirSpec::parse(target, "target")?;
        let focus = match focus {
            Some(f) if !f.trim().is_empty() => Some(DirSpec::parse(f, "task")?),
            _ => None,
        };

        Ok(Self { target, focus })
    }

    pub fn target_key(&self) -> &str {
        &self.target.ident
    }

    pub fn focus_key(&self) -> Option<&str> {
        self.focus.as_ref().map(|f| f.ident.as_str())
    }

    /// Forward flag of the requested walk: the focus flag when a focus is
    /// given, otherwise the target flag.
    pub fn forward(&self) -> bool {
        self.focus.as_ref().unwrap_or(&self.target).forward
    }

    /// Reverse flag of the requested walk, see [`forward`](Self::forward).
    pub fn reverse(&self) -> bool {
        self.focus.as_ref().unwrap_or(&self.target).reverse
    }
}

impl FromStr for Selection {
    type Err = RunGraphError;

    fn from_str(s: &str) -> Result<Self> {
        Selection::parse(s)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.focus {
            Some(focus) => write!(f, "{}|{}", self.target, focus),
            None => write!(f, "{}", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(s: &Selection) -> (bool, bool) {
        (s.forward(), s.reverse())
    }

    #[test]
    fn bare_leaf_defaults_to_reverse() {
        let s = Selection::parse("C").unwrap();
        assert_eq!(s.target_key(), "C");
        assert_eq!(s.focus_key(), None);
        assert_eq!(flags(&s), (false, true));
    }

    #[test]
    fn markers_on_leaf() {
        assert_eq!(flags(&Selection::parse(">C").unwrap()), (false, true));
        assert_eq!(flags(&Selection::parse("A>").unwrap()), (true, false));
        assert_eq!(flags(&Selection::parse(">A>").unwrap()), (true, true));
    }

    #[test]
    fn focus_flags_win() {
        let s = Selection::parse("C|B>").unwrap();
        assert_eq!(s.target_key(), "C");
        assert_eq!(s.focus_key(), Some("B"));
        assert_eq!(flags(&s), (true, false));
        assert_eq!((s.target.forward, s.target.reverse), (false, true));

        let s = Selection::parse("C|>B>").unwrap();
        assert_eq!(flags(&s), (true, true));

        let s = Selection::parse("C|B").unwrap();
        assert_eq!(flags(&s), (false, true));
    }

    #[test]
    fn empty_focus_is_ignored() {
        let s = Selection::parse("C|").unwrap();
        assert_eq!(s.focus, None);
    }

    #[test]
    fn invalid_inputs() {
        for input in ["", ">", ">>", "|B", "A|B|C", "A>B", "C|>"] {
            assert!(
                matches!(Selection::parse(input), Err(RunGraphError::InvalidSelection(_))),
                "expected '{input}' to be rejected"
            );
        }
    }

    #[test]
    fn display_is_canonical() {
        for input in ["C", "A>", ">A>", "C|B", "C|B>", "C|>B>"] {
            let s: Selection = input.parse().unwrap();
            assert_eq!(s.to_string(), input);
            assert_eq!(Selection::parse(&s.to_string()).unwrap(), s);
        }
    }
}
