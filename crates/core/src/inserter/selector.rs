//! Compound CSS selectors
//!
//! Supports the subset the target heuristics use: an optional type selector
//! followed by any number of `.class`, `#id`, `[attr]`, `[attr="v"]`,
//! `[attr*="v"]`, `[attr^="v"]` and `[attr$="v"]`. Combinators, pseudo-classes
//! and selector lists are rejected.

use std::fmt;

use super::dom::{NodeId, PageDom};
use crate::errors::{PromptError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Class(String),
    Id(String),
    Attr { name: String, op: AttrOp },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source:     String,
    tag:        Option<String>,
    conditions: Vec<Condition>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        Parser::new(source).parse()
    }

    pub fn matches<P: PageDom + ?Sized>(&self, page: &P, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            match page.tag_name(node) {
                Some(actual) if actual.eq_ignore_ascii_case(tag) => {},
                _ => return false,
            }
        }

        self.conditions.iter().all(|condition| match condition {
            Condition::Class(class) => page
                .attribute(node, "class")
                .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class)),
            Condition::Id(id) => page.attribute(node, "id") == Some(id.as_str()),
            Condition::Attr { name, op } => match (page.attribute(node, name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(want)) => v == want,
                (Some(v), AttrOp::Contains(want)) => !want.is_empty() && v.contains(want.as_str()),
                (Some(v), AttrOp::StartsWith(want)) => !want.is_empty() && v.starts_with(want.as_str()),
                (Some(v), AttrOp::EndsWith(want)) => !want.is_empty() && v.ends_with(want.as_str()),
            },
        })
    }

    /// All matching elements in document order
    pub fn query_all<P: PageDom + ?Sized>(&self, page: &P) -> Vec<NodeId> {
        page.elements()
            .into_iter()
            .filter(|node| self.matches(page, *node))
            .collect()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars:  std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn error(&self, reason: impl Into<String>) -> PromptError {
        PromptError::SelectorError {
            selector: self.source.to_string(),
            reason:   reason.into(),
        }
    }

    fn parse(mut self) -> Result<Selector> {
        if self.source.trim().is_empty() {
            return Err(self.error("empty selector"));
        }
        if self.source.trim() != self.source {
            return Err(self.error("surrounding whitespace"));
        }

        let tag = match self.chars.peek() {
            Some((_, '*')) => {
                self.chars.next();
                None
            },
            Some((_, c)) if is_ident_char(*c) => Some(self.ident()?.to_ascii_lowercase()),
            _ => None,
        };

        let mut conditions = Vec::new();
        while let Some((_, c)) = self.chars.next() {
            let condition = match c {
                '.' => Condition::Class(self.ident()?),
                '#' => Condition::Id(self.ident()?),
                '[' => self.attribute()?,
                other => return Err(self.error(format!("unsupported character '{}'", other))),
            };
            conditions.push(condition);
        }

        Ok(Selector {
            source: self.source.to_string(),
            tag,
            conditions,
        })
    }

    fn ident(&mut self) -> Result<String> {
        let mut out = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if !is_ident_char(*c) {
                break;
            }
            out.push(*c);
            self.chars.next();
        }
        if out.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(out)
    }

    fn attribute(&mut self) -> Result<Condition> {
        let name = self.ident()?.to_ascii_lowercase();

        let op_char = match self.chars.next() {
            Some((_, ']')) => {
                return Ok(Condition::Attr {
                    name,
                    op: AttrOp::Exists,
                })
            },
            Some((_, '=')) => None,
            Some((_, c @ ('*' | '^' | '$'))) => {
                match self.chars.next() {
                    Some((_, '=')) => {},
                    _ => return Err(self.error("expected '=' after attribute operator")),
                }
                Some(c)
            },
            _ => return Err(self.error("malformed attribute selector")),
        };

        let value = self.attribute_value()?;
        match self.chars.next() {
            Some((_, ']')) => {},
            _ => return Err(self.error("unterminated attribute selector")),
        }

        let op = match op_char {
            None => AttrOp::Equals(value),
            Some('*') => AttrOp::Contains(value),
            Some('^') => AttrOp::StartsWith(value),
            _ => AttrOp::EndsWith(value),
        };
        Ok(Condition::Attr { name, op })
    }

    fn attribute_value(&mut self) -> Result<String> {
        let quote = match self.chars.peek() {
            Some((_, q @ ('"' | '\''))) => {
                let q = *q;
                self.chars.next();
                q
            },
            _ => return self.ident(),
        };

        let mut out = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == quote {
                return Ok(out);
            }
            out.push(c);
        }
        Err(self.error("unterminated string"))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
