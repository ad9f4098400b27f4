//! Edge tokens: `(parent,child)` pairs and their parsing.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::error::{DomainError, DomainResult};

/// A directed parent → child relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub parent: i64,
    pub child: i64,
}

impl Edge {
    pub fn new(parent: i64, child: i64) -> Self {
        Self { parent, child }
    }
}

impl From<(i64, i64)> for Edge {
    fn from((parent, child): (i64, i64)) -> Self {
        Self { parent, child }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.parent, self.child)
    }
}

/// How malformed tokens are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenMode {
    /// Malformed tokens are dropped and reported as skipped.
    #[default]
    Lenient,
    /// The first malformed token fails the whole input.
    Strict,
}

/// Edges recovered from a token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedEdges {
    pub edges: Vec<Edge>,
    /// Tokens dropped in lenient mode, in input order
    pub skipped: Vec<String>,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"^\((\d+),(\d+)\)$").expect("valid token regex"))
}

fn chunk_regex() -> &'static Regex {
    static CHUNK: OnceLock<Regex> = OnceLock::new();
    CHUNK.get_or_init(|| Regex::new(r"\([^()]*\)").expect("valid chunk regex"))
}

/// Parse a single `(parent,child)` token.
///
/// Both integers must be non-negative decimal literals that fit in `i64`;
/// no whitespace is allowed anywhere in the token.
pub fn parse_token(token: &str) -> Option<Edge> {
    let caps = token_regex().captures(token)?;
    let parent = caps.get(1)?.as_str().parse().ok()?;
    let child = caps.get(2)?.as_str().parse().ok()?;
    Some(Edge { parent, child })
}

/// Split free text into parenthesised chunks.
///
/// `"[(2,1), (4,2)]"` yields `["(2,1)", "(4,2)"]`. Anything outside
/// parentheses is ignored; chunks are not validated here.
pub fn tokenize(text: &str) -> Vec<&str> {
    chunk_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Parse a sequence of tokens into edges according to `mode`.
pub fn parse_edges<I, S>(tokens: I, mode: TokenMode) -> DomainResult<ParsedEdges>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedEdges::default();
    for token in tokens {
        let token = token.as_ref();
        match (parse_token(token), mode) {
            (Some(edge), _) => parsed.edges.push(edge),
            (None, TokenMode::Lenient) => parsed.skipped.push(token.to_string()),
            (None, TokenMode::Strict) => {
                return Err(DomainError::MalformedToken {
                    token: token.to_string(),
                })
            }
        }
    }
    Ok(parsed)
}
