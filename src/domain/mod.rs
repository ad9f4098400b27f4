//! Domain layer: edge parsing, tree construction, and BST validation
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading,
//! no logging). Every function here is a pure function of its input.

pub mod arena;
pub mod builder;
pub mod edge;
pub mod error;
pub mod validator;

pub use arena::{Node, NodeRef, Side, TreeArena};
pub use builder::TreeBuilder;
pub use edge::{parse_edges, parse_token, tokenize, Edge, ParsedEdges, TokenMode};
pub use error::{DomainError, DomainResult, ErrorKind, Limit};
pub use validator::{validate_bst, validate_subtree, Range};

/// Build a tree from `edges` and check it is a single valid BST.
///
/// Structural errors from construction come first; the range check runs only
/// on a successfully built tree. On success the tree is returned so callers
/// can walk it through [`TreeArena::root`].
pub fn validate(edges: &[Edge]) -> DomainResult<TreeArena> {
    let tree = TreeBuilder::new().build(edges)?;
    validate_bst(&tree)?;
    Ok(tree)
}

/// Parse raw `(parent,child)` tokens, then [`validate`] the edges.
pub fn validate_tokens<I, S>(tokens: I, mode: TokenMode) -> DomainResult<TreeArena>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parsed = parse_edges(tokens, mode)?;
    validate(&parsed.edges)
}
