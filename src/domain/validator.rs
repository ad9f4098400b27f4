//! Range-based BST validation.

use crate::domain::arena::{NodeRef, TreeArena};
use crate::domain::error::{DomainError, DomainResult, Limit};

/// Open interval a node value must fall into. `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub lower: Option<i64>,
    pub upper: Option<i64>,
}

impl Range {
    pub const UNBOUNDED: Range = Range {
        lower: None,
        upper: None,
    };

    pub fn new(lower: Option<i64>, upper: Option<i64>) -> Self {
        Self { lower, upper }
    }

    pub fn check(&self, value: i64) -> DomainResult<()> {
        if let Some(lower) = self.lower {
            if value <= lower {
                return Err(DomainError::OutOfRange {
                    value,
                    limit: Limit::Lower(lower),
                });
            }
        }
        if let Some(upper) = self.upper {
            if value >= upper {
                return Err(DomainError::OutOfRange {
                    value,
                    limit: Limit::Upper(upper),
                });
            }
        }
        Ok(())
    }

    /// Range for the left subtree of a node holding `value`.
    pub fn below(&self, value: i64) -> Self {
        Self {
            lower: self.lower,
            upper: Some(value),
        }
    }

    /// Range for the right subtree of a node holding `value`.
    pub fn above(&self, value: i64) -> Self {
        Self {
            lower: Some(value),
            upper: self.upper,
        }
    }
}

/// Check the whole tree against the BST ordering invariant.
pub fn validate_bst(tree: &TreeArena) -> DomainResult<()> {
    validate_subtree(tree.root(), Range::UNBOUNDED)
}

/// Check a subtree against `range`, pre-order and left before right.
///
/// An absent node is trivially valid. The first violation encountered is
/// returned. Uses an explicit stack so degenerate (list-shaped) trees do not
/// exhaust the call stack.
pub fn validate_subtree(node: Option<NodeRef<'_>>, range: Range) -> DomainResult<()> {
    let mut stack: Vec<(NodeRef<'_>, Range)> = node.into_iter().map(|n| (n, range)).collect();

    while let Some((node, range)) = stack.pop() {
        let value = node.value();
        range.check(value)?;

        if let Some(right) = node.right() {
            stack.push((right, range.above(value)));
        }
        if let Some(left) = node.left() {
            stack.push((left, range.below(value)));
        }
    }
    Ok(())
}
