//! Domain-level errors (no I/O, no application context)

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::arena::Side;

/// Bound breached by a node during range validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Value was less than or equal to the exclusive lower bound.
    Lower(i64),
    /// Value was greater than or equal to the exclusive upper bound.
    Upper(i64),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Lower(bound) => write!(
                f,
                "less than or equal to the minimum allowed value ({})",
                bound
            ),
            Limit::Upper(bound) => write!(
                f,
                "greater than or equal to the maximum allowed value ({})",
                bound
            ),
        }
    }
}

/// Machine-distinguishable tag for a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MultipleRoots,
    NoRootFound,
    DuplicateChildSlot,
    EqualParentChild,
    OutOfRange,
    DetachedCycle,
    MalformedToken,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::MultipleRoots => "multiple-roots",
            ErrorKind::NoRootFound => "no-root-found",
            ErrorKind::DuplicateChildSlot => "duplicate-child-slot",
            ErrorKind::EqualParentChild => "equal-parent-child",
            ErrorKind::OutOfRange => "out-of-range",
            ErrorKind::DetachedCycle => "detached-cycle",
            ErrorKind::MalformedToken => "malformed-token",
        };
        f.write_str(name)
    }
}

/// Domain errors describe why an edge list is not a single valid BST.
/// The display text is the human-readable reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("no root node found: every value appears as a child, which indicates a cycle or an empty edge list")]
    NoRootFound,

    #[error("multiple roots detected ({}): a valid tree must have exactly one root node", .roots.iter().join(", "))]
    MultipleRoots { roots: Vec<i64> },

    #[error("node {parent} already has a {side} child ({existing}), but another {side} child ({conflicting}) was found")]
    DuplicateChildSlot {
        parent: i64,
        side: Side,
        existing: i64,
        conflicting: i64,
    },

    #[error("child value ({value}) equals parent value ({value}): BST nodes must have unique values")]
    EqualParentChild { value: i64 },

    #[error("node {value} is {limit} for its position in the tree")]
    OutOfRange { value: i64, limit: Limit },

    #[error("cycle detected: values {} are unreachable from root {root}", .values.iter().join(", "))]
    DetachedCycle { root: i64, values: Vec<i64> },

    #[error("malformed edge token {token:?}: expected \"(parent,child)\"")]
    MalformedToken { token: String },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NoRootFound => ErrorKind::NoRootFound,
            DomainError::MultipleRoots { .. } => ErrorKind::MultipleRoots,
            DomainError::DuplicateChildSlot { .. } => ErrorKind::DuplicateChildSlot,
            DomainError::EqualParentChild { .. } => ErrorKind::EqualParentChild,
            DomainError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DomainError::DetachedCycle { .. } => ErrorKind::DetachedCycle,
            DomainError::MalformedToken { .. } => ErrorKind::MalformedToken,
        }
    }

    /// Structural errors stop construction; ordering errors come from validation.
    pub fn is_structural(&self) -> bool {
        !matches!(self, DomainError::OutOfRange { .. })
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
