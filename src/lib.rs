//! bstcheck: validate that a list of `(parent,child)` edges forms a single
//! well-formed binary search tree.
//!
//! Layers, inner to outer:
//! - [`domain`]: edge parsing, tree construction, BST validation (pure)
//! - [`application`]: validation service over tokens, text, and files
//! - [`infrastructure`]: filesystem abstraction and service wiring
//! - [`cli`]: argument parsing, output, and tree diagrams
//!
//! ```
//! use bstcheck::domain::{validate, Edge};
//!
//! let edges = [Edge::new(2, 1), Edge::new(4, 2), Edge::new(4, 7)];
//! let tree = validate(&edges).unwrap();
//! assert_eq!(tree.root().map(|n| n.value()), Some(4));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{validate, validate_tokens};
