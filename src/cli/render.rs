//! Tree diagrams for validated trees
//!
//! Renderers only use the read-only `NodeRef` view of a tree.

use std::fmt::Write;

use termtree::Tree;

use crate::config::RenderStyle;
use crate::domain::{NodeRef, Side, TreeArena};

/// Deepest tree the recursive renderers will draw.
pub const MAX_RENDER_DEPTH: usize = 256;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for NodeRef<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        to_labeled_tree(*self, self.value().to_string())
    }
}

impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

// Children carry an L/R marker so a lone right child is not mistaken for a left one
fn to_labeled_tree(node: NodeRef<'_>, label: String) -> Tree<String> {
    let leaves: Vec<Tree<String>> = [Side::Left, Side::Right]
        .into_iter()
        .filter_map(|side| {
            node.child(side).map(|child| {
                let marker = match side {
                    Side::Left => "L",
                    Side::Right => "R",
                };
                to_labeled_tree(child, format!("{} {}", marker, child.value()))
            })
        })
        .collect();

    Tree::new(label).with_leaves(leaves)
}

/// Rotated diagram: right subtree above its parent, left subtree below,
/// four spaces of indent per level.
pub fn sideways(tree: &TreeArena) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        write_sideways(root, 0, &mut out);
    }
    out
}

fn write_sideways(node: NodeRef<'_>, level: usize, out: &mut String) {
    if let Some(right) = node.right() {
        write_sideways(right, level + 1, out);
    }
    let _ = writeln!(out, "{}{}", " ".repeat(level * 4), node.value());
    if let Some(left) = node.left() {
        write_sideways(left, level + 1, out);
    }
}

/// Draw `tree` in the given style; `None` for [`RenderStyle::None`] and for
/// trees deeper than [`MAX_RENDER_DEPTH`].
pub fn render(tree: &TreeArena, style: RenderStyle) -> Option<String> {
    if tree.depth() > MAX_RENDER_DEPTH {
        return None;
    }
    match style {
        RenderStyle::Tree => Some(tree.to_tree_string().to_string()),
        RenderStyle::Sideways => Some(sideways(tree)),
        RenderStyle::None => None,
    }
}
