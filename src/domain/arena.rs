//! Arena-based binary tree storage.
//!
//! Nodes live in a generational arena and refer to their children by index,
//! so ownership flows strictly from parent to child and no node needs a
//! back-pointer.

use std::fmt;

use generational_arena::{Arena, Index};

/// Child slot of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// A single tree vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub value: i64,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

impl Node {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<Index> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn slot_mut(&mut self, side: Side) -> &mut Option<Index> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Binary tree backed by an arena. Built by [`TreeBuilder`](crate::domain::TreeBuilder).
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<Node>,
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn insert_node(&mut self, value: i64) -> Index {
        self.arena.insert(Node::new(value))
    }

    pub(crate) fn set_root(&mut self, idx: Index) {
        self.root = Some(idx);
    }

    pub fn get_node(&self, idx: Index) -> Option<&Node> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut Node> {
        self.arena.get_mut(idx)
    }

    pub fn root_index(&self) -> Option<Index> {
        self.root
    }

    /// Read-only view of the root, for renderers and other collaborators.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.and_then(|idx| self.node_ref(idx))
    }

    pub fn node_ref(&self, idx: Index) -> Option<NodeRef<'_>> {
        self.arena.get(idx).map(|node| NodeRef { arena: self, node })
    }

    /// Looks up the node holding `value` by walking the search path from the root.
    pub fn find(&self, value: i64) -> Option<NodeRef<'_>> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value()) {
                std::cmp::Ordering::Less => node.left(),
                std::cmp::Ordering::Equal => return Some(node),
                std::cmp::Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// Number of nodes stored, reachable or not.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Number of levels below and including the root. An empty tree has depth 0.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = self.get_node(idx) else {
                continue;
            };
            max_depth = max_depth.max(depth);
            stack.extend(node.left.into_iter().map(|child| (child, depth + 1)));
            stack.extend(node.right.into_iter().map(|child| (child, depth + 1)));
        }
        max_depth
    }

    /// Pre-order (node, left, right) traversal from the root.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Values in symmetric order. For a valid BST this is strictly increasing.
    pub fn values(&self) -> Vec<i64> {
        let mut values = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut current = self.root();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            if let Some(node) = stack.pop() {
                values.push(node.value());
                current = node.right();
            }
        }
        values
    }
}

/// Read-only view of a node and, through it, its subtree.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a TreeArena,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub fn value(&self) -> i64 {
        self.node.value
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.child(Side::Right)
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a>> {
        self.node
            .child(side)
            .and_then(|idx| self.arena.node_ref(idx))
    }

    pub fn is_leaf(&self) -> bool {
        self.node.left.is_none() && self.node.right.is_none()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", &self.value())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

pub struct PreOrderIter<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> PreOrderIter<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        Self {
            stack: arena.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        // Right first so that left is visited first
        self.stack.extend(current.right());
        self.stack.extend(current.left());
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //      4
    //     / \
    //    2   7
    //   /
    //  1
    fn sample() -> TreeArena {
        let mut tree = TreeArena::new();
        let four = tree.insert_node(4);
        let two = tree.insert_node(2);
        let seven = tree.insert_node(7);
        let one = tree.insert_node(1);
        tree.get_node_mut(four).unwrap().left = Some(two);
        tree.get_node_mut(four).unwrap().right = Some(seven);
        tree.get_node_mut(two).unwrap().left = Some(one);
        tree.set_root(four);
        tree
    }

    #[test]
    fn given_empty_arena_when_queried_then_has_no_root() {
        let tree = TreeArena::new();
        assert!(tree.root().is_none());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert!(tree.values().is_empty());
    }

    #[test]
    fn given_tree_when_iterating_then_visits_pre_order() {
        let tree = sample();
        let visited: Vec<i64> = tree.iter().map(|n| n.value()).collect();
        assert_eq!(visited, vec![4, 2, 1, 7]);
    }

    #[test]
    fn given_tree_when_collecting_values_then_returns_in_order() {
        assert_eq!(sample().values(), vec![1, 2, 4, 7]);
    }

    #[test]
    fn given_tree_when_measuring_depth_then_counts_levels() {
        assert_eq!(sample().depth(), 3);
    }

    #[test]
    fn given_root_view_when_walking_then_exposes_children() {
        let tree = sample();
        let root = tree.root().unwrap();
        assert_eq!(root.value(), 4);
        assert_eq!(root.left().map(|n| n.value()), Some(2));
        assert_eq!(root.right().map(|n| n.value()), Some(7));
        assert!(root.right().unwrap().is_leaf());
        assert!(root.left().unwrap().right().is_none());
    }

    #[test]
    fn given_tree_when_finding_values_then_follows_search_path() {
        let tree = sample();
        assert_eq!(tree.find(1).map(|n| n.value()), Some(1));
        assert!(tree.find(3).is_none());
    }
}
