//! Tree builder: turns an edge list into a single rooted binary tree.

use std::collections::{HashMap, HashSet};

use generational_arena::Index;

use crate::domain::arena::{Side, TreeArena};
use crate::domain::edge::Edge;
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a [`TreeArena`] from parent → child edges.
///
/// Construction runs in two passes: every value gets a node first, then the
/// edges are linked. Each edge places the child in the parent's left slot when
/// it is smaller and in the right slot when it is larger. Ordering is only
/// checked against the immediate parent here; the global range check is the
/// validator's job.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: HashMap<i64, Index>,
    /// Values in first-seen order, so root detection is deterministic
    order: Vec<i64>,
    child_values: HashSet<i64>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from `edges`, stopping at the first structural error.
    ///
    /// The returned tree has a unique root and every node is reachable from
    /// it, but it has not been range-validated: a node may still be shared by
    /// two parents or sit on a cycle below the root. Run
    /// [`validate_bst`](crate::domain::validate_bst) before traversing it.
    pub fn build(&mut self, edges: &[Edge]) -> DomainResult<TreeArena> {
        // Reset state for a fresh run
        self.nodes.clear();
        self.order.clear();
        self.child_values.clear();

        let mut tree = TreeArena::new();

        // First pass: one node per distinct value
        for edge in edges {
            self.ensure_node(&mut tree, edge.parent);
            self.ensure_node(&mut tree, edge.child);
            self.child_values.insert(edge.child);
        }

        // Self-loops fail before root detection
        if let Some(edge) = edges.iter().find(|edge| edge.parent == edge.child) {
            return Err(DomainError::EqualParentChild { value: edge.child });
        }

        let root = self.find_root()?;
        tree.set_root(self.index_of(root)?);

        // Second pass: wire child slots
        for edge in edges {
            self.link(&mut tree, edge)?;
        }

        self.check_reachable(&tree, root)?;
        Ok(tree)
    }

    fn ensure_node(&mut self, tree: &mut TreeArena, value: i64) {
        if !self.nodes.contains_key(&value) {
            let idx = tree.insert_node(value);
            self.nodes.insert(value, idx);
            self.order.push(value);
        }
    }

    fn index_of(&self, value: i64) -> DomainResult<Index> {
        // Every value in an edge was registered in the first pass
        self.nodes.get(&value).copied().ok_or(DomainError::NoRootFound)
    }

    fn find_root(&self) -> DomainResult<i64> {
        let roots: Vec<i64> = self
            .order
            .iter()
            .copied()
            .filter(|value| !self.child_values.contains(value))
            .collect();

        match roots.as_slice() {
            [] => Err(DomainError::NoRootFound),
            [root] => Ok(*root),
            _ => Err(DomainError::MultipleRoots { roots }),
        }
    }

    fn link(&self, tree: &mut TreeArena, edge: &Edge) -> DomainResult<()> {
        let side = match edge.child.cmp(&edge.parent) {
            std::cmp::Ordering::Less => Side::Left,
            std::cmp::Ordering::Greater => Side::Right,
            std::cmp::Ordering::Equal => {
                return Err(DomainError::EqualParentChild { value: edge.child })
            }
        };

        let parent_idx = self.index_of(edge.parent)?;
        let child_idx = self.index_of(edge.child)?;

        let existing = tree
            .get_node(parent_idx)
            .and_then(|parent| parent.child(side))
            .and_then(|idx| tree.get_node(idx))
            .map(|node| node.value);
        if let Some(existing) = existing {
            return Err(DomainError::DuplicateChildSlot {
                parent: edge.parent,
                side,
                existing,
                conflicting: edge.child,
            });
        }

        if let Some(parent) = tree.get_node_mut(parent_idx) {
            *parent.slot_mut(side) = Some(child_idx);
        }
        Ok(())
    }

    /// Nodes that cannot be reached from the root hang off a cycle of their own.
    fn check_reachable(&self, tree: &TreeArena, root: i64) -> DomainResult<()> {
        let mut visited = HashSet::with_capacity(self.order.len());
        let mut stack: Vec<Index> = tree.root_index().into_iter().collect();

        while let Some(idx) = stack.pop() {
            if !visited.insert(idx) {
                continue;
            }
            if let Some(node) = tree.get_node(idx) {
                stack.extend(node.left);
                stack.extend(node.right);
            }
        }

        let detached: Vec<i64> = self
            .order
            .iter()
            .copied()
            .filter(|value| {
                self.nodes
                    .get(value)
                    .is_some_and(|idx| !visited.contains(idx))
            })
            .collect();

        if detached.is_empty() {
            Ok(())
        } else {
            Err(DomainError::DetachedCycle {
                root,
                values: detached,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(pairs: &[(i64, i64)]) -> Vec<Edge> {
        pairs.iter().copied().map(Edge::from).collect()
    }

    #[test]
    fn given_valid_edges_when_building_then_links_by_ordering() {
        let mut builder = TreeBuilder::new();
        let tree = builder.build(&edges(&[(2, 1), (4, 2), (4, 7)])).unwrap();

        let root = tree.root().unwrap();
        assert_eq!(root.value(), 4);
        assert_eq!(root.left().unwrap().value(), 2);
        assert_eq!(root.right().unwrap().value(), 7);
        assert_eq!(root.left().unwrap().left().unwrap().value(), 1);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn given_no_edges_when_building_then_no_root_found() {
        let mut builder = TreeBuilder::new();
        assert_eq!(builder.build(&[]).unwrap_err(), DomainError::NoRootFound);
    }

    #[test]
    fn given_full_cycle_when_building_then_no_root_found() {
        let mut builder = TreeBuilder::new();
        let err = builder.build(&edges(&[(1, 2), (2, 3), (3, 1)])).unwrap_err();
        assert_eq!(err, DomainError::NoRootFound);
    }

    #[test]
    fn given_two_roots_when_building_then_reports_them_in_first_seen_order() {
        let mut builder = TreeBuilder::new();
        let err = builder.build(&edges(&[(5, 3), (9, 10)])).unwrap_err();
        assert_eq!(err, DomainError::MultipleRoots { roots: vec![5, 9] });
    }

    #[test]
    fn given_self_loop_when_building_then_equal_parent_child() {
        let mut builder = TreeBuilder::new();
        let err = builder.build(&edges(&[(1, 3), (3, 3)])).unwrap_err();
        assert_eq!(err, DomainError::EqualParentChild { value: 3 });
    }

    #[test]
    fn given_self_loop_on_only_root_when_building_then_equal_parent_child() {
        let mut builder = TreeBuilder::new();
        let err = builder.build(&edges(&[(3, 3), (3, 5)])).unwrap_err();
        assert_eq!(err, DomainError::EqualParentChild { value: 3 });
    }

    #[test]
    fn given_second_left_child_when_building_then_duplicate_slot() {
        let mut builder = TreeBuilder::new();
        let err = builder.build(&edges(&[(10, 5), (10, 3)])).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateChildSlot {
                parent: 10,
                side: Side::Left,
                existing: 5,
                conflicting: 3,
            }
        );
    }

    #[test]
    fn given_cycle_beside_tree_when_building_then_detached_cycle() {
        let mut builder = TreeBuilder::new();
        let err = builder
            .build(&edges(&[(10, 5), (1, 2), (2, 1)]))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DetachedCycle {
                root: 10,
                values: vec![1, 2],
            }
        );
    }

    #[test]
    fn given_reused_builder_when_building_again_then_state_is_fresh() {
        let mut builder = TreeBuilder::new();
        builder.build(&edges(&[(2, 1)])).unwrap();
        let tree = builder.build(&edges(&[(8, 9)])).unwrap();
        assert_eq!(tree.root().unwrap().value(), 8);
        assert_eq!(tree.len(), 2);
    }
}
