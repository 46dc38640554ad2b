//! Structural self-check of the red-black invariants.

use super::RedBlackTree;
use super::node::{Color, NodeId};
use thiserror::Error;

/// A broken red-black invariant reported by [`RedBlackTree::validate`].
///
/// Every public operation preserves the invariants, so these only show up if
/// a bug slipped into the balancing code.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantViolation {
    /// The root is red.
    #[error("root is red")]
    RedRoot,

    /// A red node has a red child.
    #[error("red node has a red child")]
    RedRedEdge,

    /// Two paths down to nil leaves pass through different numbers of black nodes.
    #[error("black-height mismatch: expected {expected}, found {found}")]
    BlackHeightMismatch {
        /// Black-height of the first path checked.
        expected: usize,
        /// Black-height of the offending path.
        found: usize,
    },

    /// In-order keys are not strictly ascending.
    #[error("keys out of order")]
    OrderViolation,

    /// A child's parent link does not point back at its parent, or the root
    /// has a parent.
    #[error("parent link does not match child link")]
    BrokenParentLink,
}

impl<K: Ord> RedBlackTree<K> {
    /// Checks every red-black invariant and returns the black-height.
    ///
    /// The black-height counts the black nodes on any path from the root to
    /// a nil leaf, excluding the root and counting the nil; an empty tree
    /// reports 0. Runs in O(N log N) without recursion.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = (0..100).collect();
    /// let black_height = tree.validate().unwrap();
    /// assert_eq!(black_height, tree.black_height());
    /// ```
    pub fn validate(&self) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root else {
            return Ok(0);
        };
        if self.arena[root].parent.is_some() {
            return Err(InvariantViolation::BrokenParentLink);
        }
        if self.arena[root].color == Color::Red {
            return Err(InvariantViolation::RedRoot);
        }

        let ordered = self
            .iter()
            .zip(self.iter().skip(1))
            .all(|(previous, next)| previous < next);
        if !ordered {
            return Err(InvariantViolation::OrderViolation);
        }

        let mut expected = None;
        for id in self.arena.ids() {
            let node = &self.arena[id];
            for child in [node.left, node.right].into_iter().flatten() {
                if self.arena[child].parent != Some(id) {
                    return Err(InvariantViolation::BrokenParentLink);
                }
                if node.color == Color::Red && self.arena[child].color == Color::Red {
                    return Err(InvariantViolation::RedRedEdge);
                }
            }
            if node.left.is_some() && node.right.is_some() {
                continue;
            }
            let found = self.black_nodes_above_nil(id);
            match expected {
                None => expected = Some(found),
                Some(expected) if expected != found => {
                    return Err(InvariantViolation::BlackHeightMismatch { expected, found });
                }
                Some(_) => {}
            }
        }
        Ok(expected.unwrap_or(1))
    }
}

impl<K> RedBlackTree<K> {
    /// Black nodes from `id` up to the root, excluding the root, plus the
    /// nil leaf hanging under `id`.
    fn black_nodes_above_nil(&self, id: NodeId) -> usize {
        let mut count = 1;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.arena[current];
            if node.parent.is_some() && node.color == Color::Black {
                count += 1;
            }
            cursor = node.parent;
        }
        count
    }
}
