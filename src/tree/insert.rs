//! Insertion and the insert-fixup loop.

use super::RedBlackTree;
use super::node::{Color, Node, NodeId, Side};
use crate::error::TreeError;
use std::cmp::Ordering;

impl<K: Ord> RedBlackTree<K> {
    /// Inserts `key` into the tree.
    ///
    /// The key is placed as a red leaf at its ordered position and the tree
    /// is rebalanced on the way back up.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicateKey`] if the key is already present.
    /// The tree is not modified in that case.
    ///
    /// # Complexity
    ///
    /// O(log N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::{RedBlackTree, TreeError};
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), TreeError> {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;

        while let Some(id) = cursor {
            let node = &self.arena[id];
            side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    tracing::debug!("insert rejected: duplicate key");
                    return Err(TreeError::DuplicateKey);
                }
            };
            parent = Some(id);
            cursor = node.child(side);
        }

        let leaf = self.arena.allocate(Node::new_red(key, parent));
        match parent {
            None => self.root = Some(leaf),
            Some(parent) => self.arena[parent].set_child(side, Some(leaf)),
        }

        self.insert_fixup(leaf);
        Ok(())
    }
}

impl<K> RedBlackTree<K> {
    /// Restores the red-black invariants after `node` was attached as a red leaf.
    ///
    /// Each pass handles exactly one case. Only case 3 moves the violation
    /// upward; cases 1, 2 and 5 finish, case 4 reshapes into case 5.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            // Case 1: the node is the root.
            let Some(parent) = self.arena[node].parent else {
                tracing::trace!("insert fixup: case 1, recolor root");
                self.set_color(node, Color::Black);
                return;
            };

            // Case 2: a black parent tolerates a red child.
            if self.arena[parent].color == Color::Black {
                tracing::trace!("insert fixup: case 2, black parent");
                return;
            }

            // A red parent is never the root, so the grandparent exists.
            let Some(grandparent) = self.arena[parent].parent else {
                self.set_color(parent, Color::Black);
                return;
            };
            let parent_side = self.side_of(parent, grandparent);
            let uncle = self.arena[grandparent].child(parent_side.opposite());

            // Case 3: red uncle, push the blackness down from the grandparent.
            if let Some(uncle) = uncle.filter(|&uncle| self.is_red(Some(uncle))) {
                tracing::trace!("insert fixup: case 3, red uncle");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Case 4: inner grandchild, rotate it into the outer position.
            if self.side_of(node, parent) != parent_side {
                tracing::trace!("insert fixup: case 4, inner grandchild");
                self.rotate(parent, parent_side);
                node = parent;
                continue;
            }

            // Case 5: outer grandchild, rotate the grandparent away from it.
            tracing::trace!("insert fixup: case 5, outer grandchild");
            self.rotate(grandparent, parent_side.opposite());
            self.swap_colors(parent, grandparent);
            return;
        }
    }
}
