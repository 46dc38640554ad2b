//! Deletion and the delete-fixup loop.

use super::RedBlackTree;
use super::node::{Color, NodeId, Side};
use crate::error::TreeError;
use std::borrow::Borrow;

impl<K: Ord> RedBlackTree<K> {
    /// Removes `key` from the tree and returns the stored key.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// is detached from its own position and takes over the deleted node's
    /// place, children and color. Rebalancing runs only when a black node
    /// left the structure.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if the key is absent. The tree is not
    /// modified in that case.
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
    /// let mut tree: RedBlackTree<i32> = [1, 2, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Ok(2));
    /// assert_eq!(tree.delete(&2), Err(TreeError::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Result<K, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(target) = self.find_id(key) else {
            tracing::debug!("delete rejected: key not found");
            return Err(TreeError::NotFound);
        };
        self.unlink(target);
        self.arena
            .release(target)
            .map(|node| node.key)
            .ok_or(TreeError::NotFound)
    }
}

impl<K> RedBlackTree<K> {
    /// Splices `target` out of the link graph and rebalances.
    ///
    /// The node that structurally leaves its position is `target` itself
    /// with fewer than two children and its successor otherwise; its color
    /// decides whether the fixup runs. `target`'s slot stays allocated for
    /// the caller to release.
    fn unlink(&mut self, target: NodeId) {
        let node = &self.arena[target];
        let (left, right, parent, color) = (node.left, node.right, node.parent, node.color);

        let (removed_color, replacement, hole_parent) = match (left, right) {
            (None, child) | (child, None) => {
                self.transplant(target, child);
                (color, child, parent)
            }
            (Some(left), Some(right)) => {
                let successor = self.subtree_minimum(right);
                let successor_color = self.arena[successor].color;
                let replacement = self.arena[successor].right;

                let successor_parent = self.arena[successor].parent;
                let hole_parent = if successor_parent == Some(target) {
                    Some(successor)
                } else {
                    self.transplant(successor, replacement);
                    self.arena[successor].right = Some(right);
                    self.arena[right].parent = Some(successor);
                    successor_parent
                };

                self.transplant(target, Some(successor));
                self.arena[successor].left = Some(left);
                self.arena[left].parent = Some(successor);
                self.set_color(successor, color);

                (successor_color, replacement, hole_parent)
            }
        };

        tracing::trace!(?removed_color, "delete spliced");
        if removed_color == Color::Black {
            self.delete_fixup(replacement, hole_parent);
        }
    }

    /// Puts `replacement` where `node` hangs, fixing the replacement's parent link.
    fn transplant(&mut self, node: NodeId, replacement: Option<NodeId>) {
        let parent = self.arena[node].parent;
        self.replace_child(parent, node, replacement);
        if let Some(replacement) = replacement {
            self.arena[replacement].parent = parent;
        }
    }

    /// Restores the red-black invariants after a black node left the slot
    /// now held by `node` (possibly nil) under `parent`.
    ///
    /// The path through `node` is one black short. Each pass handles one
    /// case: cases 2 and 5 reshape and re-evaluate, case 3 moves the deficit
    /// up one level, the rest finish.
    fn delete_fixup(&mut self, mut node: Option<NodeId>, mut parent: Option<NodeId>) {
        loop {
            // The deficit reached the root and is shared by every path.
            let Some(current_parent) = parent else {
                if let Some(node) = node {
                    self.set_color(node, Color::Black);
                }
                return;
            };

            // A red node absorbs the missing black.
            if let Some(red) = node.filter(|&id| self.is_red(Some(id))) {
                tracing::trace!("delete fixup: red replacement");
                self.set_color(red, Color::Black);
                return;
            }

            let side = if self.arena[current_parent].left == node {
                Side::Left
            } else {
                Side::Right
            };
            // The sibling's side is at least one black deep, so it is never nil.
            let Some(sibling) = self.arena[current_parent].child(side.opposite()) else {
                return;
            };

            // Case 2: red sibling, rotate it above the parent.
            if self.is_red(Some(sibling)) {
                tracing::trace!("delete fixup: case 2, red sibling");
                self.rotate(current_parent, side);
                self.swap_colors(current_parent, sibling);
                continue;
            }

            let near = self.arena[sibling].child(side);
            let far = self.arena[sibling].child(side.opposite());

            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                if self.arena[current_parent].color == Color::Black {
                    // Case 3: everything black, push the deficit up.
                    tracing::trace!("delete fixup: case 3, all black");
                    node = Some(current_parent);
                    parent = self.arena[current_parent].parent;
                    continue;
                }
                // Case 4: red parent trades colors with the sibling.
                tracing::trace!("delete fixup: case 4, red parent");
                self.set_color(current_parent, Color::Black);
                return;
            }

            // Case 5: only the near nephew is red, turn it into the far one.
            if let Some(near) = near.filter(|_| !self.is_red(far)) {
                tracing::trace!("delete fixup: case 5, red near nephew");
                self.rotate(sibling, side.opposite());
                self.swap_colors(sibling, near);
                continue;
            }

            // Case 6: red far nephew, rotate the sibling above the parent.
            tracing::trace!("delete fixup: case 6, red far nephew");
            self.rotate(current_parent, side);
            self.swap_colors(current_parent, sibling);
            if let Some(far) = far {
                self.set_color(far, Color::Black);
            }
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keys(tree: &RedBlackTree<i32>) -> Vec<i32> {
        tree.iter().copied().collect()
    }

    fn shape(tree: &RedBlackTree<i32>) -> String {
        tree.sideways().to_string()
    }

    #[rstest]
    fn test_delete_sole_key_empties_tree() {
        let mut tree: RedBlackTree<i32> = std::iter::once(1).collect();

        assert_eq!(tree.delete(&1), Ok(1));
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.search(&1).err(), Some(TreeError::NotFound));
    }

    #[rstest]
    fn test_delete_missing_key_leaves_tree_unchanged() {
        let mut tree: RedBlackTree<i32> = (0..20).collect();
        let before = shape(&tree);

        assert_eq!(tree.delete(&99), Err(TreeError::NotFound));
        assert_eq!(shape(&tree), before);
        assert_eq!(tree.len(), 20);
    }

    #[rstest]
    fn test_delete_red_leaf_needs_no_fixup() {
        let mut tree: RedBlackTree<i32> = [20, 10, 30].into_iter().collect();

        assert_eq!(tree.delete(&10), Ok(10));
        assert_eq!(shape(&tree), "\t30 (R)\n20 (B)\n");
    }

    #[rstest]
    fn test_delete_black_node_with_red_child_recolors_child() {
        let mut tree: RedBlackTree<i32> = [20, 10, 30, 5].into_iter().collect();

        assert_eq!(tree.delete(&10), Ok(10));
        assert_eq!(shape(&tree), "\t30 (B)\n20 (B)\n\t5 (B)\n");
    }

    #[rstest]
    fn test_delete_root_with_two_children_promotes_successor() {
        let mut tree: RedBlackTree<i32> = [20, 10, 30].into_iter().collect();

        assert_eq!(tree.delete(&20), Ok(20));
        assert_eq!(shape(&tree), "30 (B)\n\t10 (R)\n");
    }

    #[rstest]
    fn test_delete_with_distant_successor() {
        let mut tree: RedBlackTree<i32> = [10, 20, 30, 40, 50, 25].into_iter().collect();

        assert_eq!(tree.delete(&20), Ok(20));
        assert_eq!(keys(&tree), vec![10, 25, 30, 40, 50]);
        assert!(tree.validate().is_ok());
    }

    #[rstest]
    fn test_black_leaf_with_black_sibling_and_red_parent() {
        // 20(B) <- 10(B), 40(R) <- (30(B), 50(B))
        let mut tree: RedBlackTree<i32> = [20, 10, 40, 30, 50, 60].into_iter().collect();
        tree.delete(&60).unwrap();
        assert_eq!(
            shape(&tree),
            "\t\t50 (B)\n\t40 (R)\n\t\t30 (B)\n20 (B)\n\t10 (B)\n"
        );

        // Removing 30 leaves a deficit under red 40 whose sibling 50 is black.
        tree.delete(&30).unwrap();
        assert_eq!(shape(&tree), "\t\t50 (R)\n\t40 (B)\n20 (B)\n\t10 (B)\n");
    }

    #[rstest]
    fn test_black_leaf_with_red_sibling_rotates_first() {
        let mut tree: RedBlackTree<i32> = [20, 10, 40, 30, 50, 60].into_iter().collect();
        tree.delete(&60).unwrap();

        // Sibling 40 of the deleted 10 is red.
        tree.delete(&10).unwrap();
        assert_eq!(shape(&tree), "\t50 (B)\n40 (B)\n\t\t30 (R)\n\t20 (B)\n");
    }

    #[rstest]
    fn test_all_black_deficit_propagates_to_root() {
        let mut tree: RedBlackTree<i32> = [20, 10, 30, 5].into_iter().collect();
        tree.delete(&5).unwrap();
        assert_eq!(shape(&tree), "\t30 (B)\n20 (B)\n\t10 (B)\n");

        tree.delete(&10).unwrap();
        assert_eq!(shape(&tree), "\t30 (R)\n20 (B)\n");
        assert_eq!(tree.black_height(), 1);
    }

    #[rstest]
    #[case::near_nephew(25)]
    #[case::far_nephew(35)]
    fn test_red_nephew_cases(#[case] nephew: i32) {
        let mut tree: RedBlackTree<i32> = [20, 10, 30, 5].into_iter().collect();
        tree.delete(&5).unwrap();
        tree.insert(nephew).unwrap();

        tree.delete(&10).unwrap();

        let mut expected = vec![20, 30, nephew];
        expected.sort_unstable();
        assert_eq!(keys(&tree), expected);
        let root = tree.root().unwrap();
        assert_eq!(*root.key(), expected[1]);
        assert!(root.is_black());
        assert!(root.left().unwrap().is_black());
        assert!(root.right().unwrap().is_black());
    }

    #[rstest]
    fn test_delete_everything_in_mixed_order() {
        let mut tree: RedBlackTree<i32> = (0..300).collect();
        for key in (0..300).filter(|key| key % 3 == 0).chain((0..300).filter(|key| key % 3 != 0)) {
            assert_eq!(tree.delete(&key), Ok(key));
            assert!(tree.validate().is_ok(), "invalid after deleting {key}");
        }
        assert!(tree.is_empty());
    }

    #[rstest]
    fn test_deleted_slots_are_reused() {
        let mut tree: RedBlackTree<i32> = (0..10).collect();
        for key in 0..5 {
            tree.delete(&key).unwrap();
        }
        for key in 100..105 {
            tree.insert(key).unwrap();
        }
        assert_eq!(tree.arena.ids().count(), 10);
        assert!(tree.validate().is_ok());
    }
}
