//! The rotation primitive used by both fixup loops.

use super::RedBlackTree;
use super::node::{NodeId, Side};

impl<K> RedBlackTree<K> {
    /// Rotates the subtree rooted at `node` toward `direction`.
    ///
    /// The child on the opposite side (the pivot) takes `node`'s place,
    /// `node` becomes the pivot's `direction` child, and the pivot's former
    /// inner subtree moves over to `node`. `Side::Left` is a left rotation
    /// (the right child rises) and `Side::Right` a right rotation.
    ///
    /// In-order sequence is preserved. Colors are left to the caller. A
    /// rotation without a pivot child is a no-op.
    pub(super) fn rotate(&mut self, node: NodeId, direction: Side) {
        let Some(pivot) = self.arena[node].child(direction.opposite()) else {
            return;
        };

        let transferred = self.arena[pivot].child(direction);
        self.arena[node].set_child(direction.opposite(), transferred);
        if let Some(transferred) = transferred {
            self.arena[transferred].parent = Some(node);
        }

        let parent = self.arena[node].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, node, Some(pivot));

        self.arena[pivot].set_child(direction, Some(node));
        self.arena[node].parent = Some(pivot);

        tracing::trace!(?direction, at_root = parent.is_none(), "rotate");
    }
}
