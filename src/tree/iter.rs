//! In-order iteration.

use super::RedBlackTree;
use super::node::{Arena, NodeId, Side};
use smallvec::SmallVec;
use std::iter::FusedIterator;

/// Inline capacity of the descent stacks; covers trees of up to 65535 keys
/// without spilling to the heap.
const INLINE_DEPTH: usize = 32;

type Spine = SmallVec<[NodeId; INLINE_DEPTH]>;

impl<K> RedBlackTree<K> {
    /// Returns a lazy iterator over the keys in ascending order.
    ///
    /// The walk keeps an explicit stack of at most one path, so it never
    /// recurses, and it can be restarted at any time by calling `iter` again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
    /// assert_eq!(tree.iter().rev().next(), Some(&3));
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.arena, self.root, self.len())
    }
}

// =============================================================================
// Borrowing Iterator
// =============================================================================

/// An iterator over the keys of a [`RedBlackTree`] in ascending order.
///
/// Created by [`RedBlackTree::iter`].
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    front: Spine,
    back: Spine,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(arena: &'a Arena<K>, root: Option<NodeId>, length: usize) -> Self {
        let mut iterator = Self {
            arena,
            front: Spine::new(),
            back: Spine::new(),
            remaining: length,
        };
        iterator.descend(root, Side::Left);
        iterator.descend(root, Side::Right);
        iterator
    }

    /// Pushes the chain of `side` children starting at `cursor` onto the
    /// stack serving that end.
    fn descend(&mut self, mut cursor: Option<NodeId>, side: Side) {
        let stack = match side {
            Side::Left => &mut self.front,
            Side::Right => &mut self.back,
        };
        while let Some(id) = cursor {
            stack.push(id);
            cursor = self.arena[id].child(side);
        }
    }

    fn next_id(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front.pop()?;
        self.remaining -= 1;
        self.descend(self.arena[id].right, Side::Left);
        Some(id)
    }

    fn next_back_id(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back.pop()?;
        self.remaining -= 1;
        self.descend(self.arena[id].left, Side::Right);
        Some(id)
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.next_id().map(|id| &arena[id].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.next_back_id().map(|id| &arena[id].key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

// =============================================================================
// Owning Iterator
// =============================================================================

/// An owning iterator over the keys of a [`RedBlackTree`] in ascending order.
///
/// Created by the [`IntoIterator`] implementation of [`RedBlackTree`].
pub struct IntoIter<K> {
    keys: std::vec::IntoIter<K>,
}

impl<K> IntoIter<K> {
    pub(super) fn new(mut tree: RedBlackTree<K>) -> Self {
        let mut walk = Iter::new(&tree.arena, tree.root, tree.len());
        let order: Vec<NodeId> = std::iter::from_fn(|| walk.next_id()).collect();
        let keys = order
            .into_iter()
            .filter_map(|id| tree.arena.release(id))
            .map(|node| node.key)
            .collect::<Vec<_>>();
        tree.root = None;
        Self {
            keys: keys.into_iter(),
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.keys.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.keys.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.keys.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_iter_empty() {
        let tree: RedBlackTree<i32> = RedBlackTree::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
        assert_eq!(tree.iter().len(), 0);
    }

    #[rstest]
    fn test_iter_is_sorted_regardless_of_insertion_order() {
        let tree: RedBlackTree<i32> = [5, 1, 9, 3, 7, 2, 8].into_iter().collect();
        assert_eq!(
            tree.iter().copied().collect::<Vec<_>>(),
            vec![1, 2, 3, 5, 7, 8, 9]
        );
    }

    #[rstest]
    fn test_iter_reverse() {
        let tree: RedBlackTree<i32> = (0..100).collect();
        assert_eq!(
            tree.iter().rev().copied().collect::<Vec<_>>(),
            (0..100).rev().collect::<Vec<_>>()
        );
    }

    #[rstest]
    fn test_iter_from_both_ends_meets_in_the_middle() {
        let tree: RedBlackTree<i32> = (1..=5).collect();
        let mut iterator = tree.iter();

        assert_eq!(iterator.next(), Some(&1));
        assert_eq!(iterator.next_back(), Some(&5));
        assert_eq!(iterator.next(), Some(&2));
        assert_eq!(iterator.next_back(), Some(&4));
        assert_eq!(iterator.len(), 1);
        assert_eq!(iterator.next(), Some(&3));
        assert_eq!(iterator.next_back(), None);
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_iter_is_restartable() {
        let tree: RedBlackTree<i32> = (0..10).collect();
        let first: Vec<_> = tree.iter().take(3).collect();
        let second: Vec<_> = tree.iter().take(3).collect();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_iter_clone_resumes_from_same_position() {
        let tree: RedBlackTree<i32> = (0..10).collect();
        let mut iterator = tree.iter();
        iterator.next();
        let copy = iterator.clone();
        assert!(iterator.eq(copy));
    }

    #[rstest]
    fn test_size_hint_is_exact() {
        let tree: RedBlackTree<i32> = (0..42).collect();
        let mut iterator = tree.iter();
        iterator.nth(10);
        assert_eq!(iterator.size_hint(), (31, Some(31)));
    }

    #[rstest]
    fn test_into_iter_yields_owned_keys_in_order() {
        let tree: RedBlackTree<String> = ["pear", "apple", "fig"]
            .into_iter()
            .map(String::from)
            .collect();
        let keys: Vec<String> = tree.into_iter().collect();
        assert_eq!(keys, vec!["apple", "fig", "pear"]);
    }

    #[rstest]
    fn test_into_iter_after_deletes() {
        let mut tree: RedBlackTree<i32> = (0..20).collect();
        for key in (0..20).step_by(2) {
            tree.delete(&key).unwrap();
        }
        let iterator = tree.into_iter();
        assert_eq!(iterator.len(), 10);
        assert_eq!(iterator.collect::<Vec<_>>(), (1..20).step_by(2).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_borrowing_into_iterator() {
        let tree: RedBlackTree<i32> = (0..3).collect();
        let mut total = 0;
        for key in &tree {
            total += key;
        }
        assert_eq!(total, 3);
    }
}
