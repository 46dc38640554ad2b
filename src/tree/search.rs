//! Read-only descent and node handles.

use super::RedBlackTree;
use super::node::{Arena, ChildSide, Color, NodeId};
use crate::error::TreeError;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// NodeRef Definition
// =============================================================================

/// A borrowed handle to one node of a [`RedBlackTree`].
///
/// The handle lives no longer than the shared borrow of the tree it came
/// from, so it always points at a live node.
///
/// # Examples
///
/// ```rust
/// use redblack::{ChildSide, Color, RedBlackTree};
///
/// let tree: RedBlackTree<i32> = [10, 20, 30].into_iter().collect();
/// let node = tree.search(&10).unwrap();
///
/// assert_eq!(*node.key(), 10);
/// assert_eq!(node.color(), Color::Red);
/// assert_eq!(node.child_side(), ChildSide::Left);
/// assert_eq!(node.parent().map(|parent| *parent.key()), Some(20));
/// assert!(node.left().is_none());
/// ```
pub struct NodeRef<'a, K> {
    arena: &'a Arena<K>,
    id: NodeId,
}

impl<'a, K> NodeRef<'a, K> {
    pub(super) const fn new(arena: &'a Arena<K>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.arena, id))
    }

    /// The key stored in this node.
    #[must_use]
    pub fn key(&self) -> &'a K {
        &self.arena[self.id].key
    }

    /// The node's color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.arena[self.id].color
    }

    /// Returns `true` if the node is red.
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    /// Returns `true` if the node is black.
    #[must_use]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// The left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.at(self.arena[self.id].left)
    }

    /// The right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.at(self.arena[self.id].right)
    }

    /// The parent, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.at(self.arena[self.id].parent)
    }

    /// Whether this node is its parent's left or right child, or the root.
    #[must_use]
    pub fn child_side(&self) -> ChildSide {
        match self.arena[self.id].parent {
            None => ChildSide::Root,
            Some(parent) if self.arena[parent].left == Some(self.id) => ChildSide::Left,
            Some(_) => ChildSide::Right,
        }
    }
}

impl<K> Clone for NodeRef<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeRef<'_, K> {}

impl<K> PartialEq for NodeRef<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<K> Eq for NodeRef<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeRef<'_, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("NodeRef")
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}

// =============================================================================
// Search Operations
// =============================================================================

impl<K: Ord> RedBlackTree<K> {
    /// Descends from the root to the node holding `key`.
    pub(super) fn find_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = &self.arena[id];
            cursor = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Finds the node holding `key`.
    ///
    /// The key may be any borrowed form of the tree's key type, but the
    /// ordering on the borrowed form must match the ordering on the key type.
    /// Searching never modifies the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] if the key is absent.
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
    /// let tree: RedBlackTree<String> = ["hello".to_string()].into_iter().collect();
    ///
    /// assert_eq!(tree.search("hello").unwrap().key(), "hello");
    /// assert_eq!(tree.search("world").err(), Some(TreeError::NotFound));
    /// ```
    pub fn search<Q>(&self, key: &Q) -> Result<NodeRef<'_, K>, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key)
            .map(|id| NodeRef::new(&self.arena, id))
            .ok_or_else(|| {
                tracing::debug!("search missed");
                TreeError::NotFound
            })
    }

    /// Returns `true` if the tree holds `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).is_some()
    }
}

impl<K> RedBlackTree<K> {
    /// Returns the smallest key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.first(), Some(&1));
    /// assert_eq!(tree.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.root
            .map(|root| &self.arena[self.subtree_minimum(root)].key)
    }

    /// Returns the largest key.
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.root
            .map(|root| &self.arena[self.subtree_maximum(root)].key)
    }
}
