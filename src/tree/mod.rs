//! Mutable ordered set based on a red-black tree.
//!
//! This module provides [`RedBlackTree`], an ordered set of unique keys that
//! keeps its height within `2 * log2(n + 1)` by recoloring and rotating after
//! every insert and delete.
//!
//! # Overview
//!
//! - O(log N) [`insert`](RedBlackTree::insert)
//! - O(log N) [`delete`](RedBlackTree::delete)
//! - O(log N) [`search`](RedBlackTree::search)
//! - O(N) in-order [`iter`](RedBlackTree::iter), lazy and restartable
//! - O(1) [`len`](RedBlackTree::len) and [`is_empty`](RedBlackTree::is_empty)
//!
//! # Examples
//!
//! ```rust
//! use redblack::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key).unwrap();
//! }
//!
//! // Inserting 30 rotated the tree left around 10.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.color(), Color::Black);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
//! ```
//!
//! # Internal Structure
//!
//! The tree maintains the following invariants:
//! 1. Keys are in strict binary-search-tree order
//! 2. The root is black
//! 3. All leaves (NIL) are black
//! 4. Red nodes have only black children
//! 5. Every path from a node to a descendant leaf has the same number of black nodes
//!
//! Nodes are stored in an arena and linked by index, so the whole tree is
//! a single owned value with no `unsafe` and no reference counting.

mod delete;
mod insert;
mod iter;
mod node;
mod rotation;
mod search;
mod validate;

pub use iter::{IntoIter, Iter};
pub use node::{ChildSide, Color};
pub use search::NodeRef;
pub use validate::InvariantViolation;

use node::{Arena, NodeId, Side};
use std::fmt;
use std::hash::{Hash, Hasher};

// =============================================================================
// RedBlackTree Definition
// =============================================================================

/// An ordered set of unique keys backed by a red-black tree.
///
/// Keys must implement `Ord`. Inserting a key that is already present is
/// rejected with [`TreeError::DuplicateKey`](crate::TreeError::DuplicateKey)
/// and leaves the tree untouched.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `new`      | O(1)       |
/// | `insert`   | O(log N)   |
/// | `delete`   | O(log N)   |
/// | `search`   | O(log N)   |
/// | `contains` | O(log N)   |
/// | `first`/`last` | O(log N) |
/// | `iter`     | O(N) total |
/// | `len`      | O(1)       |
///
/// # Examples
///
/// ```rust
/// use redblack::{RedBlackTree, TreeError};
///
/// let mut tree: RedBlackTree<i32> = [10, 20, 30, 40, 50, 25].into_iter().collect();
///
/// assert_eq!(tree.delete(&20), Ok(20));
/// assert_eq!(tree.search(&20).err(), Some(TreeError::NotFound));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![10, 25, 30, 40, 50]);
/// assert!(tree.validate().is_ok());
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K> {
    /// Node storage
    arena: Arena<K>,
    /// Root node of the tree
    root: Option<NodeId>,
}

static_assertions::assert_impl_all!(RedBlackTree<i32>: Send, Sync, Clone, Default);

impl<K> RedBlackTree<K> {
    /// Creates a new empty tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<i32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Returns the number of keys in the tree.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns a handle to the root node, or `None` for an empty tree.
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|id| NodeRef::new(&self.arena, id))
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single node has height 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redblack::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = (0..1000).collect();
    /// assert!(tree.height() <= 2 * 10);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            let node = &self.arena[id];
            pending.extend(node.left.map(|child| (child, depth + 1)));
            pending.extend(node.right.map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// Returns the black-height of the root.
    ///
    /// Counts the black nodes on a path from the root down to a nil leaf,
    /// excluding the root and including the nil. An empty tree returns 0.
    /// Only meaningful while the tree is balanced, which every public
    /// operation guarantees; [`validate`](Self::validate) checks all paths.
    #[must_use]
    pub fn black_height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut count = 1;
        let mut cursor = self.arena[root].left;
        while let Some(id) = cursor {
            if self.arena[id].color == Color::Black {
                count += 1;
            }
            cursor = self.arena[id].left;
        }
        count
    }

    // -------------------------------------------------------------------------
    // Link helpers shared by the rotation and fixup routines
    // -------------------------------------------------------------------------

    /// Absent nodes are black.
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.arena[id].color == Color::Red)
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena[id].color = color;
    }

    fn swap_colors(&mut self, first: NodeId, second: NodeId) {
        let first_color = self.arena[first].color;
        self.arena[first].color = self.arena[second].color;
        self.arena[second].color = first_color;
    }

    /// Which slot of `parent` holds `child`.
    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referenced `old` (a parent slot or the root) at `new`.
    ///
    /// Does not touch `new`'s parent link.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.arena[parent].set_child(side, new);
            }
        }
    }

    /// Leftmost node of the subtree rooted at `id`.
    fn subtree_minimum(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.arena[id].left {
            id = left;
        }
        id
    }

    /// Rightmost node of the subtree rooted at `id`.
    fn subtree_maximum(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.arena[id].right {
            id = right;
        }
        id
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K> Default for RedBlackTree<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a tree from keys in iteration order; repeated keys are skipped.
impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// Inserts every key; keys already present are skipped.
impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            let _ = self.insert(key);
        }
    }
}

impl<K> IntoIterator for RedBlackTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two trees are equal when they hold the same keys, whatever their shape.
impl<K: PartialEq> PartialEq for RedBlackTree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for RedBlackTree<K> {}

/// Hashes the length followed by every key in order, consistent with `Eq`.
impl<K: Hash> Hash for RedBlackTree<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for key in self {
            key.hash(state);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for RedBlackTree<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display> fmt::Display for RedBlackTree<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for key in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K> serde::Serialize for RedBlackTree<K>
where
    K: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            sequence.serialize_element(key)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct RedBlackTreeVisitor<K> {
    key_marker: std::marker::PhantomData<K>,
}

#[cfg(feature = "serde")]
impl<K> RedBlackTreeVisitor<K> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::de::Visitor<'de> for RedBlackTreeVisitor<K>
where
    K: serde::Deserialize<'de> + Ord,
{
    type Value = RedBlackTree<K>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of unique keys")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut tree = RedBlackTree::new();
        while let Some(key) = access.next_element()? {
            tree.insert(key).map_err(serde::de::Error::custom)?;
        }
        Ok(tree)
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::Deserialize<'de> for RedBlackTree<K>
where
    K: serde::Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackTreeVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
