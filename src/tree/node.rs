//! Node storage for the red-black tree.
//!
//! Nodes live in an [`Arena`] and refer to each other through [`NodeId`]
//! indices. A node's `left`/`right` links are the owning edges of the tree:
//! a node is alive exactly as long as it is reachable from the root through
//! them. The `parent` link is a back-index used for upward walks during
//! rebalancing and never decides whether a node lives.

use std::ops::{Index, IndexMut};

// =============================================================================
// Color Definition
// =============================================================================

/// The color of a red-black tree node.
///
/// Absent children count as [`Color::Black`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    /// A red node. Never the root, never the child of another red node.
    Red,
    /// A black node.
    Black,
}

impl Color {
    /// Single-letter tag used by the sideways renderer.
    pub(crate) const fn tag(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Black => 'B',
        }
    }
}

// =============================================================================
// Sides
// =============================================================================

/// A child slot of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Where a node hangs relative to its parent.
///
/// # Examples
///
/// ```rust
/// use redblack::{ChildSide, RedBlackTree};
///
/// let tree: RedBlackTree<i32> = [2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.search(&2).unwrap().child_side(), ChildSide::Root);
/// assert_eq!(tree.search(&1).unwrap().child_side(), ChildSide::Left);
/// assert_eq!(tree.search(&3).unwrap().child_side(), ChildSide::Right);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ChildSide {
    /// The node is its parent's left child.
    Left,
    /// The node is its parent's right child.
    Right,
    /// The node has no parent.
    Root,
}

// =============================================================================
// Node Definition
// =============================================================================

/// Index of a node slot inside an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(usize);

/// Internal node structure for the red-black tree.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl<K> Node<K> {
    /// Creates a new red leaf hanging under `parent`.
    pub(crate) const fn new_red(key: K, parent: Option<NodeId>) -> Self {
        Self {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Clone, Debug)]
enum Slot<K> {
    Occupied(Node<K>),
    Vacant { next_free: Option<usize> },
}

/// Slot storage for nodes with a free list for recycling deleted slots.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    free_head: Option<usize>,
    occupied: usize,
}

impl<K> Arena<K> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            occupied: 0,
        }
    }

    /// Number of live nodes.
    pub(crate) const fn len(&self) -> usize {
        self.occupied
    }

    /// Stores `node`, reusing a vacated slot when one is available.
    pub(crate) fn allocate(&mut self, node: Node<K>) -> NodeId {
        self.occupied += 1;
        match self.free_head {
            Some(index) => {
                if let Slot::Vacant { next_free } = self.slots[index] {
                    self.free_head = next_free;
                }
                self.slots[index] = Slot::Occupied(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Frees the slot of `id` and hands back the node it held.
    ///
    /// Returns `None` if the slot was already vacant.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<Node<K>> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied(node) => {
                self.free_head = Some(id.0);
                self.occupied -= 1;
                Some(node)
            }
            previous @ Slot::Vacant { .. } => {
                self.slots[id.0] = previous;
                None
            }
        }
    }

    /// Iterates over the ids of all live nodes in slot order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| matches!(slot, Slot::Occupied(_)))
            .map(|(index, _)| NodeId(index))
    }

    /// Drops every node and forgets all slots.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.occupied = 0;
    }
}

impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id {}", id.0),
        }
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("dangling node id {}", id.0),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
