//! # redblack
//!
//! An arena-backed red-black tree that keeps a set of unique, ordered keys.
//!
//! ## Overview
//!
//! Nodes live in a slot arena and link to each other by index, so parent,
//! left and right links carry no ownership. Every structural operation runs
//! as a bounded loop rather than by recursion:
//!
//! - **Insert**: binary-search descent, then the five-case recoloring and
//!   rotation fixup
//! - **Delete**: successor splice, then the six-case double-black fixup
//! - **Search**: read-only lookup returning a [`NodeRef`] view
//! - **Traverse**: double-ended in-order iteration
//! - **Render**: sideways text rendering with color tags
//! - **Load**: bulk insertion from whitespace-separated text
//!
//! ## Feature Flags
//!
//! - `serde`: serialize a tree as its ascending key sequence
//! - `full`: enable all features
//!
//! ## Example
//!
//! ```rust
//! use redblack::prelude::*;
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert_eq!(tree.insert(20), Err(TreeError::DuplicateKey));
//! assert_eq!(tree.root().map(|root| *root.key()), Some(20));
//! assert_eq!(tree.delete(&10), Ok(10));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![20, 30]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use redblack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::TreeError;
    pub use crate::loader::{DuplicatePolicy, LoadError, LoadOptions, LoadReport};
    pub use crate::render::RenderOptions;
    pub use crate::tree::{ChildSide, Color, NodeRef, RedBlackTree};
}

pub mod error;
pub mod loader;
pub mod render;
pub mod tree;

pub use error::TreeError;
pub use tree::{ChildSide, Color, IntoIter, InvariantViolation, Iter, NodeRef, RedBlackTree};
