//! Error types for tree operations.
//!
//! The core tree has exactly two recoverable outcomes, both reported through
//! [`TreeError`]. Neither one mutates the tree.

use thiserror::Error;

/// Errors returned by [`RedBlackTree`](crate::RedBlackTree) operations.
///
/// # Examples
///
/// ```rust
/// use redblack::{RedBlackTree, TreeError};
///
/// let mut tree = RedBlackTree::new();
/// tree.insert(7).unwrap();
///
/// assert_eq!(tree.insert(7), Err(TreeError::DuplicateKey));
/// assert_eq!(tree.delete(&8), Err(TreeError::NotFound));
/// assert_eq!(format!("{}", TreeError::NotFound), "key not found");
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeError {
    /// The key being inserted is already present.
    #[error("key already present")]
    DuplicateKey,

    /// The key being deleted or searched for is absent.
    #[error("key not found")]
    NotFound,
}
