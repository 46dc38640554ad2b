//! Sideways tree printer.
//!
//! Renders a [`RedBlackTree`] rotated a quarter turn counter-clockwise: the
//! root sits at the left margin, right subtrees above their parent and left
//! subtrees below, each level indented one unit further.
//!
//! # Examples
//!
//! ```rust
//! use redblack::RedBlackTree;
//! use redblack::render::RenderOptions;
//!
//! let tree: RedBlackTree<i32> = [10, 20, 30].into_iter().collect();
//!
//! assert_eq!(tree.sideways().to_string(), "\t30 (R)\n20 (B)\n\t10 (R)\n");
//!
//! let plain = RenderOptions::new().with_indent("  ").with_colors(false);
//! assert_eq!(tree.sideways_with(plain).to_string(), "  30\n20\n  10\n");
//! ```

use crate::tree::{NodeRef, RedBlackTree};
use std::fmt;

/// Layout settings for [`Sideways`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    indent: &'static str,
    show_colors: bool,
}

impl RenderOptions {
    /// Tab indentation with color tags.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            indent: "\t",
            show_colors: true,
        }
    }

    /// Sets the string repeated once per depth level.
    #[must_use]
    pub const fn with_indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    /// Sets whether each key is followed by `(R)` or `(B)`.
    #[must_use]
    pub const fn with_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`Display`](fmt::Display) adapter that prints a tree sideways.
///
/// Created by [`RedBlackTree::sideways`] and [`RedBlackTree::sideways_with`].
pub struct Sideways<'a, K> {
    tree: &'a RedBlackTree<K>,
    options: RenderOptions,
}

impl<K> RedBlackTree<K> {
    /// Returns a sideways rendering with the default [`RenderOptions`].
    #[must_use]
    pub const fn sideways(&self) -> Sideways<'_, K> {
        self.sideways_with(RenderOptions::new())
    }

    /// Returns a sideways rendering with custom options.
    #[must_use]
    pub const fn sideways_with(&self, options: RenderOptions) -> Sideways<'_, K> {
        Sideways {
            tree: self,
            options,
        }
    }
}

impl<K: fmt::Display> fmt::Display for Sideways<'_, K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Reverse in-order walk: right subtree, node, left subtree.
        let mut pending: Vec<(NodeRef<'_, K>, usize)> = Vec::new();
        let mut cursor = self.tree.root().map(|root| (root, 0));

        loop {
            while let Some((node, depth)) = cursor {
                pending.push((node, depth));
                cursor = node.right().map(|right| (right, depth + 1));
            }
            let Some((node, depth)) = pending.pop() else {
                return Ok(());
            };

            for _ in 0..depth {
                formatter.write_str(self.options.indent)?;
            }
            write!(formatter, "{}", node.key())?;
            if self.options.show_colors {
                write!(formatter, " ({})", node.color().tag())?;
            }
            formatter.write_str("\n")?;

            cursor = node.left().map(|left| (left, depth + 1));
        }
    }
}
