//! Bulk key loading.
//!
//! Reads whitespace-separated keys from a text source and inserts them one
//! by one through [`RedBlackTree::insert`].
//!
//! # Examples
//!
//! ```rust
//! use redblack::RedBlackTree;
//! use redblack::loader::{LoadOptions, LoadReport};
//!
//! let mut tree: RedBlackTree<i32> = RedBlackTree::new();
//! let report = tree
//!     .load_from_reader("10 20\n30 20".as_bytes(), LoadOptions::default())
//!     .unwrap();
//!
//! assert_eq!(report, LoadReport { inserted: 3, duplicates: 1 });
//! assert_eq!(tree.len(), 3);
//! ```

use crate::error::TreeError;
use crate::tree::RedBlackTree;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Options and Report
// =============================================================================

/// What to do when the source repeats a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Count the repeat and keep loading.
    #[default]
    Skip,
    /// Stop with [`LoadError::DuplicateKey`].
    Fail,
}

/// Settings for [`RedBlackTree::load_from_reader`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadOptions {
    on_duplicate: DuplicatePolicy,
}

impl LoadOptions {
    /// Options that skip repeated keys.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_duplicate: DuplicatePolicy::Skip,
        }
    }

    /// Sets the policy for repeated keys.
    #[must_use]
    pub const fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }
}

/// Counts from a finished load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys added to the tree.
    pub inserted: usize,
    /// Keys skipped because they were already present.
    pub duplicates: usize,
}

// =============================================================================
// Errors
// =============================================================================

/// Errors that stop a load.
///
/// Keys inserted before the error stay in the tree.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading the source failed.
    #[error("failed to read keys: {0}")]
    Io(#[from] io::Error),

    /// A token could not be parsed as a key.
    #[error("line {line}: cannot parse {token:?} as a key")]
    Parse {
        /// 1-based line number of the token.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A key was repeated under [`DuplicatePolicy::Fail`].
    #[error("line {line}: duplicate key {token:?}")]
    DuplicateKey {
        /// 1-based line number of the token.
        line: usize,
        /// The repeated token.
        token: String,
    },
}

// =============================================================================
// Loading
// =============================================================================

impl<K: Ord + FromStr> RedBlackTree<K> {
    /// Inserts every whitespace-separated key read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if reading fails, [`LoadError::Parse`] for a
    /// token that `K::from_str` rejects, and [`LoadError::DuplicateKey`] for a
    /// repeated key when the options say so.
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        options: LoadOptions,
    ) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            for token in line.split_whitespace() {
                let key = token.parse::<K>().map_err(|_| LoadError::Parse {
                    line: index + 1,
                    token: token.to_string(),
                })?;
                match (self.insert(key), options.on_duplicate) {
                    (Ok(()), _) => report.inserted += 1,
                    (Err(TreeError::DuplicateKey), DuplicatePolicy::Skip) => report.duplicates += 1,
                    (Err(_), _) => {
                        return Err(LoadError::DuplicateKey {
                            line: index + 1,
                            token: token.to_string(),
                        });
                    }
                }
            }
        }

        tracing::debug!(
            inserted = report.inserted,
            duplicates = report.duplicates,
            "keys loaded"
        );
        Ok(report)
    }

    /// Opens `path` and loads its keys with [`load_from_reader`](Self::load_from_reader).
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be opened, plus every
    /// error `load_from_reader` can return.
    pub fn load_from_path<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: LoadOptions,
    ) -> Result<LoadReport, LoadError> {
        let file = File::open(path)?;
        self.load_from_reader(BufReader::new(file), options)
    }
}
