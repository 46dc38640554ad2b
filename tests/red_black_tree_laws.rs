//! Property-based tests for RedBlackTree.
//!
//! These tests check the red-black invariants and set semantics against
//! `BTreeSet` over random operation sequences using proptest.

use proptest::prelude::*;
use redblack::{RedBlackTree, TreeError};
use std::collections::BTreeSet;

// =============================================================================
// Strategies for Generating Test Data
// =============================================================================

#[derive(Clone, Debug)]
enum Operation {
    Insert(i16),
    Delete(i16),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        3 => any::<i16>().prop_map(|key| Operation::Insert(key % 200)),
        2 => any::<i16>().prop_map(|key| Operation::Delete(key % 200)),
    ]
}

fn arbitrary_tree(max_size: usize) -> impl Strategy<Value = RedBlackTree<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(|keys| keys.into_iter().collect())
}

/// Every key's color and parent key, in key order.
fn layout(tree: &RedBlackTree<i32>) -> Vec<(i32, bool, Option<i32>)> {
    tree.iter()
        .map(|key| {
            let node = tree.search(key).unwrap();
            (*key, node.is_red(), node.parent().map(|parent| *parent.key()))
        })
        .collect()
}

// =============================================================================
// Invariant Laws
// =============================================================================

proptest! {
    /// Law: every insert and delete leaves a valid red-black tree.
    #[test]
    fn prop_operations_preserve_invariants(
        operations in prop::collection::vec(operation(), 0..200)
    ) {
        let mut tree = RedBlackTree::new();
        for operation in operations {
            match operation {
                Operation::Insert(key) => { let _ = tree.insert(key); }
                Operation::Delete(key) => { let _ = tree.delete(&key); }
            }
            prop_assert!(tree.validate().is_ok());
        }
    }

    /// Law: the tree behaves like a BTreeSet under the same operations.
    #[test]
    fn prop_matches_btreeset_model(
        operations in prop::collection::vec(operation(), 0..200)
    ) {
        let mut tree = RedBlackTree::new();
        let mut model = BTreeSet::new();
        for operation in operations {
            match operation {
                Operation::Insert(key) => {
                    let expected = if model.insert(key) { Ok(()) } else { Err(TreeError::DuplicateKey) };
                    prop_assert_eq!(tree.insert(key), expected);
                }
                Operation::Delete(key) => {
                    let expected = if model.remove(&key) { Ok(key) } else { Err(TreeError::NotFound) };
                    prop_assert_eq!(tree.delete(&key), expected);
                }
            }
        }
        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.iter().eq(model.iter()));
        prop_assert!(tree.iter().rev().eq(model.iter().rev()));
    }

    /// Law: height never exceeds 2 * log2(n + 1).
    #[test]
    fn prop_height_is_logarithmic(tree in arbitrary_tree(500)) {
        let bound = 2.0 * ((tree.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
    }

    /// Law: validate reports the same black-height as the left spine.
    #[test]
    fn prop_validate_agrees_with_black_height(tree in arbitrary_tree(200)) {
        prop_assert_eq!(tree.validate(), Ok(tree.black_height()));
    }
}

// =============================================================================
// Insert-Delete Laws
// =============================================================================

proptest! {
    /// Law: inserting a fresh key and deleting it restores the key set.
    #[test]
    fn prop_insert_then_delete_restores_keys(tree in arbitrary_tree(100), key: i32) {
        prop_assume!(!tree.contains(&key));
        let mut updated = tree.clone();

        prop_assert_eq!(updated.insert(key), Ok(()));
        prop_assert_eq!(updated.delete(&key), Ok(key));
        prop_assert_eq!(&updated, &tree);
        prop_assert!(updated.validate().is_ok());
    }

    /// Law: when an insert needed no rebalancing, deleting the key again
    /// restores the exact shape.
    #[test]
    fn prop_insert_without_fixup_then_delete_restores_shape(
        tree in arbitrary_tree(100),
        key: i32
    ) {
        prop_assume!(!tree.contains(&key));
        let mut updated = tree.clone();
        updated.insert(key).unwrap();

        let after = layout(&updated);
        let untouched = layout(&tree).iter().all(|entry| after.contains(entry));
        if untouched {
            updated.delete(&key).unwrap();
            prop_assert_eq!(updated.sideways().to_string(), tree.sideways().to_string());
        }
    }

    /// Law: a missing key is rejected without touching the shape.
    #[test]
    fn prop_rejected_operations_leave_shape(tree in arbitrary_tree(100), key: i32) {
        let mut updated = tree.clone();
        if tree.contains(&key) {
            prop_assert_eq!(updated.insert(key), Err(TreeError::DuplicateKey));
        } else {
            prop_assert_eq!(updated.delete(&key), Err(TreeError::NotFound));
        }
        prop_assert_eq!(updated.sideways().to_string(), tree.sideways().to_string());
    }
}

// =============================================================================
// Traversal Laws
// =============================================================================

proptest! {
    /// Law: iteration yields strictly ascending keys.
    #[test]
    fn prop_iteration_is_strictly_ascending(tree in arbitrary_tree(200)) {
        let keys: Vec<_> = tree.iter().collect();
        prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(keys.len(), tree.len());
    }

    /// Law: every yielded key is found by search.
    #[test]
    fn prop_every_key_is_searchable(tree in arbitrary_tree(200)) {
        for key in &tree {
            prop_assert_eq!(tree.search(key).map(|node| *node.key()), Ok(*key));
        }
    }

    /// Law: owned iteration yields the same keys as borrowed iteration.
    #[test]
    fn prop_into_iter_matches_iter(tree in arbitrary_tree(200)) {
        let borrowed: Vec<i32> = tree.iter().copied().collect();
        let owned: Vec<i32> = tree.into_iter().collect();
        prop_assert_eq!(borrowed, owned);
    }
}
