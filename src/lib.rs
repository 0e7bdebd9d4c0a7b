//! This crate exposes a Binary Search Tree (BST) with lazy deletion.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as
//! the longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! ## Lazy deletion
//!
//! Deleting a `Node` that has two children means finding its successor, moving it
//! up and relinking whatever hung off of it. A lazy tree lets you skip that work:
//! a "soft" delete just flags the `Node` as deleted. The flagged `Node` keeps its
//! place in the tree (so the invariants above still hold over it) but lookups,
//! minimums, maximums and soft traversals act as though it isn't there. Flagged
//! `Node`s can later be physically removed in one pass with
//! [`LazyTree::collect_garbage`].
//!
//! The tree doesn't rebalance itself, so inserting sorted input gives a tree as
//! tall as it has `Node`s.
//!
//! ```
//! use lazy_bst::LazyTree;
//!
//! let mut tree: LazyTree<_> = vec![5, 3, 8, 1].into_iter().collect();
//! tree.remove(&1);
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 5, 8]);
//! assert_eq!(tree.iter_hard().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod iter;
pub mod lazy;
mod util;
pub mod visitor;

pub use error::{Error, Result};
pub use iter::Iter;
pub use lazy::LazyTree;
pub use visitor::Visitor;
