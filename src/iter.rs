//! Borrowing, in-order iterators over a [`LazyTree`][crate::LazyTree].
//!
//! These walk the same sequence as the visitor based traversals but keep their own stack instead
//! of recursing, so they can be paused between elements.

use std::iter::FusedIterator;

use crate::lazy::Node;

/// An iterator over the elements of a [`LazyTree`][crate::LazyTree] in ascending order. Created by
/// [`LazyTree::iter`][crate::LazyTree::iter] (live elements only) or
/// [`LazyTree::iter_hard`][crate::LazyTree::iter_hard] (every physical node).
#[derive(Debug)]
pub struct Iter<'a, T> {
    /// Nodes whose left subtree has been pushed but which haven't been yielded yet. The top of the
    /// stack is always the next node in order.
    stack: Vec<&'a Node<T>>,
    include_deleted: bool,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            include_deleted: self.include_deleted,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize, include_deleted: bool) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            include_deleted,
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.push_left_spine(node.right());
            if self.include_deleted || !node.deleted {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(&node.value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
