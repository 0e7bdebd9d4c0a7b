//! A Binary Search Tree with lazy deletion. Removing an element comes in two flavours:
//!
//! - a "soft" [`remove`][LazyTree::remove] which only flags the element's node as deleted and
//!   leaves the structure alone, and
//! - a "hard" [`remove_hard`][LazyTree::remove_hard] which unlinks the node and reattaches its
//!   children.
//!
//! Soft deleted nodes stay in the tree (and keep counting towards
//! [`size_hard`][LazyTree::size_hard]) until they are either brought back by an
//! [`insert`][LazyTree::insert] or swept up by [`collect_garbage`][LazyTree::collect_garbage].
//!
//! # Examples
//!
//! ```
//! use lazy_bst::LazyTree;
//!
//! let mut tree = LazyTree::new();
//! for x in [5, 3, 8, 1] {
//!     tree.insert(x);
//! }
//!
//! // Soft deleting keeps the node around.
//! tree.remove(&3);
//! assert!(!tree.contains(&3));
//! assert!(tree.contains_hard(&3));
//! assert_eq!((tree.size(), tree.size_hard()), (3, 4));
//!
//! // Inserting it again just clears the flag.
//! tree.insert(3);
//! assert_eq!((tree.size(), tree.size_hard()), (4, 4));
//!
//! // Garbage collection physically removes whatever is still flagged.
//! tree.remove(&1);
//! assert!(tree.collect_garbage());
//! assert_eq!((tree.size(), tree.size_hard()), (3, 3));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::Iter;
use crate::util::{InsertResult, Unlinked};
use crate::visitor::Visitor;

/// An unbalanced Binary Search Tree supporting both soft (lazy) and hard deletion. It keeps two
/// counts: [`size`][Self::size] for the elements that are logically present and
/// [`size_hard`][Self::size_hard] for every node physically in the tree.
#[derive(Clone)]
pub struct LazyTree<T> {
    root: Link<T>,
    size: usize,
    size_hard: usize,
}

impl<T> Default for LazyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LazyTree<T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyTree")
            .field("size", &self.size)
            .field("size_hard", &self.size_hard)
            .field("root", &self.root.root())
            .finish()
    }
}

impl<T> LazyTree<T> {
    /// Generate a new, empty `LazyTree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            size: 0,
            size_hard: 0,
        }
    }

    /// The number of elements that are logically present, i.e. not soft deleted.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of nodes physically in the tree, soft deleted or not.
    pub fn size_hard(&self) -> usize {
        self.size_hard
    }

    /// Whether there are no logically present elements. The tree may still hold soft deleted
    /// nodes.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every node and resets both counts.
    pub fn clear(&mut self) {
        trace!("clearing tree of {} nodes", self.size_hard);
        self.root = Link(None);
        self.size = 0;
        self.size_hard = 0;
    }

    /// The number of edges on the longest path from the root to a leaf, counting soft deleted
    /// nodes. An empty tree has a height of `-1` and a lone root a height of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(2);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1);
    /// tree.insert(3);
    /// tree.remove(&3);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        self.root.height()
    }

    /// Inserts `value` into the tree. If an equal element was soft deleted it is brought back
    /// without allocating a new node. Returns whether the logical size changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    ///
    /// tree.remove(&1);
    /// assert!(tree.insert(1));
    /// assert_eq!(tree.size_hard(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        match self.root.insert(value) {
            InsertResult::Allocated => {
                self.size += 1;
                self.size_hard += 1;
                true
            }
            InsertResult::Undeleted => {
                self.size += 1;
                true
            }
            InsertResult::AlreadyPresent => false,
        }
    }

    /// Soft deletes the element equal to `value`. The node stays in the tree so only the logical
    /// size changes. Removing an absent or already soft deleted element does nothing. Returns
    /// whether the logical size changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert_eq!((tree.size(), tree.size_hard()), (0, 1));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let removed = self
            .root
            .find_mut(value)
            .map_or(false, |node| !mem::replace(&mut node.deleted, true));
        if removed {
            self.size -= 1;
        }
        removed
    }

    /// Physically removes the node holding an element equal to `value` and returns that element.
    /// Works on soft deleted elements too, in which case only the physical size changes. If no
    /// node matches, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree = LazyTree::new();
    /// tree.insert(2);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.remove_hard(&2), Some(2));
    /// assert_eq!(tree.remove_hard(&2), None);
    /// assert!(!tree.contains_hard(&2));
    /// assert_eq!((tree.size(), tree.size_hard()), (1, 1));
    /// ```
    pub fn remove_hard(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let unlinked = self.root.remove_hard(value)?;
        self.forget(&unlinked);
        Some(unlinked.value)
    }

    /// Physically removes every soft deleted node. Afterwards `size() == size_hard()`. Returns
    /// whether any node was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<_> = (0..10).collect();
    /// for x in (0..10).step_by(2) {
    ///     tree.remove(&x);
    /// }
    ///
    /// assert!(tree.collect_garbage());
    /// assert_eq!((tree.size(), tree.size_hard()), (5, 5));
    /// assert!(!tree.collect_garbage());
    /// ```
    pub fn collect_garbage(&mut self) -> bool {
        let removed = self.root.collect_garbage();
        self.size_hard -= removed;
        debug!(
            "garbage collection removed {} nodes, {} remain",
            removed, self.size_hard
        );
        debug_assert_eq!(self.size, self.size_hard);
        removed > 0
    }

    /// Finds the element equal to `value` unless it has been soft deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{Error, LazyTree};
    ///
    /// let mut tree = LazyTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.find(&1), Ok(&1));
    ///
    /// tree.remove(&1);
    /// assert_eq!(tree.find(&1), Err(Error::NotFound));
    /// assert_eq!(tree.find_hard(&1), Ok(&1));
    /// ```
    pub fn find(&self, value: &T) -> Result<&T>
    where
        T: Ord,
    {
        self.root
            .find(value)
            .filter(|node| !node.deleted)
            .map(|node| &node.value)
            .ok_or(Error::NotFound)
    }

    /// Finds the element equal to `value` whether or not it has been soft deleted.
    pub fn find_hard(&self, value: &T) -> Result<&T>
    where
        T: Ord,
    {
        self.root
            .find(value)
            .map(|node| &node.value)
            .ok_or(Error::NotFound)
    }

    /// Whether an element equal to `value` is logically present.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_ok()
    }

    /// Whether a node holding an element equal to `value` is physically present.
    pub fn contains_hard(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.root.find(value).is_some()
    }

    /// The smallest element that hasn't been soft deleted. This isn't necessarily the leftmost
    /// node - that may be flagged as deleted.
    ///
    /// Fails with [`Error::EmptyCollection`] if there are no nodes or every node is soft deleted.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::{Error, LazyTree};
    ///
    /// let mut tree = LazyTree::new();
    /// assert_eq!(tree.find_min(), Err(Error::EmptyCollection));
    ///
    /// for x in [5, 3, 8, 1] {
    ///     tree.insert(x);
    /// }
    /// tree.remove(&1);
    ///
    /// assert_eq!(tree.find_min(), Ok(&3));
    /// assert_eq!(tree.find_min_hard(), Ok(&1));
    /// ```
    pub fn find_min(&self) -> Result<&T> {
        self.root
            .find_min()
            .map(|node| &node.value)
            .ok_or(Error::EmptyCollection)
    }

    /// The largest element that hasn't been soft deleted. See [`find_min`][Self::find_min].
    pub fn find_max(&self) -> Result<&T> {
        self.root
            .find_max()
            .map(|node| &node.value)
            .ok_or(Error::EmptyCollection)
    }

    /// The element in the leftmost node, soft deleted or not.
    pub fn find_min_hard(&self) -> Result<&T> {
        self.root
            .find_min_hard()
            .map(|node| &node.value)
            .ok_or(Error::EmptyCollection)
    }

    /// The element in the rightmost node, soft deleted or not.
    pub fn find_max_hard(&self) -> Result<&T> {
        self.root
            .find_max_hard()
            .map(|node| &node.value)
            .ok_or(Error::EmptyCollection)
    }

    /// Shows `visitor` every logically present element in ascending order.
    pub fn traverse_soft<V>(&self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        self.root.traverse(visitor, false);
    }

    /// Shows `visitor` every element physically in the tree, soft deleted ones included, in
    /// ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazy_bst::LazyTree;
    ///
    /// let mut tree: LazyTree<_> = vec![3, 1, 2].into_iter().collect();
    /// tree.remove(&2);
    ///
    /// let mut soft = Vec::new();
    /// tree.traverse_soft(&mut |x: &i32| soft.push(*x));
    /// let mut hard = Vec::new();
    /// tree.traverse_hard(&mut |x: &i32| hard.push(*x));
    ///
    /// assert_eq!(soft, [1, 3]);
    /// assert_eq!(hard, [1, 2, 3]);
    /// ```
    pub fn traverse_hard<V>(&self, visitor: &mut V)
    where
        V: Visitor<T> + ?Sized,
    {
        self.root.traverse(visitor, true);
    }

    /// An iterator over the logically present elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.root(), self.size, false)
    }

    /// An iterator over every element physically in the tree in ascending order.
    pub fn iter_hard(&self) -> Iter<'_, T> {
        Iter::new(self.root.root(), self.size_hard, true)
    }

    /// Updates the counts after `unlinked` has left the tree.
    fn forget(&mut self, unlinked: &Unlinked<T>) {
        self.size_hard -= 1;
        if !unlinked.was_deleted {
            self.size -= 1;
        }
    }
}

impl<T> FromIterator<T> for LazyTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for LazyTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a LazyTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning pointer to a subtree, or nothing. Most of the recursive algorithms live here so that
/// they don't have to special case missing children.
#[derive(Clone)]
struct Link<T>(Option<Box<Node<T>>>);

impl<T> Link<T> {
    fn root(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn root_mut(&mut self) -> Option<&mut Node<T>> {
        self.0.as_deref_mut()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    fn height(&self) -> isize {
        match self.root() {
            Some(node) => 1 + node.left.height().max(node.right.height()),
            None => -1,
        }
    }

    fn insert(&mut self, value: T) -> InsertResult
    where
        T: Ord,
    {
        match self.root_mut() {
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => node.left.insert(value),
                Ordering::Equal if node.deleted => {
                    node.deleted = false;
                    InsertResult::Undeleted
                }
                Ordering::Equal => InsertResult::AlreadyPresent,
                Ordering::Greater => node.right.insert(value),
            },
            None => {
                trace!("allocating node");
                self.0 = Some(Node::new_boxed(value));
                InsertResult::Allocated
            }
        }
    }

    /// Finds the node equal to `value`, ignoring deletion flags.
    fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let node = self.root()?;
        match value.cmp(&node.value) {
            Ordering::Less => node.left.find(value),
            Ordering::Equal => Some(node),
            Ordering::Greater => node.right.find(value),
        }
    }

    fn find_mut(&mut self, value: &T) -> Option<&mut Node<T>>
    where
        T: Ord,
    {
        let node = self.root_mut()?;
        match value.cmp(&node.value) {
            Ordering::Less => node.left.find_mut(value),
            Ordering::Equal => Some(node),
            Ordering::Greater => node.right.find_mut(value),
        }
    }

    /// The first live node in order: anything on the left wins, then this node, then the right.
    fn find_min(&self) -> Option<&Node<T>> {
        let node = self.root()?;
        node.left
            .find_min()
            .or_else(|| Some(node).filter(|n| !n.deleted))
            .or_else(|| node.right.find_min())
    }

    /// Mirror image of [`Link::find_min`].
    fn find_max(&self) -> Option<&Node<T>> {
        let node = self.root()?;
        node.right
            .find_max()
            .or_else(|| Some(node).filter(|n| !n.deleted))
            .or_else(|| node.left.find_max())
    }

    fn find_min_hard(&self) -> Option<&Node<T>> {
        let node = self.root()?;
        node.left.find_min_hard().or(Some(node))
    }

    fn find_max_hard(&self) -> Option<&Node<T>> {
        let node = self.root()?;
        node.right.find_max_hard().or(Some(node))
    }

    fn remove_hard(&mut self, value: &T) -> Option<Unlinked<T>>
    where
        T: Ord,
    {
        let node = self.root_mut()?;
        match value.cmp(&node.value) {
            Ordering::Less => node.left.remove_hard(value),
            Ordering::Equal => self.unlink(),
            Ordering::Greater => node.right.remove_hard(value),
        }
    }

    /// Removes the root of this subtree and returns what it held.
    ///
    /// With at most one child, the child takes the root's place. With two children, the root
    /// takes over the element and flag of its in-order successor (the leftmost node of the right
    /// subtree) and the successor's node is the one that is actually freed.
    fn unlink(&mut self) -> Option<Unlinked<T>> {
        let mut node = self.0.take()?;

        if node.left.0.is_some() {
            if let Some(successor) = node.right.take_min() {
                let Node { value, deleted, .. } = *successor;
                let unlinked = Unlinked {
                    value: mem::replace(&mut node.value, value),
                    was_deleted: mem::replace(&mut node.deleted, deleted),
                };
                self.0 = Some(node);
                trace!("unlinked node with two children");
                return Some(unlinked);
            }
        }

        let Node {
            value,
            deleted,
            left,
            right,
        } = *node;
        *self = if left.0.is_some() { left } else { right };
        trace!("unlinked node with at most one child");
        Some(Unlinked {
            value,
            was_deleted: deleted,
        })
    }

    /// Detaches the leftmost node of this subtree, leaving its right child in its place.
    fn take_min(&mut self) -> Option<Box<Node<T>>> {
        let node = self.root_mut()?;
        if node.left.0.is_some() {
            return node.left.take_min();
        }

        let mut min = self.0.take()?;
        *self = min.right.take();
        Some(min)
    }

    /// Unlinks every soft deleted node in this subtree, children before parents, and returns how
    /// many were removed.
    fn collect_garbage(&mut self) -> usize {
        let Some(node) = self.root_mut() else {
            return 0;
        };
        let mut removed = node.left.collect_garbage() + node.right.collect_garbage();

        // Both subtrees are clean by now, so if this node has two children its successor is live
        // and the node comes out of `unlink` live as well.
        if node.deleted && self.unlink().is_some() {
            removed += 1;
        }
        removed
    }

    fn traverse<V>(&self, visitor: &mut V, include_deleted: bool)
    where
        V: Visitor<T> + ?Sized,
    {
        if let Some(node) = self.root() {
            node.left.traverse(visitor, include_deleted);
            if include_deleted || !node.deleted {
                visitor.visit(&node.value);
            }
            node.right.traverse(visitor, include_deleted);
        }
    }
}

/// A single element along with its soft deletion flag and its (owned) children.
#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) deleted: bool,
    left: Link<T>,
    right: Link<T>,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("deleted", &self.deleted)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            deleted: false,
            left: Link(None),
            right: Link(None),
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.root()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.root()
    }
}
