//! The capability handed to [`LazyTree::traverse_soft`][crate::LazyTree::traverse_soft] and
//! [`LazyTree::traverse_hard`][crate::LazyTree::traverse_hard].
//!
//! Any `FnMut(&T)` closure is a [`Visitor`], so most callers never implement the trait by hand:
//!
//! ```
//! use lazy_bst::LazyTree;
//!
//! let tree: LazyTree<_> = vec![2, 1, 3].into_iter().collect();
//!
//! let mut seen = Vec::new();
//! tree.traverse_soft(&mut |x: &i32| seen.push(*x));
//! assert_eq!(seen, [1, 2, 3]);
//! ```

/// Something that is shown each element of a tree, in sorted order, during a traversal. What
/// happens to the element is entirely up to the implementor.
pub trait Visitor<T: ?Sized> {
    /// Called once per visited element.
    fn visit(&mut self, element: &T);
}

impl<T, F> Visitor<T> for F
where
    T: ?Sized,
    F: FnMut(&T),
{
    fn visit(&mut self, element: &T) {
        self(element)
    }
}
