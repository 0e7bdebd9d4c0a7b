//! Errors returned by lookups on a [`LazyTree`][crate::LazyTree].

/// The ways a lookup on a [`LazyTree`][crate::LazyTree] can fail. Both are precondition
/// violations on the caller's side - the tree is never left in a partially modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A minimum or maximum was requested but there was nothing to pick it from.
    #[error("the tree has no elements")]
    EmptyCollection,
    /// No node compares equal to the requested element (or, for the soft lookups, the matching
    /// node has been soft deleted).
    #[error("element not found in the tree")]
    NotFound,
}

/// Shorthand for results of tree lookups.
pub type Result<T> = std::result::Result<T, Error>;
