/// What an insert found at the end of its descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertResult {
    /// The slot was empty so a new node was allocated.
    Allocated,
    /// An equal node was soft deleted and has been brought back.
    Undeleted,
    /// An equal, live node was already there. Nothing changed.
    AlreadyPresent,
}

/// A node that has been physically unlinked from the tree. Its children have already been handed
/// to the surviving structure so all that's left is its element and whether it was soft deleted at
/// the time.
#[derive(Debug)]
pub(crate) struct Unlinked<T> {
    pub(crate) value: T,
    pub(crate) was_deleted: bool,
}
