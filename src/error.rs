use thiserror::Error;

/// Error returned when constructing a ring buffer with no room for any item.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("ring buffer capacity must be greater than 0")]
pub struct InvalidCapacity(());

impl InvalidCapacity {
    pub(crate) const fn new() -> Self {
        Self(())
    }
}

/// Error returned when indexing past the occupied items of a ring buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index out of range: the len is {len} but the index is {index}")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub len: usize,
}

/// Error returned when a head offset would point outside the occupied items.
///
/// `offset` is the rejected offset, counted back from the most recent item
/// (negative if it would point ahead of it).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("buffer head out of range: the len is {len} but the offset is {offset}")]
pub struct HeadOutOfRange {
    pub offset: isize,
    pub len: usize,
}
