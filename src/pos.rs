use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Pos {
    cap: NonZeroUsize,
    // Invariant: `len` <= `cap`
    len: usize,
    // Invariant: `at` < `cap`
    // Index where the next item will be written. The `len` occupied items are
    // the ones right before it, wrapping around to the end of the buffer.
    at: usize,
}

impl Pos {
    /// Creates a new `Pos` with the given capacity, length and write index.
    ///
    /// # Panics
    /// Panics if `len > cap` or `at >= cap`.
    #[track_caller]
    pub fn new(cap: NonZeroUsize, len: usize, at: usize) -> Self {
        assert!(len <= cap.get());
        assert!(at < cap.get());
        Self { cap, len, at }
    }

    pub const fn zero(cap: NonZeroUsize) -> Self {
        Self { cap, len: 0, at: 0 }
    }

    #[inline(always)]
    pub const fn cap(&self) -> usize {
        self.cap.get()
    }

    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.cap());
        self.len = len;
    }

    #[inline(always)]
    pub const fn at(&self) -> usize {
        self.at
    }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub const fn is_full(&self) -> bool {
        self.len == self.cap()
    }

    /// Index of the oldest occupied item (or where it would be, if empty).
    #[inline(always)]
    pub const fn start(&self) -> usize {
        (self.at + self.cap() - self.len) % self.cap()
    }

    /// Returns the index in the underlying buffer corresponding to the given logical index,
    /// where logical index 0 is the oldest occupied item.
    /// The returned index is guaranteed to be in bounds (i.e. < `cap`), but the
    /// indexed item is not necessarily occupied.
    #[inline(always)]
    pub const fn logical_index(&self, index: usize) -> usize {
        (self.start() + index % self.cap()) % self.cap()
    }

    /// Moves the write index `n` slots forward, wrapping around.
    pub fn advance(&mut self, n: usize) {
        self.at = (self.at + n % self.cap()) % self.cap();
    }

    /// Moves the write index `n` slots backward, wrapping around.
    pub fn retreat(&mut self, n: usize) {
        self.at = (self.at + self.cap() - n % self.cap()) % self.cap();
    }
}
