//! A fixed-capacity ring buffer that behaves as a bounded FIFO queue.
//!
//! Once full, pushing a new item overwrites (and returns) the oldest one. Items in the
//! occupied window can be accessed by index in O(1), and the logical head can be shifted
//! back onto older items with [`RingBuffer::set_offset`] while pushes keep going.

pub mod error;
pub mod iter;
mod pos;

use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    iter::repeat_with,
    mem,
    num::NonZeroUsize,
    ops::Index,
};

pub use self::{
    error::{HeadOutOfRange, IndexOutOfRange, InvalidCapacity},
    iter::Iter,
};

use self::pos::Pos;

/// Ring buffer that can hold up to [`capacity`](Self::capacity) items of type `T`.
#[derive(Clone)]
pub struct RingBuffer<T> {
    // Invariant: `buf.len() == pos.cap()`. The `len` occupied items are the ones right
    // before `at`, wrapping around to the end of `buf`. A slot is `Some` iff it is occupied.
    buf: Box<[Option<T>]>,
    pos: Pos,
    // Invariant: `shift < len`, or `shift == 0` if the buffer is empty
    shift: usize,
}

impl<T> RingBuffer<T> {
    /// Creates a new empty ring buffer with room for `cap` items.
    ///
    /// # Panics
    /// Panics if `cap` is 0.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let buf = RingBuffer::<u8>::with_capacity(3);
    /// assert_eq!(buf.capacity(), 3);
    /// assert!(buf.is_empty());
    /// ```
    ///
    /// ```should_panic
    /// # use offset_ring::RingBuffer;
    /// RingBuffer::<u8>::with_capacity(0);
    /// ```
    #[track_caller]
    pub fn with_capacity(cap: usize) -> Self {
        match Self::try_with_capacity(cap) {
            Ok(buf) => buf,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new empty ring buffer with room for `cap` items.
    /// Returns `Err(InvalidCapacity)` if `cap` is 0.
    pub fn try_with_capacity(cap: usize) -> Result<Self, InvalidCapacity> {
        let cap = NonZeroUsize::new(cap).ok_or(InvalidCapacity::new())?;
        log::trace!("allocating ring buffer with capacity {cap}");
        Ok(Self {
            buf: repeat_with(|| None).take(cap.get()).collect(),
            pos: Pos::zero(cap),
            shift: 0,
        })
    }

    /// Removes the oldest item from the ring buffer and returns it, or `None` if the buffer [is empty](Self::is_empty).
    ///
    /// If the [head offset](Self::offset) pointed at the removed item, it is moved onto the
    /// oldest remaining one.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.pop(), None);
    /// buf.extend([0, 1]);
    /// assert_eq!(buf.pop(), Some(0));
    /// assert_eq!(buf.pop(), Some(1));
    /// assert_eq!(buf.pop(), None);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let item = self.buf[self.pos.logical_index(0)].take();
        self.pos.set_len(self.len() - 1);

        if self.shift > 0 && self.shift >= self.len() {
            let shift = self.len().saturating_sub(1);
            log::debug!(
                "head offset {} fell past the tail, clamped to {shift}",
                self.shift
            );
            self.shift = shift;
        }
        item
    }

    /// Returns the number of items in the ring buffer.
    ///
    /// This does not account for the [head offset](Self::offset).
    pub const fn len(&self) -> usize {
        self.pos.len()
    }

    /// Returns the number of items the ring buffer can hold before it starts evicting old ones.
    pub const fn capacity(&self) -> usize {
        self.pos.cap()
    }

    /// Returns `true` if the ring buffer is empty.
    pub const fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Returns `true` if the ring buffer is full, meaning the next push will evict the oldest item.
    pub const fn is_full(&self) -> bool {
        self.pos.is_full()
    }

    /// Adds an item to the end of the ring buffer, removing the oldest item if the buffer [is full](Self::is_full).
    /// Returns the removed item if the buffer was full, otherwise `None`.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(3);
    /// assert_eq!(buf.push(0), None);
    /// assert_eq!(buf, [0]);
    /// assert_eq!(buf.push(1), None);
    /// assert_eq!(buf.push(2), None);
    /// assert_eq!(buf, [0, 1, 2]);
    /// assert_eq!(buf.push(3), Some(0));
    /// assert_eq!(buf, [1, 2, 3]);
    /// assert_eq!(buf.push(4), Some(1));
    /// assert_eq!(buf, [2, 3, 4]);
    /// ```
    #[inline]
    pub fn push(&mut self, item: T) -> Option<T> {
        let old = mem::replace(&mut self.buf[self.pos.at()], Some(item));
        self.pos.advance(1);
        if self.is_full() {
            old
        } else {
            self.pos.set_len(self.len() + 1);
            None
        }
    }

    /// Returns a reference to the item at the given index, counting from the oldest item,
    /// or `None` if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let buf = RingBuffer::try_from(vec![0, 1]).unwrap();
    /// assert_eq!(buf.get(0), Some(&0));
    /// assert_eq!(buf.get(1), Some(&1));
    /// assert_eq!(buf.get(2), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len() {
            None
        } else {
            self.buf[self.pos.logical_index(index)].as_ref()
        }
    }

    /// Returns a mutable reference to the item at the given index, or `None` if the index is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::try_from(vec![1, 2]).unwrap();
    /// *buf.get_mut(0).unwrap() *= 2;
    /// *buf.get_mut(1).unwrap() *= 3;
    /// assert_eq!(buf.get_mut(2), None);
    /// assert_eq!(buf, [2, 6]);
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len() {
            None
        } else {
            self.buf[self.pos.logical_index(index)].as_mut()
        }
    }

    /// Like [`get`](Self::get), but returns `Err(IndexOutOfRange)` if the index is out of bounds.
    pub fn try_get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        self.get(index).ok_or(IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Returns the item at the offset-adjusted head of the ring buffer, or `None` if the buffer [is empty](Self::is_empty).
    ///
    /// With no offset, this is the most recently pushed item.
    pub fn head(&self) -> Option<&T> {
        self.len()
            .checked_sub(1 + self.shift)
            .and_then(|index| self.get(index))
    }

    /// Returns the oldest item of the ring buffer, the next one to be popped or evicted,
    /// or `None` if the buffer [is empty](Self::is_empty).
    pub fn tail(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns how many items the head is currently shifted back from the most recent one.
    pub const fn offset(&self) -> usize {
        self.shift
    }

    /// Shifts the head back onto older items (`delta < 0`), or forward onto more recent ones
    /// (`delta > 0`) if already shifted. `delta == 0` resets the head to the most recent item.
    ///
    /// The head follows pushes: after a push, it points at the item `offset()` slots back from
    /// the new most recent one.
    ///
    /// Note that `set_offset(offset())` is equivalent to `set_offset(0)`, whatever `offset()` is.
    ///
    /// # Panics
    /// Panics if the head would end up ahead of the most recent item or past the oldest one.
    /// An empty buffer has no head, so this always panics on an empty buffer, even for `delta == 0`.
    /// See [`try_set_offset`](Self::try_set_offset) for a non-panicking version.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::try_from(vec![10, 20, 30, 40, 50]).unwrap();
    /// assert_eq!(buf.head(), Some(&50));
    /// buf.set_offset(-2);
    /// assert_eq!(buf.offset(), 2);
    /// assert_eq!(buf.head(), Some(&30));
    /// assert_eq!(buf.push(60), Some(10));
    /// assert_eq!(buf.head(), Some(&40));
    /// buf.set_offset(0);
    /// assert_eq!(buf.head(), Some(&60));
    /// ```
    ///
    /// ```should_panic
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::try_from(vec![1, 2]).unwrap();
    /// buf.set_offset(-2);
    /// ```
    #[track_caller]
    pub fn set_offset(&mut self, delta: isize) {
        if let Err(err) = self.try_set_offset(delta) {
            panic!("{err}");
        }
    }

    /// Like [`set_offset`](Self::set_offset), but returns `Err(HeadOutOfRange)` instead of
    /// panicking, leaving the offset unchanged.
    pub fn try_set_offset(&mut self, delta: isize) -> Result<(), HeadOutOfRange> {
        let offset = if delta == 0 {
            0
        } else {
            (self.shift as isize).saturating_sub(delta)
        };
        match usize::try_from(offset) {
            Ok(shift) if shift < self.len() => {
                self.shift = shift;
                Ok(())
            }
            _ => {
                log::debug!(
                    "rejected head offset {offset} for ring buffer of len {}",
                    self.len()
                );
                Err(HeadOutOfRange {
                    offset,
                    len: self.len(),
                })
            }
        }
    }

    /// Returns an iterator over the items in the ring buffer, oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.buf, self.pos)
    }

    /// Returns an iterator over the items from the oldest one up to and including the
    /// offset-adjusted [head](Self::head), i.e. the first `len() - offset()` items.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::try_from(vec![1, 2, 3, 4]).unwrap();
    /// buf.set_offset(-1);
    /// assert!(buf.iter().eq(&[1, 2, 3, 4]));
    /// assert!(buf.iter_to_head().eq(&[1, 2, 3]));
    /// ```
    pub fn iter_to_head(&self) -> Iter<'_, T> {
        let mut pos = self.pos;
        pos.set_len(self.len() - self.shift);
        pos.retreat(self.shift);
        Iter::new(&self.buf, pos)
    }

    /// Copies the items of the ring buffer, oldest first, into a `Vec`.
    ///
    /// # Examples
    /// ```
    /// # use offset_ring::RingBuffer;
    /// let mut buf = RingBuffer::with_capacity(2);
    /// assert!(buf.to_vec().is_empty());
    /// buf.extend(["a", "b", "c"]);
    /// assert_eq!(buf.to_vec(), ["b", "c"]);
    /// ```
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Creates a full ring buffer out of the given items, with a capacity of `vec.len()`.
/// The last item is the head, and the first one is the tail.
///
/// # Examples
/// ```
/// # use offset_ring::RingBuffer;
/// let buf = RingBuffer::try_from(vec!["foo", "bar", "baz"]).unwrap();
/// assert!(buf.is_full());
/// assert_eq!(buf.head(), Some(&"baz"));
/// assert_eq!(buf.tail(), Some(&"foo"));
///
/// assert!(RingBuffer::<u8>::try_from(vec![]).is_err());
/// ```
impl<T> TryFrom<Vec<T>> for RingBuffer<T> {
    type Error = InvalidCapacity;

    fn try_from(vec: Vec<T>) -> Result<Self, Self::Error> {
        let cap = NonZeroUsize::new(vec.len()).ok_or(InvalidCapacity::new())?;
        log::trace!("wrapping {cap} items into a full ring buffer");
        Ok(Self {
            buf: vec.into_iter().map(Some).collect(),
            pos: Pos::new(cap, cap.get(), 0),
            shift: 0,
        })
    }
}

/// Copies the given items into a full ring buffer with a capacity of `slice.len()`.
impl<T: Clone> TryFrom<&[T]> for RingBuffer<T> {
    type Error = InvalidCapacity;

    fn try_from(slice: &[T]) -> Result<Self, Self::Error> {
        Self::try_from(slice.to_vec())
    }
}

/// Extends the ring buffer with the contents of the given iterator, evicting the oldest
/// items if necessary.
///
/// # Examples
/// ```
/// # use offset_ring::RingBuffer;
/// let mut buf = RingBuffer::with_capacity(3);
/// buf.extend([0, 1]);
/// assert_eq!(buf, [0, 1]);
/// buf.extend([2, 3]);
/// assert_eq!(buf, [1, 2, 3]);
/// ```
impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

/// # Panics
/// Panics if the index is out of bounds, see [`RingBuffer::get`] for a non-panicking version.
impl<T> Index<usize> for RingBuffer<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.try_get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T: Hash> Hash for RingBuffer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iter().for_each(|item| item.hash(state))
    }
}

impl<T: PartialEq, B: AsRef<[T]> + ?Sized> PartialEq<B> for RingBuffer<T> {
    fn eq(&self, other: &B) -> bool {
        self.iter().eq(other.as_ref())
    }
}

impl<T: Debug> Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'buf, T> IntoIterator for &'buf RingBuffer<T> {
    type Item = &'buf T;
    type IntoIter = Iter<'buf, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
