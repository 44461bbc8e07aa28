use std::iter::FusedIterator;

use crate::pos::Pos;

/// Borrowing iterator over the items of a [`RingBuffer`](crate::RingBuffer), oldest first.
///
/// Created by [`RingBuffer::iter`](crate::RingBuffer::iter) and
/// [`RingBuffer::iter_to_head`](crate::RingBuffer::iter_to_head).
pub struct Iter<'buf, T> {
    buf: &'buf [Option<T>],
    // `pos.len()` items are left, ending right before `pos.at()`
    pos: Pos,
}

impl<'buf, T> Iter<'buf, T> {
    pub(crate) fn new(buf: &'buf [Option<T>], pos: Pos) -> Self {
        Self { buf, pos }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf,
            pos: self.pos,
        }
    }
}

impl<'buf, T> Iterator for Iter<'buf, T> {
    type Item = &'buf T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos.is_empty() {
            return None;
        }
        let item = self.buf[self.pos.logical_index(0)].as_ref();
        self.pos.set_len(self.pos.len() - 1);
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pos.len(), Some(self.pos.len()))
    }

    fn count(self) -> usize {
        self.pos.len()
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        match self.pos.len().checked_sub(n) {
            Some(left) if left > 0 => {
                self.pos.set_len(left);
                self.next()
            }
            _ => {
                self.pos.set_len(0);
                None
            }
        }
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let last = self.pos.len().checked_sub(1)?;
        let item = self.buf[self.pos.logical_index(last)].as_ref();
        self.pos.set_len(last);
        self.pos.retreat(1);
        item
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.pos.len()
    }
}
