//! By-value iteration.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use placevec_raw::RawMemory;

use crate::vector::Vector;

/// An iterator that moves elements out of a [`Vector`].
///
/// Elements not yielded are destroyed when the iterator is dropped; the
/// block is released afterwards.
pub struct IntoIter<T> {
    buf: RawMemory<T>,
    /// Live elements are exactly `[start, end)`.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `start <= end <= capacity` and `[start, end)` is live.
        unsafe { slice::from_raw_parts(self.buf.at(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start < end`, so the slot is live; it leaves the live
        // range before the value is handed out.
        let value = unsafe { self.buf.at(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot `end` was live and is now outside the live range.
        Some(unsafe { self.buf.at(self.end).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `start <= end <= capacity`.
        let remaining =
            ptr::slice_from_raw_parts_mut(unsafe { self.buf.at(self.start) }, self.end - self.start);
        self.start = self.end;
        // SAFETY: the remaining elements are owned by the iterator alone.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, R> IntoIterator for Vector<T, R> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<'a, T, R> IntoIterator for &'a Vector<T, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, R> IntoIterator for &'a mut Vector<T, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}
