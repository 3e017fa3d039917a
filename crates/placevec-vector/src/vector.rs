//! The growable vector.
//!
//! [`Vector<T, R>`] owns one [`RawMemory<T>`] and a length. Slots
//! `[0, len)` hold live values; `[len, capacity)` are uninitialized. All
//! construction and destruction happens in place through raw pointers into
//! the block; whenever the block must change, a complete replacement is
//! built first and committed with a single [`RawMemory::swap`].
//!
//! # Failure guarantees
//!
//! | Operation | On `Err` or panic |
//! |-----------|-------------------|
//! | `reserve`, `push_back`, `emplace_back`, `insert`, `emplace`, `try_clone` | strong: unchanged |
//! | `resize`, `resize_with` | length and contents unchanged; capacity may have grown |
//! | `assign_from` (no reallocation) | basic: valid, `len` counts live elements |
//! | `erase`, `pop_back`, `truncate` | element drops are assumed not to fail |

use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use placevec_raw::{AllocError, RawMemory};

use crate::element::TryClone;
use crate::error::{ConstructError, VectorError};
use crate::growth;
use crate::guard::{ConstructedRun, TransferredSegment};
use crate::relocate::{self, ByMove, Relocate};

/// A contiguous growable array built on raw memory.
///
/// `R` selects how live elements are carried into a new block when the
/// vector reallocates (see [`crate::relocate`]). It is a type-level choice;
/// the default [`ByMove`] suits almost every element type.
///
/// ```
/// use placevec_vector::Vector;
///
/// let mut v: Vector<i32> = Vector::new();
/// v.push_back(1)?;
/// v.push_back(2)?;
/// v.insert(1, 99)?;
/// assert_eq!(v, [1, 99, 2]);
/// v.erase(0);
/// assert_eq!(v, [99, 2]);
/// # Ok::<(), placevec_vector::VectorError>(())
/// ```
pub struct Vector<T, R = ByMove> {
    buf: RawMemory<T>,
    /// Number of live elements at the front of `buf`.
    len: usize,
    _strategy: PhantomData<fn() -> R>,
}

impl<T, R> Vector<T, R> {
    /// An empty vector. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawMemory::new(),
            len: 0,
            _strategy: PhantomData,
        }
    }

    /// An empty vector with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Result<Self, VectorError> {
        Ok(Self {
            buf: RawMemory::allocate(capacity)?,
            len: 0,
            _strategy: PhantomData,
        })
    }

    /// A vector of `len` elements built by `make(index)`, with capacity
    /// exactly `len`.
    ///
    /// If `make` fails, every element built so far is destroyed and the
    /// block is released before the error is returned.
    pub fn from_fn<F>(len: usize, mut make: F) -> Result<Self, VectorError>
    where
        F: FnMut(usize) -> Result<T, ConstructError>,
    {
        let buf = RawMemory::allocate(len)?;
        let mut built = ConstructedRun::new(buf.ptr());
        for index in 0..len {
            let value = make(index)?;
            // SAFETY: `index` elements were built so far and `index < len`.
            unsafe { built.push(value) };
        }
        let len = built.disarm();
        Ok(Self {
            buf,
            len,
            _strategy: PhantomData,
        })
    }

    /// A vector of `len` default elements with capacity exactly `len`.
    pub fn with_len(len: usize) -> Result<Self, VectorError>
    where
        T: Default,
    {
        Self::from_fn(len, |_| Ok(T::default()))
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current block can hold.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live; for an absent block the pointer is
        // dangling but aligned and `len` is 0.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` is exclusive.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Remove the last element and return it, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        Some(unsafe { self.buf.at(self.len).read() })
    }

    /// Remove the element at `index`, shifting the tail left. Never
    /// reallocates.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        // SAFETY: `index < len`, so the slot is live; the tail copy stays
        // inside `[index, len)` and the vacated last slot leaves the live
        // range before anyone can observe it.
        unsafe {
            let slot = self.buf.at(index);
            let removed = slot.read();
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.len = len - 1;
            removed
        }
    }

    /// Destroy the element at `index`, shifting the tail left. Never
    /// reallocates.
    ///
    /// The index is always checked: erasing past the end is reported by a
    /// panic instead of being left undefined. Likewise
    /// [`pop_back`](Self::pop_back) on an empty vector returns `None`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) {
        drop(self.remove(index));
    }

    /// Destroy every element at or beyond `len`. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        // SAFETY: `len < self.len <= capacity`.
        let tail = ptr::slice_from_raw_parts_mut(unsafe { self.buf.at(len) }, self.len - len);
        // Shrink first so a panicking drop cannot cause a double drop.
        self.len = len;
        // SAFETY: the tail was live and is no longer reachable.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Destroy every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchange contents and blocks with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Move assignment: adopt `source`'s elements and block.
    ///
    /// `self`'s previous elements are destroyed and its block released;
    /// `source` is left empty with no block, exactly as after a move.
    pub fn move_assign(&mut self, source: &mut Self) {
        *self = mem::take(source);
    }

    /// Give up ownership of the block and the live count without dropping.
    pub(crate) fn into_raw_parts(self) -> (RawMemory<T>, usize) {
        let mut this = mem::ManuallyDrop::new(self);
        (this.buf.take(), this.len)
    }
}

impl<T, R: Relocate<T>> Vector<T, R> {
    /// Ensure capacity for at least `capacity` elements.
    ///
    /// No-op when the current capacity suffices; otherwise the block is
    /// replaced by one of exactly `capacity` slots. Strong guarantee.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VectorError> {
        if capacity <= self.capacity() {
            return Ok(());
        }
        let mut fresh = RawMemory::allocate(capacity)?;
        self.relocate_into(&mut fresh, None, "reserve")
    }

    /// Make room for `additional` more elements with amortized growth.
    ///
    /// Unlike [`reserve`](Self::reserve), the new capacity is at least the
    /// geometric next step, so repeated small appends reallocate only
    /// logarithmically often.
    fn reserve_for_append(&mut self, additional: usize) -> Result<(), VectorError> {
        if additional <= self.capacity() - self.len {
            return Ok(());
        }
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                requested: usize::MAX,
            })?;
        let target = growth::grown_capacity(self.capacity()).map_or(needed, |next| next.max(needed));
        self.reserve(target)
    }

    /// Set the length to `new_len`, destroying the excess or appending
    /// `T::default()` values.
    pub fn resize(&mut self, new_len: usize) -> Result<(), VectorError>
    where
        T: Default,
    {
        self.resize_with(new_len, || Ok(T::default()))
    }

    /// Set the length to `new_len`, destroying the excess or appending
    /// values built by `make`.
    ///
    /// If `make` fails, the values appended by this call are destroyed and
    /// the length is left as it was; capacity may already have grown.
    pub fn resize_with<F>(&mut self, new_len: usize, mut make: F) -> Result<(), VectorError>
    where
        F: FnMut() -> Result<T, ConstructError>,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.reserve(new_len)?;
        // SAFETY: `len <= capacity`.
        let mut added = ConstructedRun::new(unsafe { self.buf.at(self.len) });
        for _ in self.len..new_len {
            let value = make()?;
            // SAFETY: `reserve` made room for `new_len` elements.
            unsafe { added.push(value) };
        }
        self.len += added.disarm();
        Ok(())
    }

    /// Append `value`. Strong guarantee.
    pub fn push_back(&mut self, value: T) -> Result<(), VectorError> {
        self.emplace_back(|| Ok(value))?;
        Ok(())
    }

    /// Append a value built by `make` and return a reference to it.
    ///
    /// When the vector is full the new value is built in the replacement
    /// block *before* any existing element is touched, so a failing `make`
    /// leaves the vector exactly as it was.
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T, VectorError>
    where
        F: FnOnce() -> Result<T, ConstructError>,
    {
        let index = self.len;
        if index == self.capacity() {
            return self.emplace_growing(index, make);
        }
        let value = make()?;
        // SAFETY: `index < capacity` and the slot is uninitialized.
        unsafe {
            let slot = self.buf.at(index);
            slot.write(value);
            self.len += 1;
            Ok(&mut *slot)
        }
    }

    /// Insert `value` at `index`, shifting the tail right. Strong guarantee.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&mut T, VectorError> {
        self.emplace(index, || Ok(value))
    }

    /// Insert a value built by `make` at `index`, shifting the tail right,
    /// and return a reference to it. Strong guarantee.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn emplace<F>(&mut self, index: usize, make: F) -> Result<&mut T, VectorError>
    where
        F: FnOnce() -> Result<T, ConstructError>,
    {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
        if len == self.capacity() {
            return self.emplace_growing(index, make);
        }
        // Build into a temporary before any element moves.
        let value = make()?;
        // SAFETY: `len < capacity`, so shifting `[index, len)` one slot right
        // stays in the block; the vacated slot is then filled without a drop.
        unsafe {
            let slot = self.buf.at(index);
            ptr::copy(slot, slot.add(1), len - index);
            slot.write(value);
            self.len = len + 1;
            Ok(&mut *slot)
        }
    }

    /// Grow a full vector and build a new element at `index` on the way.
    fn emplace_growing<F>(&mut self, index: usize, make: F) -> Result<&mut T, VectorError>
    where
        F: FnOnce() -> Result<T, ConstructError>,
    {
        let capacity = growth::grown_capacity(self.capacity())?;
        let mut fresh = RawMemory::allocate(capacity)?;
        // SAFETY: `index <= len < capacity` of the fresh block.
        let mut placed = ConstructedRun::new(unsafe { fresh.at(index) });
        let value = make()?;
        // SAFETY: the fresh block is entirely uninitialized.
        unsafe { placed.push(value) };
        self.relocate_into(&mut fresh, Some(index), "grow")?;
        placed.disarm();
        self.len += 1;
        // SAFETY: the committed block now holds the new element at `index`.
        Ok(unsafe { &mut *self.buf.at(index) })
    }

    /// Carry every live element into `fresh` and commit it as the new block.
    ///
    /// With `hole = Some(i)`, elements `[i, len)` land one slot further
    /// right, leaving slot `i` to the caller. The prefix and the suffix are
    /// transferred as independent segments; if the suffix fails, the
    /// completed prefix is discarded. On `Err`, `self` is untouched and
    /// `fresh` holds only what the caller placed there. On `Ok`, `fresh`
    /// holds the old, emptied block.
    fn relocate_into(
        &mut self,
        fresh: &mut RawMemory<T>,
        hole: Option<usize>,
        op: &'static str,
    ) -> Result<(), VectorError> {
        let len = self.len;
        let split = hole.unwrap_or(len);
        let shift = usize::from(hole.is_some());
        debug_assert!(fresh.capacity() >= len + shift);

        let src = self.buf.ptr();
        let dst = fresh.ptr();
        // SAFETY: `src[..len]` is live, `fresh` is a distinct block with room
        // for `len + shift` elements, and the hole slot is never a target.
        unsafe {
            R::transfer(src, dst, split).inspect_err(|err| {
                tracing::debug!(op, strategy = R::NAME, len, %err, "relocation prefix rolled back");
            })?;
            let prefix = TransferredSegment::<T, R>::new(dst, split);
            R::transfer(src.add(split), dst.add(split + shift), len - split).inspect_err(
                |err| {
                    tracing::debug!(op, strategy = R::NAME, len, %err, "relocation suffix rolled back");
                },
            )?;
            prefix.disarm();
            R::retire(src, len);
        }

        tracing::trace!(
            op,
            strategy = R::NAME,
            from = self.buf.capacity(),
            to = fresh.capacity(),
            len,
            "vector relocated"
        );
        self.buf.swap(fresh);
        Ok(())
    }
}

impl<T: TryClone, R> Vector<T, R> {
    /// Copy construction: a new vector with capacity exactly `len` holding
    /// copies of every element. Strong guarantee.
    pub fn try_clone(&self) -> Result<Self, VectorError> {
        let buf = RawMemory::allocate(self.len)?;
        // SAFETY: `self[..len]` is live and `buf` has `len` empty slots.
        unsafe { relocate::clone_into(self.buf.ptr(), buf.ptr(), self.len)? };
        Ok(Self {
            buf,
            len: self.len,
            _strategy: PhantomData,
        })
    }

    /// Copy assignment from `source`.
    ///
    /// When `source` does not fit in the current block, a full copy is built
    /// and swapped in (strong). Otherwise the common prefix is copy-assigned
    /// in place and the excess is destroyed or the missing suffix
    /// copy-constructed; a failure there leaves a valid vector whose length
    /// counts exactly the live elements (basic).
    pub fn assign_from(&mut self, source: &Self) -> Result<(), VectorError> {
        if source.len > self.capacity() {
            let mut copy = source.try_clone()?;
            self.swap(&mut copy);
            return Ok(());
        }

        self.truncate(source.len);
        let shared = self.len;
        for (dst, src) in self.as_mut_slice().iter_mut().zip(source.iter()) {
            dst.try_clone_from(src)?;
        }
        for src in &source[shared..] {
            let value = src.try_clone()?;
            // SAFETY: `len < source.len <= capacity` and the slot is empty.
            unsafe { self.buf.at(self.len).write(value) };
            self.len += 1;
        }
        Ok(())
    }
}

impl<T, R> Drop for Vector<T, R> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; the block itself is released by
        // `RawMemory`'s own drop afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) };
    }
}

impl<T, R> Default for Vector<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Deref for Vector<T, R> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, R> DerefMut for Vector<T, R> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone, R> Clone for Vector<T, R> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| err.handle())
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.assign_from(source) {
            err.handle();
        }
    }
}

impl<T: fmt::Debug, R> fmt::Debug for Vector<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, R, S> PartialEq<Vector<T, S>> for Vector<T, R> {
    fn eq(&self, other: &Vector<T, S>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, R> Eq for Vector<T, R> {}

impl<T: PartialEq, R> PartialEq<[T]> for Vector<T, R> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, R, const N: usize> PartialEq<[T; N]> for Vector<T, R> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, R: Relocate<T>> Extend<T> for Vector<T, R> {
    /// # Panics
    ///
    /// Panics (or aborts, for allocation failure) where
    /// [`push_back`](Vector::push_back) would return an error.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.reserve_for_append(lower) {
            err.handle();
        }
        for value in iter {
            if let Err(err) = self.push_back(value) {
                err.handle();
            }
        }
    }
}

impl<T, R: Relocate<T>> FromIterator<T> for Vector<T, R> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v = Self::new();
        v.extend(iter);
        v
    }
}
