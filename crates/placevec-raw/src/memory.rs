//! Uninitialized, exclusively-owned storage blocks.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use crate::error::AllocError;

/// A contiguous block of uninitialized storage for `capacity` values of `T`.
///
/// `RawMemory` never inspects the slots it owns. Dropping it releases the
/// block but does *not* run any element destructor: whoever constructed
/// values in the block must destroy them first.
///
/// A block of capacity 0 has no address. Zero-sized `T` never touches the
/// allocator; a non-zero capacity is recorded against a dangling address.
///
/// Ownership is single and moves only: the type is deliberately not
/// `Clone`, since duplicating the address would lead to a double release.
///
/// ```compile_fail
/// use placevec_raw::RawMemory;
///
/// let block = RawMemory::<u32>::allocate(4).unwrap();
/// let copy = block.clone();
/// ```
pub struct RawMemory<T> {
    /// Base address; `None` iff no block is held.
    ptr: Option<NonNull<T>>,
    /// Number of `T` slots in the block.
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: `RawMemory` owns its block uniquely, exactly like `Box<[T]>`.
unsafe impl<T: Send> Send for RawMemory<T> {}
// SAFETY: shared access only hands out addresses; reads through them are the
// holder's responsibility, which again mirrors `Box<[T]>`.
unsafe impl<T: Sync> Sync for RawMemory<T> {}

impl<T> RawMemory<T> {
    /// An absent block with capacity 0. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: None,
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate a block for `capacity` values of `T`.
    ///
    /// Returns an absent block when `capacity` is 0. Fails with
    /// [`AllocError::CapacityOverflow`] when the byte size would exceed
    /// `isize::MAX`, and with [`AllocError::OutOfMemory`] when the global
    /// allocator returns null.
    pub fn allocate(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout_for(capacity)?;
        if layout.size() == 0 {
            return Ok(Self {
                ptr: Some(NonNull::dangling()),
                capacity,
                _owns: PhantomData,
            });
        }
        // SAFETY: `layout` has a non-zero size (checked above).
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(AllocError::OutOfMemory { layout })?;
        Ok(Self {
            ptr: Some(ptr),
            capacity,
            _owns: PhantomData,
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow {
            requested: capacity,
        })
    }

    /// Release the block, leaving `self` absent with capacity 0.
    ///
    /// Idempotent. Never runs element destructors.
    pub fn release(&mut self) {
        let Some(ptr) = self.ptr.take() else {
            return;
        };
        let capacity = mem::replace(&mut self.capacity, 0);
        // The same layout was computed successfully when the block was allocated.
        if let Ok(layout) = Self::layout_for(capacity) {
            if layout.size() != 0 {
                // SAFETY: `ptr` came from `alloc::alloc` with exactly this layout
                // and has not been released (we just took it out of `self`).
                unsafe { alloc::dealloc(ptr.as_ptr().cast::<u8>(), layout) };
            }
        }
    }

    /// Number of `T` slots the block can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a block is held. `false` implies capacity 0.
    pub fn is_allocated(&self) -> bool {
        self.ptr.is_some()
    }

    /// Base address of the block, or `None` when absent.
    pub fn address(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Base address of the block as a raw pointer.
    ///
    /// Dangling (but aligned and non-null) when the block is absent.
    pub fn ptr(&self) -> *mut T {
        self.ptr.unwrap_or(NonNull::dangling()).as_ptr()
    }

    /// Address of the slot at `offset`.
    ///
    /// One-past-the-end (`offset == capacity`) is allowed.
    ///
    /// # Safety
    ///
    /// `offset <= self.capacity()`. Checked only in debug builds.
    pub unsafe fn at(&self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "offset {offset} out of range for capacity {}",
            self.capacity
        );
        // SAFETY: caller guarantees the offset stays within the block (or one
        // past it); for an absent block the only valid offset is 0.
        unsafe { self.ptr().add(offset) }
    }

    /// Exchange blocks with `other` in O(1).
    ///
    /// This is the commit step of every reallocation: a fully built new
    /// block replaces the old one in a single swap.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving `self` absent with capacity 0.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Size of the block in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.capacity * mem::size_of::<T>()
    }
}

impl<T> Default for RawMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawMemory<T> {
    /// Frees the block *without* touching its contents.
    fn drop(&mut self) {
        self.release();
    }
}

impl<T> fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMemory")
            .field("address", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}
