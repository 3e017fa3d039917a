//! Compile-time selection between moving and copying during relocation.
//!
//! Every operation that replaces a vector's block carries its live
//! elements across with the strategy named by the vector's `R` type
//! parameter. The choice is made once per instantiation, never per element:
//!
//! - [`ByMove`] (default): a bitwise move. Rust moves cannot fail, so the
//!   transfer always succeeds and the originals need no destruction.
//! - [`ByClone`]: copy-construct each element with
//!   [`TryClone`]. A failure destroys the partial
//!   copy and leaves the originals untouched; on success the originals are
//!   retired (dropped).

use std::ptr;

use crate::element::TryClone;
use crate::error::ConstructError;
use crate::guard::ConstructedRun;

/// A strategy for carrying live elements from one block into another.
///
/// A relocation runs as `transfer` for each segment, then `retire` on the
/// whole source once every segment has succeeded. A segment that completed
/// before a later one failed is undone with `discard`.
///
/// # Safety
///
/// Implementations must uphold:
///
/// - `transfer` either initializes all of `dst[..count]` and returns `Ok`,
///   or leaves `dst` with no live elements and returns `Err`. It never
///   invalidates `src[..count]` as observed by `discard`.
/// - After `discard(dst, count)`, `src` holds the only live copies.
/// - After `retire(src, count)`, `dst` holds the only live copies and
///   `src[..count]` may be treated as uninitialized.
pub unsafe trait Relocate<T> {
    /// Short name used in log events.
    const NAME: &'static str;

    /// Carry `count` live elements from `src` into uninitialized `dst`.
    ///
    /// # Safety
    ///
    /// `src[..count]` is live, `dst[..count]` is uninitialized and writable,
    /// and the two ranges do not overlap.
    unsafe fn transfer(src: *mut T, dst: *mut T, count: usize) -> Result<(), ConstructError>;

    /// Finish a committed relocation by retiring the originals.
    ///
    /// # Safety
    ///
    /// `src[..count]` was fully transferred and will not be read again.
    unsafe fn retire(src: *mut T, count: usize);

    /// Undo a successful, uncommitted `transfer` into `dst`.
    ///
    /// # Safety
    ///
    /// `dst[..count]` is the untouched output of `transfer`.
    unsafe fn discard(dst: *mut T, count: usize);
}

/// Relocate by bitwise move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByMove;

// SAFETY: a bitwise copy leaves the source bytes intact, so abandoning the
// destination (`discard`) restores the originals, and forgetting the source
// (`retire`) completes the move.
unsafe impl<T> Relocate<T> for ByMove {
    const NAME: &'static str = "move";

    unsafe fn transfer(src: *mut T, dst: *mut T, count: usize) -> Result<(), ConstructError> {
        // SAFETY: caller guarantees both ranges are valid and disjoint.
        unsafe { ptr::copy_nonoverlapping(src, dst, count) };
        Ok(())
    }

    unsafe fn retire(_src: *mut T, _count: usize) {}

    unsafe fn discard(_dst: *mut T, _count: usize) {}
}

/// Relocate by fallible copy construction.
///
/// Useful when a failed relocation must be observable as an error, or when
/// element values must be rebuilt rather than bit-copied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByClone;

// SAFETY: `clone_into` destroys its partial output on failure; the source is
// only ever read. `retire` and `discard` each drop exactly one set of copies.
unsafe impl<T: TryClone> Relocate<T> for ByClone {
    const NAME: &'static str = "clone";

    unsafe fn transfer(src: *mut T, dst: *mut T, count: usize) -> Result<(), ConstructError> {
        // SAFETY: forwarded caller contract.
        unsafe { clone_into(src, dst, count) }
    }

    unsafe fn retire(src: *mut T, count: usize) {
        // SAFETY: caller guarantees `src[..count]` is live and unused hereafter.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src, count)) };
    }

    unsafe fn discard(dst: *mut T, count: usize) {
        // SAFETY: `dst[..count]` holds copies nobody else owns.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(dst, count)) };
    }
}

/// Copy-construct `src[..count]` into uninitialized `dst[..count]`.
///
/// All-or-nothing: on failure (or panic) the copies made so far are
/// destroyed before returning.
///
/// # Safety
///
/// `src[..count]` is live, `dst[..count]` is uninitialized and writable.
pub(crate) unsafe fn clone_into<T: TryClone>(
    src: *const T,
    dst: *mut T,
    count: usize,
) -> Result<(), ConstructError> {
    let mut copies = ConstructedRun::new(dst);
    for i in 0..count {
        // SAFETY: i < count, so the source slot is live.
        let value = unsafe { &*src.add(i) }.try_clone()?;
        // SAFETY: exactly `i` copies were made so far, slot `i` is free.
        unsafe { copies.push(value) };
    }
    copies.disarm();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::mem::MaybeUninit;
    use std::rc::Rc;

    /// Clones succeed while the shared budget lasts.
    struct Limited {
        value: u32,
        budget: Rc<Cell<usize>>,
        live: Rc<Cell<usize>>,
    }

    impl Limited {
        fn new(value: u32, budget: &Rc<Cell<usize>>, live: &Rc<Cell<usize>>) -> Self {
            live.set(live.get() + 1);
            Self {
                value,
                budget: Rc::clone(budget),
                live: Rc::clone(live),
            }
        }
    }

    impl TryClone for Limited {
        fn try_clone(&self) -> Result<Self, ConstructError> {
            if self.budget.get() == 0 {
                return Err(ConstructError::new("budget exhausted"));
            }
            self.budget.set(self.budget.get() - 1);
            Ok(Limited::new(self.value, &self.budget, &self.live))
        }
    }

    impl Drop for Limited {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    fn sources(
        n: u32,
        budget: &Rc<Cell<usize>>,
        live: &Rc<Cell<usize>>,
    ) -> Vec<Limited> {
        (0..n).map(|v| Limited::new(v, budget, live)).collect()
    }

    #[test]
    fn clone_transfer_copies_everything_within_budget() {
        let budget = Rc::new(Cell::new(10));
        let live = Rc::new(Cell::new(0));
        let mut src = sources(4, &budget, &live);
        let mut dst: [MaybeUninit<Limited>; 4] = [const { MaybeUninit::uninit() }; 4];
        let dst_ptr = dst.as_mut_ptr().cast::<Limited>();

        // SAFETY: four live sources, four empty destination slots.
        unsafe { ByClone::transfer(src.as_mut_ptr(), dst_ptr, 4) }.unwrap();
        assert_eq!(live.get(), 8);
        for i in 0..4 {
            // SAFETY: slot i was initialized by the transfer.
            assert_eq!(unsafe { &*dst_ptr.add(i) }.value, i as u32);
        }
        // SAFETY: the copies are only owned by `dst`.
        unsafe { <ByClone as Relocate<Limited>>::discard(dst_ptr, 4) };
        assert_eq!(live.get(), 4);
        drop(src);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn failed_clone_transfer_leaves_no_copies() {
        let budget = Rc::new(Cell::new(2));
        let live = Rc::new(Cell::new(0));
        let mut src = sources(4, &budget, &live);
        let mut dst: [MaybeUninit<Limited>; 4] = [const { MaybeUninit::uninit() }; 4];

        // SAFETY: as above.
        let result = unsafe { ByClone::transfer(src.as_mut_ptr(), dst.as_mut_ptr().cast(), 4) };
        assert!(result.is_err());
        assert_eq!(live.get(), 4, "partial copies must be destroyed");
        assert!(src.iter().enumerate().all(|(i, s)| s.value == i as u32));
    }

    #[test]
    fn move_transfer_is_bitwise_and_discard_is_a_no_op() {
        let mut src = [String::from("a"), String::from("b")];
        let mut dst: [MaybeUninit<String>; 2] = [const { MaybeUninit::uninit() }; 2];
        let dst_ptr = dst.as_mut_ptr().cast::<String>();

        // SAFETY: disjoint arrays of two slots each.
        unsafe { ByMove::transfer(src.as_mut_ptr(), dst_ptr, 2) }.unwrap();
        // SAFETY: slot 1 was written by the transfer.
        assert_eq!(unsafe { &*dst_ptr.add(1) }, "b");
        // Abandon the destination: the source keeps sole ownership.
        // SAFETY: transfer output, uncommitted.
        unsafe { <ByMove as Relocate<String>>::discard(dst_ptr, 2) };
        assert_eq!(src, ["a", "b"]);
    }
}
