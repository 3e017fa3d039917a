//! Drop guards that roll back partial construction.
//!
//! Both an `Err` return and an unwinding panic drop the guard, so the same
//! rollback covers explicit failures and panicking element code.

use std::marker::PhantomData;
use std::mem;
use std::ptr;

use crate::relocate::Relocate;

/// A run of elements constructed into uninitialized slots, starting at
/// `base`. Destroyed on drop unless disarmed.
pub(crate) struct ConstructedRun<T> {
    base: *mut T,
    len: usize,
}

impl<T> ConstructedRun<T> {
    pub(crate) fn new(base: *mut T) -> Self {
        Self { base, len: 0 }
    }

    /// Construct `value` in the next slot of the run.
    ///
    /// # Safety
    ///
    /// `base + len` must be an uninitialized, writable slot.
    pub(crate) unsafe fn push(&mut self, value: T) {
        // SAFETY: caller guarantees the next slot is writable and empty.
        unsafe { self.base.add(self.len).write(value) };
        self.len += 1;
    }

    /// Keep the constructed elements alive; returns how many there are.
    pub(crate) fn disarm(self) -> usize {
        let len = self.len;
        mem::forget(self);
        len
    }
}

impl<T> Drop for ConstructedRun<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `len` slots from `base` were initialized by `push`
        // and nothing else owns them while the guard is armed.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.base, self.len)) };
    }
}

/// A completed transfer segment in a block that is not yet committed.
///
/// If a later segment fails, dropping this guard undoes the segment with
/// [`Relocate::discard`] so the originals remain the only live copies.
pub(crate) struct TransferredSegment<T, R: Relocate<T>> {
    dst: *mut T,
    count: usize,
    _strategy: PhantomData<fn() -> R>,
}

impl<T, R: Relocate<T>> TransferredSegment<T, R> {
    pub(crate) fn new(dst: *mut T, count: usize) -> Self {
        Self {
            dst,
            count,
            _strategy: PhantomData,
        }
    }

    pub(crate) fn disarm(self) {
        mem::forget(self);
    }
}

impl<T, R: Relocate<T>> Drop for TransferredSegment<T, R> {
    fn drop(&mut self) {
        // SAFETY: `dst[..count]` is the output of a successful `R::transfer`
        // that has not been committed or retired.
        unsafe { R::discard(self.dst, self.count) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::MaybeUninit;
    use std::rc::Rc;

    #[test]
    fn armed_run_destroys_its_elements() {
        let marker = Rc::new(());
        let mut slots: [MaybeUninit<Rc<()>>; 3] = [const { MaybeUninit::uninit() }; 3];
        {
            let mut run = ConstructedRun::new(slots.as_mut_ptr().cast::<Rc<()>>());
            // SAFETY: three empty slots.
            unsafe {
                run.push(Rc::clone(&marker));
                run.push(Rc::clone(&marker));
            }
            assert_eq!(Rc::strong_count(&marker), 3);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn disarmed_run_keeps_its_elements() {
        let marker = Rc::new(());
        let mut slots: [MaybeUninit<Rc<()>>; 2] = [const { MaybeUninit::uninit() }; 2];
        let base = slots.as_mut_ptr().cast::<Rc<()>>();
        let mut run = ConstructedRun::new(base);
        // SAFETY: two empty slots.
        unsafe {
            run.push(Rc::clone(&marker));
            run.push(Rc::clone(&marker));
        }
        assert_eq!(run.disarm(), 2);
        assert_eq!(Rc::strong_count(&marker), 3);
        // SAFETY: both slots were initialized above.
        unsafe { ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, 2)) };
        assert_eq!(Rc::strong_count(&marker), 1);
    }
}
