//! The in-place optional container.

use std::fmt;
use std::mem::MaybeUninit;

use crate::error::EmptyAccess;

/// Either empty or holding exactly one `T`, stored inline.
pub struct Optional<T> {
    slot: MaybeUninit<T>,
    /// `slot` is initialized iff `engaged`.
    engaged: bool,
}

impl<T> Optional<T> {
    /// An empty slot.
    pub const fn new() -> Self {
        Self {
            slot: MaybeUninit::uninit(),
            engaged: false,
        }
    }

    /// A slot holding `value`.
    pub const fn with_value(value: T) -> Self {
        Self {
            slot: MaybeUninit::new(value),
            engaged: true,
        }
    }

    /// Whether a value is held.
    pub fn has_value(&self) -> bool {
        self.engaged
    }

    /// The held value, without checking.
    ///
    /// # Safety
    ///
    /// A value must be held.
    pub unsafe fn get_unchecked(&self) -> &T {
        debug_assert!(self.engaged, "get_unchecked on an empty Optional");
        // SAFETY: caller guarantees the slot is engaged.
        unsafe { self.slot.assume_init_ref() }
    }

    /// The held value mutably, without checking.
    ///
    /// # Safety
    ///
    /// A value must be held.
    pub unsafe fn get_unchecked_mut(&mut self) -> &mut T {
        debug_assert!(self.engaged, "get_unchecked_mut on an empty Optional");
        // SAFETY: caller guarantees the slot is engaged.
        unsafe { self.slot.assume_init_mut() }
    }

    /// The held value, or [`EmptyAccess`].
    pub fn value(&self) -> Result<&T, EmptyAccess> {
        if self.engaged {
            // SAFETY: engaged.
            Ok(unsafe { self.slot.assume_init_ref() })
        } else {
            Err(EmptyAccess)
        }
    }

    /// The held value mutably, or [`EmptyAccess`].
    pub fn value_mut(&mut self) -> Result<&mut T, EmptyAccess> {
        if self.engaged {
            // SAFETY: engaged.
            Ok(unsafe { self.slot.assume_init_mut() })
        } else {
            Err(EmptyAccess)
        }
    }

    /// Destroy the held value, if any.
    pub fn reset(&mut self) {
        if self.engaged {
            // Disengage first so a panicking drop cannot run it twice.
            self.engaged = false;
            // SAFETY: the slot was engaged and is no longer reachable.
            unsafe { self.slot.assume_init_drop() };
        }
    }

    /// Store `value`: assigned over the held value, or constructed into an
    /// empty slot. Returns the held value.
    pub fn assign(&mut self, value: T) -> &mut T {
        if self.engaged {
            // SAFETY: engaged; plain assignment drops the old value.
            let held = unsafe { self.slot.assume_init_mut() };
            *held = value;
            held
        } else {
            let held = self.slot.write(value);
            self.engaged = true;
            held
        }
    }

    /// Move assignment: adopt `source`'s state and leave it empty.
    ///
    /// An empty source resets `self`; an engaged source is assigned over
    /// the held value or constructed into the empty slot.
    pub fn move_assign(&mut self, source: &mut Self) {
        match source.take() {
            Some(value) => {
                self.assign(value);
            }
            None => self.reset(),
        }
    }

    /// Move the value out, leaving the slot empty.
    pub fn take(&mut self) -> Option<T> {
        if !self.engaged {
            return None;
        }
        self.engaged = false;
        // SAFETY: was engaged; the flag now marks the slot uninitialized.
        Some(unsafe { self.slot.assume_init_read() })
    }

    /// Borrow as a standard `Option`.
    pub fn as_option(&self) -> Option<&T> {
        self.value().ok()
    }

    /// Borrow mutably as a standard `Option`.
    pub fn as_option_mut(&mut self) -> Option<&mut T> {
        self.value_mut().ok()
    }

    /// Convert into a standard `Option`.
    pub fn into_option(mut self) -> Option<T> {
        self.take()
    }
}

impl<T: Clone> Optional<T> {
    /// Copy assignment from `source`.
    ///
    /// An empty source resets `self`. An engaged source is copy-assigned
    /// onto the held value (`Clone::clone_from`) or copy-constructed into
    /// the empty slot.
    pub fn assign_from(&mut self, source: &Self) {
        match (source.as_option(), self.engaged) {
            (None, _) => self.reset(),
            (Some(value), true) => {
                // SAFETY: engaged.
                unsafe { self.slot.assume_init_mut() }.clone_from(value);
            }
            (Some(value), false) => {
                self.slot.write(value.clone());
                self.engaged = true;
            }
        }
    }
}

impl<T> Drop for Optional<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Optional<T> {
    fn clone(&self) -> Self {
        match self.as_option() {
            Some(value) => Self::with_value(value.clone()),
            None => Self::new(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from(source);
    }
}

impl<T> From<T> for Optional<T> {
    fn from(value: T) -> Self {
        Self::with_value(value)
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::new, Self::with_value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(value: Optional<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Debug> fmt::Debug for Optional<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_option() {
            Some(value) => f.debug_tuple("Optional").field(value).finish(),
            None => f.write_str("Optional(<empty>)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Optional<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_option() == other.as_option()
    }
}

impl<T: Eq> Eq for Optional<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn default_is_empty() {
        let slot: Optional<String> = Optional::default();
        assert!(!slot.has_value());
        assert_eq!(slot.value(), Err(EmptyAccess));
        assert_eq!(slot.as_option(), None);
    }

    #[test]
    fn assign_constructs_then_assigns() {
        let marker = Rc::new(());
        let mut slot = Optional::new();
        slot.assign(Rc::clone(&marker));
        assert_eq!(Rc::strong_count(&marker), 2);
        slot.assign(Rc::clone(&marker));
        assert_eq!(Rc::strong_count(&marker), 2, "old value destroyed");
        slot.reset();
        assert_eq!(Rc::strong_count(&marker), 1);
        slot.reset();
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn assign_returns_held_value() {
        let mut slot = Optional::new();
        *slot.assign(3) += 1;
        assert_eq!(slot.value(), Ok(&4));
        *slot.value_mut().unwrap() *= 10;
        // SAFETY: engaged above.
        assert_eq!(unsafe { *slot.get_unchecked() }, 40);
    }

    #[test]
    fn drop_destroys_once() {
        let marker = Rc::new(());
        {
            let _slot = Optional::with_value(Rc::clone(&marker));
            assert_eq!(Rc::strong_count(&marker), 2);
        }
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn take_empties_without_dropping() {
        let mut slot = Optional::from(String::from("x"));
        assert_eq!(slot.take().as_deref(), Some("x"));
        assert!(!slot.has_value());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn move_assign_has_both_shapes() {
        let mut dst = Optional::with_value(1);
        let mut empty = Optional::new();
        dst.move_assign(&mut empty);
        assert!(!dst.has_value());

        let mut src = Optional::with_value(7);
        dst.move_assign(&mut src);
        assert_eq!(dst.value(), Ok(&7));
        assert!(!src.has_value());
    }

    #[test]
    fn assign_from_copies_or_resets() {
        let src = Optional::with_value(String::from("abc"));
        let mut dst = Optional::new();
        dst.assign_from(&src);
        assert_eq!(dst, src);
        dst.value_mut().unwrap().push('d');
        assert_eq!(src.value().unwrap(), "abc");

        dst.assign_from(&Optional::new());
        assert!(!dst.has_value());
    }

    #[test]
    fn std_option_conversions() {
        let slot: Optional<u8> = Some(5).into();
        let back: Option<u8> = slot.into();
        assert_eq!(back, Some(5));
        let empty: Optional<u8> = None.into();
        assert_eq!(empty.into_option(), None);
    }

    #[test]
    fn debug_shows_state() {
        assert_eq!(format!("{:?}", Optional::with_value(2)), "Optional(2)");
        assert_eq!(format!("{:?}", Optional::<u8>::new()), "Optional(<empty>)");
    }
}
