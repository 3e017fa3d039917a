//! Fallible copy construction and copy assignment.

use crate::error::ConstructError;

/// Copy construction that may fail.
///
/// Every `T: Clone` implements this infallibly through a blanket impl.
/// Element types whose copies can fail implement it directly (and do not
/// implement `Clone`).
pub trait TryClone: Sized {
    /// Copy-construct a new value from `self`.
    fn try_clone(&self) -> Result<Self, ConstructError>;

    /// Copy-assign `source` into `self`.
    ///
    /// On failure `self` must still be a valid value.
    fn try_clone_from(&mut self, source: &Self) -> Result<(), ConstructError> {
        *self = source.try_clone()?;
        Ok(())
    }
}

impl<T: Clone> TryClone for T {
    fn try_clone(&self) -> Result<Self, ConstructError> {
        Ok(self.clone())
    }

    fn try_clone_from(&mut self, source: &Self) -> Result<(), ConstructError> {
        self.clone_from(source);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Brittle(u8);

    impl TryClone for Brittle {
        fn try_clone(&self) -> Result<Self, ConstructError> {
            if self.0 == 0 {
                Err(ConstructError::new("zero cannot be copied"))
            } else {
                Ok(Brittle(self.0))
            }
        }
    }

    #[test]
    fn clone_types_never_fail() {
        let s = String::from("abc");
        assert_eq!(s.try_clone().unwrap(), "abc");

        let mut dst = String::from("old");
        dst.try_clone_from(&s).unwrap();
        assert_eq!(dst, "abc");
    }

    #[test]
    fn default_clone_from_keeps_target_on_failure() {
        let mut dst = Brittle(7);
        assert!(dst.try_clone_from(&Brittle(0)).is_err());
        assert_eq!(dst.0, 7);
        dst.try_clone_from(&Brittle(3)).unwrap();
        assert_eq!(dst.0, 3);
    }
}
