//! Error for checked access to an empty slot.

use std::error::Error;
use std::fmt;

/// A checked accessor was called on an empty [`Optional`](crate::Optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyAccess;

impl fmt::Display for EmptyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bad optional access")
    }
}

impl Error for EmptyAccess {}
