//! Vector error types.
//!
//! [`ConstructError`] is what a fallible element constructor (a factory
//! closure or [`TryClone`](crate::TryClone)) reports. [`VectorError`] is
//! what every fallible [`Vector`](crate::Vector) operation returns: either
//! the backing block could not be obtained, or an element could not be
//! built.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use placevec_raw::AllocError;

/// An element constructor, copy, or clone-based transfer failed.
#[derive(Debug)]
pub struct ConstructError {
    reason: Cow<'static, str>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl ConstructError {
    /// A construction failure described by `reason`.
    pub fn new(reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            reason: reason.into(),
            source: None,
        }
    }

    /// A construction failure caused by another error.
    pub fn with_source(
        reason: impl Into<Cow<'static, str>>,
        source: impl Into<Box<dyn Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Human-readable description of the failure.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ConstructError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element construction failed: {}", self.reason)
    }
}

impl Error for ConstructError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

/// Errors returned by fallible [`Vector`](crate::Vector) operations.
///
/// Operations documented as strong leave the vector exactly as it was
/// before the call when they return either variant.
#[derive(Debug)]
pub enum VectorError {
    /// A new backing block could not be obtained.
    AllocationFailure(AllocError),
    /// An element could not be constructed, copied, or transferred.
    ElementConstruction(ConstructError),
}

impl VectorError {
    /// Diverge the way `std` collections do.
    ///
    /// Used where a trait signature (`Clone`, `Extend`, `FromIterator`)
    /// leaves no room for a `Result`.
    pub fn handle(self) -> ! {
        match self {
            Self::AllocationFailure(err) => err.handle(),
            Self::ElementConstruction(err) => panic!("{err}"),
        }
    }
}

impl From<AllocError> for VectorError {
    fn from(err: AllocError) -> Self {
        Self::AllocationFailure(err)
    }
}

impl From<ConstructError> for VectorError {
    fn from(err: ConstructError) -> Self {
        Self::ElementConstruction(err)
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailure(err) => write!(f, "allocation failed: {err}"),
            Self::ElementConstruction(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VectorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AllocationFailure(err) => Some(err),
            Self::ElementConstruction(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct_error_reports_reason() {
        let err = ConstructError::new("budget exhausted");
        assert_eq!(err.reason(), "budget exhausted");
        assert_eq!(
            err.to_string(),
            "element construction failed: budget exhausted"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn construct_error_chains_source() {
        let parse = "x".parse::<u32>().unwrap_err();
        let err = ConstructError::with_source("bad literal", parse);
        let source = err.source().expect("source is kept");
        assert!(source.to_string().contains("invalid digit"));
    }

    #[test]
    fn vector_error_wraps_both_kinds() {
        let alloc: VectorError = AllocError::CapacityOverflow { requested: 3 }.into();
        assert!(matches!(alloc, VectorError::AllocationFailure(_)));
        assert!(alloc.to_string().starts_with("allocation failed"));

        let construct: VectorError = ConstructError::new("nope").into();
        assert!(matches!(construct, VectorError::ElementConstruction(_)));
        assert!(construct.source().is_some());
    }

    #[test]
    #[should_panic(expected = "element construction failed: boom")]
    fn handle_panics_with_construct_message() {
        VectorError::from(ConstructError::new("boom")).handle();
    }
}
