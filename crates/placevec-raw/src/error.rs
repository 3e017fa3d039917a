//! Allocation error types.

use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Errors that can occur while obtaining a block from the global allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The byte size of the requested block does not fit in `isize::MAX`.
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
    /// The global allocator could not satisfy the request.
    OutOfMemory {
        /// Layout that was requested.
        layout: Layout,
    },
}

impl AllocError {
    /// Diverge the way `std` collections do for an allocation failure.
    ///
    /// `OutOfMemory` is routed to [`std::alloc::handle_alloc_error`];
    /// `CapacityOverflow` panics with `"capacity overflow"`.
    pub fn handle(self) -> ! {
        match self {
            Self::CapacityOverflow { .. } => panic!("capacity overflow"),
            Self::OutOfMemory { layout } => std::alloc::handle_alloc_error(layout),
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements do not fit in isize::MAX bytes")
            }
            Self::OutOfMemory { layout } => {
                write!(
                    f,
                    "out of memory: failed to allocate {} bytes (align {})",
                    layout.size(),
                    layout.align()
                )
            }
        }
    }
}

impl Error for AllocError {}
