//! placevec: a hand-built growable vector over raw memory.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the placevec sub-crates. For most users, adding `placevec` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use placevec::prelude::*;
//!
//! let mut v: Vector<i32> = Vector::new();
//! v.push_back(1)?;
//! v.push_back(2)?;
//! v.insert(1, 99)?;
//! v.erase(0);
//! assert_eq!(v, [99, 2]);
//!
//! let mut slot = Optional::new();
//! slot.assign(v.len());
//! assert_eq!(slot.value(), Ok(&2));
//! # Ok::<(), VectorError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`raw`] | `placevec-raw` | `RawMemory`, `AllocError` |
//! | [`vector`] | `placevec-vector` | `Vector`, relocation strategies, `TryClone`, errors |
//! | [`optional`] | `placevec-optional` | `Optional`, `EmptyAccess` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Uninitialized storage blocks (`placevec-raw`).
pub use placevec_raw as raw;

/// The growable vector (`placevec-vector`).
///
/// Select copy-based relocation with [`vector::ByClone`]; the default is
/// [`vector::ByMove`].
pub use placevec_vector as vector;

/// The single-slot in-place optional (`placevec-optional`).
pub use placevec_optional as optional;

/// Common imports for typical placevec usage.
///
/// ```rust
/// use placevec::prelude::*;
/// ```
pub mod prelude {
    // Containers
    pub use placevec_optional::Optional;
    pub use placevec_vector::Vector;

    // Relocation
    pub use placevec_vector::{ByClone, ByMove, TryClone};

    // Errors
    pub use placevec_optional::EmptyAccess;
    pub use placevec_vector::{AllocError, ConstructError, VectorError};
}
