//! A growable contiguous vector with placement construction over raw memory.
//!
//! [`Vector<T, R>`] builds and destroys elements directly inside an
//! uninitialized [`RawMemory<T>`] block, grows geometrically, and keeps
//! precise failure guarantees: element construction may fail (a factory
//! returning `Err`, a [`TryClone`] copy that refuses) or panic, and the
//! vector rolls back to a consistent state either way.
//!
//! # Architecture
//!
//! ```text
//! Vector<T, R>
//! ├── RawMemory<T>         owned block, [0, capacity)
//! ├── len                  live prefix [0, len)
//! └── R: Relocate<T>       move-or-copy, chosen at compile time
//!     ├── ByMove           bitwise, cannot fail (default)
//!     └── ByClone          TryClone, may fail and roll back
//! ```
//!
//! Reallocation always builds a complete replacement block first and then
//! commits it with [`RawMemory::swap`]; the old block is never modified
//! before the commit.
//!
//! # Example
//!
//! ```
//! use placevec_vector::{ByClone, ConstructError, Vector};
//!
//! let mut names: Vector<String, ByClone> = Vector::with_capacity(2)?;
//! names.push_back("ada".to_string())?;
//! names.emplace_back(|| Ok("grace".to_string()))?;
//!
//! // A failing factory leaves the full vector untouched.
//! let err = names.emplace_back(|| Err(ConstructError::new("rejected")));
//! assert!(err.is_err());
//! assert_eq!(names, ["ada", "grace"].map(String::from));
//! assert_eq!(names.capacity(), 2);
//! # Ok::<(), placevec_vector::VectorError>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod element;
pub mod error;
pub mod growth;
mod guard;
pub mod iter;
pub mod relocate;
pub mod vector;

pub use element::TryClone;
pub use error::{ConstructError, VectorError};
pub use iter::IntoIter;
pub use placevec_raw::{AllocError, RawMemory};
pub use relocate::{ByClone, ByMove, Relocate};
pub use vector::Vector;
