//! Exclusively-owned blocks of uninitialized storage.
//!
//! [`RawMemory<T>`] is the lowest layer of the placevec workspace: it owns a
//! single contiguous allocation sized for a fixed number of `T` slots and
//! nothing else. Owning a block implies no object lifetimes: the holder
//! decides which slots contain live values and must destroy them before the
//! block is released.
//!
//! # Layering
//!
//! ```text
//! Vector<T, R> (placevec-vector)
//! ├── len: usize          live prefix [0, len)
//! └── RawMemory<T>        [0, capacity) uninitialized slots
//!     ├── Option<NonNull<T>>
//!     └── capacity
//! ```
//!
//! Along with `placevec-vector` and `placevec-optional`, this crate may
//! contain `unsafe` code. Every `unsafe` block carries a `// SAFETY:`
//! comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod memory;

pub use error::AllocError;
pub use memory::RawMemory;
