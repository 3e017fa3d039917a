//! A single-slot optional value stored in place.
//!
//! [`Optional<T>`] holds either nothing or exactly one `T` inside its own
//! storage. There is no growth or relocation: a value is constructed into
//! the slot at most once per engagement and destroyed exactly once, either
//! by [`Optional::reset`], by being moved out, or on drop.
//!
//! ```
//! use placevec_optional::{EmptyAccess, Optional};
//!
//! let mut slot = Optional::new();
//! assert_eq!(slot.value(), Err(EmptyAccess));
//! slot.assign(String::from("ready"));
//! assert_eq!(slot.value().map(String::as_str), Ok("ready"));
//! slot.reset();
//! assert!(!slot.has_value());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod error;
pub mod optional;

pub use error::EmptyAccess;
pub use optional::Optional;
