//! Test utilities for placevec development.
//!
//! Provides element types that make object lifetimes observable
//! ([`Census`], [`Tracked`]) and element types or factories that fail on
//! demand ([`Flaky`], [`failing_after`]). Integration tests combine the two
//! to check that a failed operation neither leaks nor double-drops.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

pub use fixtures::{failing_after, CloneBudget, Flaky};

/// Shared live-instance counter.
///
/// Every [`Tracked`] or [`Flaky`] registered with a census increments it on
/// construction (including clones) and decrements it on drop. A test that
/// ends with `live() == 0` saw every instance destroyed exactly once.
#[derive(Clone, Default)]
pub struct Census {
    live: Rc<Cell<usize>>,
    created: Rc<Cell<usize>>,
}

impl Census {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances currently alive.
    pub fn live(&self) -> usize {
        self.live.get()
    }

    /// Instances ever constructed, clones included.
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// A new tracked element carrying `id`.
    pub fn tracked(&self, id: u32) -> Tracked {
        self.enter();
        Tracked {
            id,
            census: self.clone(),
        }
    }

    pub(crate) fn enter(&self) {
        self.live.set(self.live.get() + 1);
        self.created.set(self.created.get() + 1);
    }

    pub(crate) fn leave(&self) {
        let live = self.live.get();
        assert!(live > 0, "census underflow: an instance was dropped twice");
        self.live.set(live - 1);
    }
}

impl fmt::Debug for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Census")
            .field("live", &self.live())
            .field("created", &self.created())
            .finish()
    }
}

/// An infallibly clonable element registered with a [`Census`].
pub struct Tracked {
    pub id: u32,
    census: Census,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.census.tracked(self.id)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.census.leave();
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.id)
    }
}

/// Ids of a slice of elements, for compact assertions.
pub fn ids<'a, I>(items: I) -> Vec<u32>
where
    I: IntoIterator<Item = &'a Tracked>,
{
    items.into_iter().map(|t| t.id).collect()
}
