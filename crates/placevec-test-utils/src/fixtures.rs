//! Elements and factories that fail on demand.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use placevec_vector::{ConstructError, TryClone};

use crate::Census;

/// Number of [`Flaky::try_clone`] calls that may still succeed, shared by
/// every element created from the same budget.
#[derive(Clone)]
pub struct CloneBudget {
    remaining: Rc<Cell<usize>>,
}

impl CloneBudget {
    /// A budget allowing `clones` successful copies.
    pub fn new(clones: usize) -> Self {
        Self {
            remaining: Rc::new(Cell::new(clones)),
        }
    }

    /// A budget that never runs out in practice.
    pub fn unlimited() -> Self {
        Self::new(usize::MAX)
    }

    pub fn set(&self, clones: usize) {
        self.remaining.set(clones);
    }

    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    fn spend(&self) -> Result<(), ConstructError> {
        match self.remaining.get() {
            0 => Err(ConstructError::new("clone budget exhausted")),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

impl fmt::Debug for CloneBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CloneBudget").field(&self.remaining()).finish()
    }
}

/// An element whose copies fail once its [`CloneBudget`] is spent.
///
/// `Flaky` is deliberately not `Clone`: it only implements [`TryClone`], so
/// it can be stored in a `Vector<Flaky, ByClone>` to exercise relocation
/// rollback.
pub struct Flaky {
    pub id: u32,
    census: Census,
    budget: CloneBudget,
}

impl Flaky {
    pub fn new(id: u32, census: &Census, budget: &CloneBudget) -> Self {
        census.enter();
        Self {
            id,
            census: census.clone(),
            budget: budget.clone(),
        }
    }
}

impl TryClone for Flaky {
    fn try_clone(&self) -> Result<Self, ConstructError> {
        self.budget.spend()?;
        Ok(Flaky::new(self.id, &self.census, &self.budget))
    }
}

impl Drop for Flaky {
    fn drop(&mut self) {
        self.census.leave();
    }
}

impl PartialEq for Flaky {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Flaky {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flaky({})", self.id)
    }
}

/// A factory that yields `make()` for its first `successes` calls and
/// fails on every call after that.
pub fn failing_after<T, F>(successes: usize, mut make: F) -> impl FnMut() -> Result<T, ConstructError>
where
    F: FnMut() -> T,
{
    let mut calls = 0;
    move || {
        calls += 1;
        if calls > successes {
            Err(ConstructError::new(format!("factory refused call {calls}")))
        } else {
            Ok(make())
        }
    }
}
