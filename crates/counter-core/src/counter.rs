//! Bounded counter state machine.
//!
//! A single `u64` guarded by a reader/writer lock: `get` takes shared access,
//! `increment`/`decrement` take exclusive access. Both mutations saturate at
//! the bounds and report a [`Boundary`] rejection instead of wrapping.

use std::sync::{PoisonError, RwLock};

use thiserror::Error;

/// Defined rejection when a mutation would leave `[0, Counter::MAX]`.
///
/// The `Display` text is the body returned to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Boundary {
    #[error("unable to increment, counter has reached its maximum value")]
    AtMaximum,
    #[error("unable to decrement, counter has reached its minimum value")]
    AtMinimum,
}

impl Boundary {
    /// Metrics label for this outcome.
    pub fn as_label(self) -> &'static str {
        match self {
            Boundary::AtMaximum => "at_maximum",
            Boundary::AtMinimum => "at_minimum",
        }
    }
}

/// The process-wide counter. Owned by the server state, not a global.
#[derive(Debug, Default)]
pub struct Counter {
    value: RwLock<u64>,
}

impl Counter {
    pub const MAX: u64 = u64::MAX;

    pub fn new() -> Self {
        Self::with_value(0)
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Current value. Concurrent with other readers, exclusive with writers.
    pub fn get(&self) -> u64 {
        // The critical sections below never panic between check and store,
        // so a poisoned guard still holds a consistent value.
        *self.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one, or reject with [`Boundary::AtMaximum`] leaving the value as is.
    pub fn increment(&self) -> Result<u64, Boundary> {
        let mut v = self.value.write().unwrap_or_else(PoisonError::into_inner);
        if *v == Self::MAX {
            tracing::debug!("increment rejected at maximum");
            return Err(Boundary::AtMaximum);
        }
        *v += 1;
        tracing::debug!(counter = *v, "counter incremented");
        Ok(*v)
    }

    /// Subtract one, or reject with [`Boundary::AtMinimum`] leaving the value as is.
    pub fn decrement(&self) -> Result<u64, Boundary> {
        let mut v = self.value.write().unwrap_or_else(PoisonError::into_inner);
        if *v == 0 {
            tracing::debug!("decrement rejected at minimum");
            return Err(Boundary::AtMinimum);
        }
        *v -= 1;
        tracing::debug!(counter = *v, "counter decremented");
        Ok(*v)
    }
}
