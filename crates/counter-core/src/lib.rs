//! Counter core: the bounded counter state machine, its wire model, and the
//! error surface shared by the server and the client.
//!
//! This crate carries no transport or runtime dependencies so the state
//! machine can be exercised directly in tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every fallible path
//! surfaces as `CounterError`/`Result` or as a `Boundary` rejection.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod log_level;
pub mod model;

pub use counter::{Boundary, Counter};
/// Shared result type.
pub use error::{CounterError, Result};
pub use model::{counter_path, CounterRsp, API_VERSION};
