//! Counter server library entry.
//!
//! Wires the counter state machine into an axum router together with the
//! operational endpoints, metrics, configuration, and logging. Consumed by the
//! `counter-server` binary and by integration tests.

pub mod api;
pub mod app_state;
pub mod cli;
pub mod config;
pub mod logging;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
