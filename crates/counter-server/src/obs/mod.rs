//! In-process request metrics, rendered by the `/metrics` handler.

pub mod metrics;
