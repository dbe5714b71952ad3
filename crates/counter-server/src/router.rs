//! Axum router wiring.
//!
//! The counter resource is bound with `any` so every verb reaches the counter
//! handler, which decides between dispatch and 405.

use axum::{
    routing::{any, get},
    Router,
};
use counter_core::counter_path;

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(&counter_path(), any(api::counter::handle))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
