//! `/api/v1/counter` handler: verb -> state machine -> response.
//!
//! - GET    -> `get`,       200 `{"counter": n}`
//! - POST   -> `increment`, 201 `{"counter": n}` or 422 at maximum
//! - DELETE -> `decrement`, 200 `{"counter": n}` or 422 at minimum
//! - other  -> 405 `method <VERB> is not supported`

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use counter_core::{CounterError, CounterRsp};

use super::ApiError;
use crate::app_state::AppState;

pub async fn handle(State(state): State<AppState>, method: Method) -> Response {
    let started = Instant::now();
    let span = tracing::debug_span!("counter_request", method = %method);
    let res = span.in_scope(|| dispatch(&state, &method));

    let outcome = match &res {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    state
        .metrics()
        .observe_request(method_label(&method), outcome, started.elapsed());

    res.into_response()
}

fn dispatch(state: &AppState, method: &Method) -> Result<Response, ApiError> {
    let counter = state.counter();
    match *method {
        Method::GET => encode(StatusCode::OK, counter.get()),
        Method::POST => {
            let v = counter.increment()?;
            encode(StatusCode::CREATED, v)
        }
        Method::DELETE => {
            let v = counter.decrement()?;
            encode(StatusCode::OK, v)
        }
        _ => Err(CounterError::MethodNotSupported(method.to_string()).into()),
    }
}

/// Serialize after the transition has committed. A failure here is reported
/// as a 500 and never replayed against the counter.
fn encode(status: StatusCode, counter: u64) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(&CounterRsp { counter }).map_err(|e| {
        CounterError::Internal(format!("unable to encode counter response: {e}"))
    })?;
    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}

// Arbitrary extension verbs collapse into one series.
fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::DELETE => "DELETE",
        _ => "other",
    }
}
