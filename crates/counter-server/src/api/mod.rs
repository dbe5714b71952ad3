//! Counter HTTP API and its error rendering.

pub mod counter;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use counter_core::{Boundary, CounterError};

/// Body returned for internal faults; details stay in the server log.
pub const INTERNAL_ERROR_BODY: &str = "something went wrong";

/// HTTP rendering of [`CounterError`].
#[derive(Debug)]
pub struct ApiError(pub CounterError);

impl ApiError {
    /// Metrics label for the outcome this error represents.
    pub fn outcome(&self) -> &'static str {
        match &self.0 {
            CounterError::Boundary(b) => b.as_label(),
            CounterError::MethodNotSupported(_) => "unsupported",
            CounterError::BadRequest(_) => "bad_request",
            CounterError::Internal(_) => "internal",
        }
    }
}

impl From<CounterError> for ApiError {
    fn from(e: CounterError) -> Self {
        Self(e)
    }
}

impl From<Boundary> for ApiError {
    fn from(b: Boundary) -> Self {
        Self(CounterError::Boundary(b))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CounterError::Boundary(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CounterError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
            CounterError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CounterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self.0 {
            CounterError::Internal(detail) => {
                tracing::error!(%detail, "counter request failed");
                INTERNAL_ERROR_BODY.to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
