//! Shared error type across counter crates.

use thiserror::Error;

use crate::counter::Boundary;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Increment at maximum or decrement at minimum.
    AtBoundary,
    /// HTTP verb not mapped to a counter operation.
    MethodNotAllowed,
    /// Invalid input / malformed configuration.
    BadRequest,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::AtBoundary => "AT_BOUNDARY",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Unified error type used by core, server, and client.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error(transparent)]
    Boundary(#[from] Boundary),
    #[error("method {0} is not supported")]
    MethodNotSupported(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CounterError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            CounterError::Boundary(_) => ClientCode::AtBoundary,
            CounterError::MethodNotSupported(_) => ClientCode::MethodNotAllowed,
            CounterError::BadRequest(_) => ClientCode::BadRequest,
            CounterError::Internal(_) => ClientCode::Internal,
        }
    }
}
