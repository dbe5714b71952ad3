//! Client-side error surface.

use counter_core::Boundary;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid host: {0:?}")]
    InvalidHost(String),

    #[error("unable to {op} counter: {source}")]
    Request {
        op: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("not expected response code on {op}: {status}")]
    UnexpectedStatus { op: &'static str, status: u16 },

    #[error("unable to decode counter: {0}")]
    Decode(#[from] serde_json::Error),

    /// 422 from the server: the counter sits at the bound this call pushes against.
    #[error(transparent)]
    Boundary(#[from] Boundary),
}

impl ClientError {
    /// True for the informational at-maximum / at-minimum outcome.
    pub fn is_boundary(&self) -> bool {
        matches!(self, ClientError::Boundary(_))
    }
}
