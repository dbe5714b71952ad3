//! Async HTTP client for `/api/v1/counter`.
//!
//! 2xx bodies are parsed as `{"counter": n}`. A 422 on increment/decrement
//! comes back as `ClientError::Boundary`, any other status as
//! `ClientError::UnexpectedStatus`. Nothing is retried.

use std::time::Duration;

use counter_core::{counter_path, Boundary, CounterRsp};
use reqwest::{Method, StatusCode};

use crate::error::ClientError;

type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct CounterClient {
    url: String,
    http: reqwest::Client,
    timeout: Option<Duration>,
}

impl CounterClient {
    /// `host` is `host:port`, optionally prefixed with `http://` or `https://`
    /// (TLS via rustls).
    pub fn new(host: &str) -> Result<Self> {
        let trimmed = host.trim();
        let (scheme, authority) = if let Some(rest) = trimmed.strip_prefix("http://") {
            ("http", rest)
        } else if let Some(rest) = trimmed.strip_prefix("https://") {
            ("https", rest)
        } else {
            ("http", trimmed)
        };
        let authority = authority.trim_end_matches('/');
        if authority.is_empty() || authority.contains(char::is_whitespace) {
            return Err(ClientError::InvalidHost(host.to_string()));
        }

        Ok(Self {
            url: format!("{scheme}://{authority}{}", counter_path()),
            http: reqwest::Client::new(),
            timeout: None,
        })
    }

    /// Bound every request by `timeout`, on top of whatever the underlying
    /// `reqwest::Client` enforces. Independent of `with_http_client` order.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<u64> {
        self.call(Method::GET, "get", None).await
    }

    pub async fn increment(&self) -> Result<u64> {
        tracing::debug!("incrementing counter value");
        self.call(Method::POST, "post", Some(Boundary::AtMaximum)).await
    }

    pub async fn decrement(&self) -> Result<u64> {
        tracing::debug!("decrementing counter value");
        self.call(Method::DELETE, "delete", Some(Boundary::AtMinimum)).await
    }

    async fn call(&self, method: Method, op: &'static str, boundary: Option<Boundary>) -> Result<u64> {
        let mut req = self.http.request(method, &self.url);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let rsp = req
            .send()
            .await
            .map_err(|source| ClientError::Request { op, source })?;

        let status = rsp.status();
        if let (StatusCode::UNPROCESSABLE_ENTITY, Some(b)) = (status, boundary) {
            let body = rsp.text().await.unwrap_or_default();
            tracing::debug!(%body, "server rejected at boundary");
            return Err(ClientError::Boundary(b));
        }
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                op,
                status: status.as_u16(),
            });
        }

        let bytes = rsp
            .bytes()
            .await
            .map_err(|source| ClientError::Request { op, source })?;
        let body: CounterRsp = serde_json::from_slice(&bytes)?;
        Ok(body.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_versioned_url() {
        let c = CounterClient::new("localhost:8080").unwrap();
        assert_eq!(c.url(), "http://localhost:8080/api/v1/counter");

        let c = CounterClient::new("http://10.0.0.1:9000/").unwrap();
        assert_eq!(c.url(), "http://10.0.0.1:9000/api/v1/counter");
    }

    #[test]
    fn keeps_https_scheme() {
        let c = CounterClient::new("https://counter.example:8443").unwrap();
        assert_eq!(c.url(), "https://counter.example:8443/api/v1/counter");
    }

    #[test]
    fn rejects_empty_host() {
        assert!(matches!(CounterClient::new("  "), Err(ClientError::InvalidHost(_))));
        assert!(matches!(CounterClient::new("http://"), Err(ClientError::InvalidHost(_))));
    }
}
