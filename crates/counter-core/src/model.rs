//! Wire model shared by server and client.

use serde::{Deserialize, Serialize};

/// Current version of the HTTP API.
pub const API_VERSION: &str = "v1";

/// JSON body of every successful counter response: `{"counter": <u64>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRsp {
    pub counter: u64,
}

/// Resource path of the counter, e.g. `/api/v1/counter`.
pub fn counter_path() -> String {
    format!("/api/{API_VERSION}/counter")
}
