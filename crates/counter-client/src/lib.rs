//! Client side of the counter API: an async HTTP client and the `counterctl`
//! command-line surface built on it.

pub mod cli;
pub mod client;
pub mod error;

pub use client::CounterClient;
pub use error::ClientError;
