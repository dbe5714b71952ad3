//! `counterctl` command-line surface.

use std::time::Duration;

use clap::{Parser, Subcommand};
use counter_core::log_level;
use tracing_subscriber::EnvFilter;

use crate::{client::CounterClient, error::ClientError};

#[derive(Debug, Parser)]
#[command(
    name = "counterctl",
    about = "counterctl is a client side application calling the counter server"
)]
pub struct Cli {
    /// Counter server address.
    #[arg(long, env = "COUNTER_HOST", default_value = "localhost:8080")]
    pub host: String,

    /// Level or filter directive.
    #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
    pub log_level: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "COUNTER_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Get the counter value.
    #[command(alias = "g")]
    Get,
    /// Increment the counter.
    #[command(alias = "i")]
    Increment,
    /// Decrement the counter.
    #[command(alias = "d")]
    Decrement,
}

impl Cli {
    /// Same rules as the server: a bare word must be a level name.
    pub fn filter(&self) -> Result<EnvFilter, String> {
        let level = self.log_level.trim();
        log_level::check_directive(level).map_err(|e| e.to_string())?;
        EnvFilter::try_new(level).map_err(|e| format!("invalid log level {level:?}: {e}"))
    }

    pub fn client(&self) -> Result<CounterClient, ClientError> {
        Ok(CounterClient::new(&self.host)?.with_timeout(Duration::from_millis(self.timeout_ms)))
    }
}

/// Execute one subcommand.
///
/// Returns `Ok(Some(value))` on success and `Ok(None)` when the server
/// refused at a bound; every other failure is an error.
pub async fn execute(client: &CounterClient, command: Command) -> Result<Option<u64>, ClientError> {
    let res = match command {
        Command::Get => client.get().await,
        Command::Increment => client.increment().await,
        Command::Decrement => client.decrement().await,
    };
    match res {
        Ok(value) => {
            tracing::info!(counter = value, "counter value is {value}");
            Ok(Some(value))
        }
        Err(ClientError::Boundary(b)) => {
            tracing::info!(reason = %b, "counter left unchanged");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
