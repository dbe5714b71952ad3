//! Global `tracing` subscriber setup.

use counter_core::error::{CounterError, Result};
use tracing_subscriber::fmt;

use crate::config::{LogFormat, LogSection};

/// Install the process-wide subscriber. Fails if one is already installed.
pub fn init(log: &LogSection) -> Result<()> {
    let builder = fmt().with_env_filter(log.filter()?);
    let res = match log.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    res.map_err(|e| CounterError::Internal(format!("install tracing subscriber failed: {e}")))
}
