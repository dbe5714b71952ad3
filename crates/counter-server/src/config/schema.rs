use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use counter_core::error::{CounterError, Result};
use counter_core::log_level;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            log: LogSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CounterError::BadRequest(format!(
                "unsupported config version {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_shutdown_grace_ms")]
    pub shutdown_grace_ms: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_grace_ms: default_shutdown_grace_ms(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(CounterError::BadRequest("server.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(CounterError::BadRequest("server.port must not be 0".into()));
        }
        if self.shutdown_grace_ms > 60_000 {
            return Err(CounterError::BadRequest(
                "server.shutdown_grace_ms must be between 0 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}
fn default_shutdown_grace_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        self.filter().map(|_| ())
    }

    /// Parse `level` as an `EnvFilter` directive (`debug`, `info,counter_core=trace`, ...).
    pub fn filter(&self) -> Result<EnvFilter> {
        let level = self.level.trim();
        log_level::check_directive(level)?;
        EnvFilter::try_new(level).map_err(|e| {
            CounterError::BadRequest(format!("invalid log level {level:?}: {e}"))
        })
    }
}

fn default_log_level() -> String {
    "debug".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = ServerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.shutdown_grace(), Duration::from_secs(5));
        assert_eq!(cfg.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_port_zero() {
        let mut cfg = ServerConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn log_level_must_be_a_level_or_directive() {
        let mut log = LogSection::default();
        for ok in ["debug", "INFO", "off", "warn,counter_core=trace"] {
            log.level = ok.into();
            assert!(log.validate().is_ok(), "{ok}");
        }
        for bad in ["verbose", "counter_core=loud"] {
            log.level = bad.into();
            assert!(log.validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn rejects_long_grace() {
        let mut cfg = ServerConfig::default();
        cfg.server.shutdown_grace_ms = 60_001;
        assert!(cfg.validate().is_err());
    }
}
