//! Command-line surface of `counter-server`.
//!
//! Precedence: defaults < `--config` file < flags / environment.

use std::path::PathBuf;

use clap::Parser;
use counter_core::error::Result;

use crate::config::{self, LogFormat, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "counter-server",
    about = "counter-server is the server side application holding the value of the counter"
)]
pub struct Cli {
    /// Optional YAML config file.
    #[arg(long, env = "COUNTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Bind address (default 0.0.0.0).
    #[arg(long, env = "COUNTER_BIND_HOST")]
    pub host: Option<String>,

    /// Listening port (default 8080).
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Level or filter directive, e.g. "debug" or "info,counter_core=trace" (default debug).
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format (default json).
    #[arg(long, env = "LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Merge file, flags, and environment into a validated config.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(level) = &self.log_level {
            cfg.log.level = level.clone();
        }
        if let Some(format) = self.log_format {
            cfg.log.format = format;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("counter-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_defaults() {
        let mut cli = parse(&[
            "--host", "127.0.0.1", "--port", "9090", "--log-level", "info", "--log-format", "text",
        ]);
        // No file layer, whatever COUNTER_CONFIG holds in the environment.
        cli.config = None;
        let cfg = cli.resolve().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.log.format, LogFormat::Text);
    }

    #[test]
    fn invalid_values_fail_resolution() {
        let cli = parse(&["--port", "0", "--log-level", "info"]);
        assert!(cli.resolve().is_err());

        let cli = parse(&["--port", "8080", "--log-level", "chatty"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = parse(&[
            "--config", "/nonexistent/counter.yaml", "--port", "8080", "--log-level", "info",
        ]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn rejects_non_numeric_port() {
        let args = ["counter-server", "--port", "eighty"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
