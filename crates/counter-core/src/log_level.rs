//! Log-level directive check shared by `counter-server` and `counterctl`.

use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::error::{CounterError, Result};

/// Reject a single bare word that is not a level name.
///
/// `EnvFilter` reads an unknown bare word (`verbose`) as a target and mutes
/// everything else; full directives (`info,counter_core=trace`) pass through
/// for `EnvFilter` to parse.
pub fn check_directive(directive: &str) -> Result<()> {
    let directive = directive.trim();
    if directive.contains(['=', ',']) {
        return Ok(());
    }
    LevelFilter::from_str(directive)
        .map(|_| ())
        .map_err(|e| CounterError::BadRequest(format!("invalid log level {directive:?}: {e}")))
}
