//! counter-server: one bounded u64 counter over HTTP.
//!
//! - `GET|POST|DELETE /api/v1/counter`
//! - `/healthz`, `/readyz`, `/metrics`

use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use counter_core::error::{CounterError, Result};
use counter_server::{app_state::AppState, cli::Cli, logging, router, server};

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("counter-server: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = cli.resolve()?;
    logging::init(&cfg.log)?;

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port))
        .await
        .map_err(|e| {
            CounterError::Internal(format!(
                "failed to bind {}:{}: {e}",
                cfg.server.host, cfg.server.port
            ))
        })?;

    tracing::info!(host = %cfg.server.host, port = cfg.server.port, "counter-server starting");

    let state = AppState::new();
    server::run(
        listener,
        router::build_router(state.clone()),
        state,
        cfg.server.shutdown_grace(),
        server::shutdown_signal(),
    )
    .await
}
