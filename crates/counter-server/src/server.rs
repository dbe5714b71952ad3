//! Serve loop with draining and a bounded shutdown grace.
//!
//! `app` is normally `router::build_router(state.clone())`; `state` is the
//! handle that gets marked draining.
//!
//! Once `shutdown` resolves the state is marked draining (`/readyz` -> 503)
//! and axum stops accepting. In-flight requests get `grace` to finish before
//! the loop returns anyway.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use counter_core::error::{CounterError, Result};

use crate::app_state::AppState;

pub async fn run<F>(
    listener: TcpListener,
    app: Router,
    state: AppState,
    grace: Duration,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let started = Arc::new(Notify::new());

    let signal = {
        let state = state.clone();
        let started = Arc::clone(&started);
        async move {
            shutdown.await;
            state.set_draining();
            let grace_ms = u64::try_from(grace.as_millis()).unwrap_or(u64::MAX);
            tracing::info!(grace_ms, "shutdown requested, draining");
            started.notify_one();
        }
    };

    let mut serve = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
    });

    tokio::select! {
        joined = &mut serve => return flatten(joined),
        _ = started.notified() => {}
    }

    match tokio::time::timeout(grace, &mut serve).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!("shutdown grace elapsed, abandoning in-flight requests");
            serve.abort();
            Ok(())
        }
    }
}

fn flatten(joined: std::result::Result<std::io::Result<()>, tokio::task::JoinError>) -> Result<()> {
    match joined {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CounterError::Internal(format!("server failed: {e}"))),
        Err(e) => Err(CounterError::Internal(format!("server task failed: {e}"))),
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
