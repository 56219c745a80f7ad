//! factorium gateway
//!
//! - `GET /factorial?number=...` : exact factorial after a simulated delay
//! - `GET /metrics`              : request/exception counters, latency histogram
//!
//! Config is read from `factorium.yaml` (or `$FACTORIUM_CONFIG`); a missing
//! file means defaults.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use factorium_core::error::{FactoError, Result};
use factorium_gateway::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "factorium.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "factorium-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path =
        std::env::var("FACTORIUM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path)?;
    let listen = cfg.server.listen_addr()?;
    let delay_ms = cfg.factorial.delay_ms;
    let max_number = cfg.factorial.max_number;

    let state = app_state::AppState::new(&cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, delay_ms, max_number, "factorium-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| FactoError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| FactoError::Internal(format!("server failed: {e}")))?;

    tracing::info!("factorium-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
}
