//! rtprobe server
//!
//! - Config: first CLI argument, else `RTPROBE_CONFIG`, else `config/config.yml`
//! - `GET /v1/metrics`, `POST /v1/metrics/query`, `/healthz`, `/readyz`
//! - Graceful shutdown on Ctrl-C (readiness flips to draining first)

use rtprobe_core::error::{ProbeError, Result};
use rtprobe_server::{app_state, config, logging, router};

#[tokio::main]
async fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RTPROBE_CONFIG").ok())
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let cfg = config::load_from_file(&path)?;
    logging::init(cfg.production)?;

    let host = cfg.server.host.clone();
    let port = cfg.server.port;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| ProbeError::Internal(format!("bind {host}:{port} failed: {e}")))?;
    tracing::info!(%host, port, config = %path, "rtprobe-server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| ProbeError::Internal(format!("server failed: {e}")))?;

    tracing::info!("rtprobe-server stopped");
    Ok(())
}

async fn shutdown_signal(state: app_state::AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    state.set_draining();
    tracing::info!("shutdown requested, draining");
}
