// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use avalanche_stats_server::{api::router, config::Config, logging, state::AppState};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Time given to in-flight requests once shutdown starts.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_format);

    if config.rpc_url.is_none() {
        tracing::warn!("AVALANCHE_RPC not configured, RPC-backed endpoints will fail");
    }

    let addr = config.bind_addr;
    let shutdown = CancellationToken::new();

    let state = match AppState::from_config(config, shutdown.clone()) {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to initialize upstream clients");
            std::process::exit(1);
        }
    };
    info!(
        rpc = state.rpc.is_some(),
        indexer = state.glacier.is_some(),
        source = ?state.config.network_stats_source,
        "Upstream clients initialized"
    );

    let app = router(state);

    let handle = axum_server::Handle::new();
    tokio::spawn(shutdown_signal(handle.clone(), shutdown.clone()));

    info!("Avalanche stats server listening on http://{addr} (docs at /docs)");

    if let Err(e) = axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
    {
        error!(error = %e, "HTTP server failed");
        shutdown.cancel();
        std::process::exit(1);
    }

    info!("Server stopped");
}

/// Wait for Ctrl+C or SIGTERM, then stop background tasks and drain
/// in-flight requests.
async fn shutdown_signal(handle: axum_server::Handle<std::net::SocketAddr>, shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
    shutdown.cancel();
    handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
}
