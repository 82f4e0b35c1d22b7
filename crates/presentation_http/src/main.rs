//! Trekroute HTTP Server
//!
//! Main entry point for the routing proxy.

use std::{sync::Arc, time::Duration};

use application::RoutingService;
use infrastructure::{AppConfig, DEFAULT_LOG_FILTER, OtpPlannerAdapter, init_tracing};
use presentation_http::{AppState, create_router, with_middleware};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Tracing needs the log format, so load configuration first
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(config.server.log_format, DEFAULT_LOG_FILTER)?;

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Trekroute starting");
    info!(
        host = %config.server.host,
        port = config.server.port,
        otp = %config.otp.base_url,
        router = %config.otp.router_id,
        timezone = %config.routing.timezone,
        "Configuration loaded"
    );

    let planner = OtpPlannerAdapter::from_config(&config.otp)
        .map_err(|e| anyhow::anyhow!("Failed to initialize planner client: {e}"))?
        .with_retry(config.retry_config());

    let routing_service = RoutingService::new(Arc::new(planner), config.routing_settings());
    let app = with_middleware(
        create_router(AppState::new(routing_service)),
        &config.server,
    );

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown = Arc::new(Notify::new());
    let serve = axum::serve(listener, app).with_graceful_shutdown({
        let shutdown = Arc::clone(&shutdown);
        async move {
            shutdown_signal().await;
            shutdown.notify_one();
        }
    });
    let mut server = tokio::spawn(async move { serve.await });

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        () = shutdown.notified() => {}
    }

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    info!("Waiting up to {:?} for connections to close...", timeout);
    match tokio::time::timeout(timeout, server).await {
        Ok(result) => result??,
        Err(_) => warn!("Graceful shutdown timed out, exiting"),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
