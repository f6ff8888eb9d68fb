//! Scam Sentry API Server
//!
//! REST API for fraud-message risk analysis
//!
//! Usage:
//!   cargo run --bin scam_sentry_api
//!
//! Environment:
//!   SCAM_SENTRY_PORT / PORT         - Server port (default: 8080)
//!   SCAM_SENTRY_HOST                - Server host (default: 0.0.0.0)
//!   SCAM_SENTRY_MAX_TEXT_BYTES      - Max text size (default: 10000)
//!   SCAM_SENTRY_MAX_BATCH           - Max batch size (default: 100)
//!   SCAM_SENTRY_RATE_LIMIT          - Requests per minute (default: 100)
//!   SCAM_SENTRY_ANALYSIS_DELAY_MS   - Artificial delay per analysis (default: 0)
//!   SCAM_SENTRY_TELEMETRY_DIR       - Export directory (default: ./telemetry)
//!   RUST_LOG                        - Log level (default: info)

use scam_sentry::api::{create_router, handlers::AppState, start_cleanup_task, RATE_LIMITER};
use scam_sentry::utils::constants::{APP_NAME, APP_VERSION};
use scam_sentry::{ServerConfig, TelemetryCollector};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = ServerConfig::from_env()?;

    let telemetry = Arc::new(TelemetryCollector::with_config(
        config.telemetry_dir.clone(),
        1000,
    ));
    let telemetry_for_shutdown = telemetry.clone();

    RATE_LIMITER.set_requests_per_window(config.rate_limit_per_minute);
    start_cleanup_task();
    info!("Background cleanup task started");

    let addr: SocketAddr = config.bind_addr().parse()?;
    let state = Arc::new(AppState::new(telemetry, config));
    let app = create_router(state);

    info!("{} API v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("Endpoints:");
    info!("  POST /v1/analyze/text    - Score one message");
    info!("  POST /v1/analyze/batch   - Score many messages");
    info!("  GET  /v1/samples         - Built-in sample scams");
    info!("  GET  /v1/stats           - Analysis statistics");
    info!("  GET  /v1/health          - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown signal received, cleaning up...");

    let stats = telemetry_for_shutdown.get_stats();
    info!("{}", stats.summary());

    match telemetry_for_shutdown.flush() {
        Ok(n) if n > 0 => info!(events = n, "Threat events flushed"),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Failed to flush events"),
    }

    match telemetry_for_shutdown.export_stats_json() {
        Ok(path) => info!("Stats exported to: {}", path.display()),
        Err(e) => warn!("Failed to export stats: {}", e),
    }

    match telemetry_for_shutdown.export_stats_csv() {
        Ok(path) => info!("Stats history appended to: {}", path.display()),
        Err(e) => warn!("Failed to append stats history: {}", e),
    }

    info!("{} API shutdown complete", APP_NAME);

    Ok(())
}
