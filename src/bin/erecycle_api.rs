//! E-Recycle Scanner API Server
//!
//! Usage:
//!   cargo run --bin erecycle_api
//!
//! Environment:
//!   PORT / ERECYCLE_PORT - Server port (default: 8000)
//!   ERECYCLE_HOST        - Server host (default: 0.0.0.0)
//!   OFF_BASE_URL         - Open Food Facts base URL
//!   OFF_TIMEOUT_SECS     - Lookup timeout (default: 5)
//!   OFF_ENABLED          - Set to false to skip the external lookup
//!   RUST_LOG             - Log level (default: info)

use erecycle_scanner::api::{create_router, AppState};
use erecycle_scanner::utils::constants::{APP_NAME, APP_VERSION};
use erecycle_scanner::{BarcodeResolver, ScannerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = ScannerConfig::from_env()?;
    let resolver = BarcodeResolver::from_config(&config)?;

    let state = Arc::new(AppState::new(resolver));
    let stats = state.stats.clone();

    let app = create_router(state);

    // (host, port) resolves names such as "localhost" and bare IPv6 literals
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;

    info!("{} v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("Endpoints:");
    info!("  POST /scan-barcode  - Resolve barcode to weight and points");
    info!("  GET  /stats         - Scan counters");
    info!("  GET  /health        - Health check");
    if config.external_lookup_enabled {
        info!("Open Food Facts: {} (timeout {:?})", config.off_base_url, config.lookup_timeout);
    } else {
        warn!("Open Food Facts lookup disabled, unknown barcodes use the fallback estimate");
    }

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    let snapshot = stats.snapshot();
    info!("Shutdown signal received");
    info!("   Total scans: {}", snapshot.total_scans);
    info!(
        "   Catalog: {}, External: {}, Fallback: {}, Rejected: {}",
        snapshot.catalog_hits, snapshot.external_hits, snapshot.fallback_estimates, snapshot.rejected
    );
    info!("   Points awarded: {}", snapshot.points_awarded);

    Ok(())
}
