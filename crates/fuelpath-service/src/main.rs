//! fuelpath route planning HTTP service.
//!
//! # Endpoints
//!
//! - `POST /api/v1/route` - Compute a fuel-feasible route between two nodes
//! - `GET /api/v1/nodes` - List the nodes of the loaded network
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! # Configuration
//!
//! - `FUELPATH_NETWORK` - Network definition (JSON); the bundled sample is served when unset
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use fuelpath_service::{init_logging, router, AppState, LoggingConfig};

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("fuelpath-service");
    init_logging(&logging_config);

    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let state = AppState::load(None).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    info!(
        nodes = state.network().graph().node_count(),
        edges = state.network().graph().edge_count(),
        source = %state
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "bundled sample".to_string()),
        "application state loaded"
    );

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
}
