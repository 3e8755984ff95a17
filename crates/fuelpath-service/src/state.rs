//! Application state for the HTTP service.
//!
//! Handlers share one immutable [`Network`] through axum's `State` extractor.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fuelpath_lib::{load_network, resolve_network_path, Error as LibError, Network};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The configured network file does not exist.
    NetworkNotFound(String),

    /// The network file exists but could not be loaded.
    NetworkLoad(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkNotFound(path) => write!(f, "network definition not found: {}", path),
            Self::NetworkLoad(e) => write!(f, "failed to load network: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NetworkLoad(e) => Some(e),
            Self::NetworkNotFound(_) => None,
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        match err {
            LibError::NetworkNotFound { path } => Self::NetworkNotFound(path.display().to_string()),
            other => Self::NetworkLoad(other),
        }
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone; the network lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    network: Network,
    source: Option<PathBuf>,
}

impl AppState {
    /// Load the network named by `explicit`, `FUELPATH_NETWORK`, or the user
    /// configuration directory, falling back to the bundled sample.
    pub fn load(explicit: Option<&Path>) -> Result<Self, AppStateError> {
        let Some(path) = resolve_network_path(explicit) else {
            tracing::info!("no network configured, serving bundled sample");
            return Ok(Self::from_network(Network::sample()?));
        };

        tracing::info!(path = %path.display(), "loading network");
        let network = load_network(&path)?;
        tracing::info!(
            nodes = network.graph().node_count(),
            edges = network.graph().edge_count(),
            "network loaded successfully"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                network,
                source: Some(path),
            }),
        })
    }

    /// Wrap an already-built network.
    pub fn from_network(network: Network) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                network,
                source: None,
            }),
        }
    }

    pub fn network(&self) -> &Network {
        &self.inner.network
    }

    /// File the network was loaded from; `None` for the sample or an injected network.
    pub fn source(&self) -> Option<&Path> {
        self.inner.source.as_deref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("node_count", &self.inner.network.graph().node_count())
            .field("source", &self.inner.source)
            .finish()
    }
}
