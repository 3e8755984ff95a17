use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the fuelpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an operation references a node that is not part of the graph.
    #[error("unknown node: {id}{}", format_suggestions(.suggestions))]
    UnknownNode {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when a node identifier is registered twice.
    #[error("duplicate node identifier: {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when an edge weight is negative or not finite.
    #[error("invalid weight {weight} for edge {from} <-> {to}")]
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// Raised when the fuel tunables cannot be used for a search.
    #[error("invalid fuel configuration: {message}")]
    InvalidFuelConfig { message: String },

    /// Raised when the predecessor walk cannot reach the start of a route.
    #[error("cannot reconstruct path through {node}: no predecessor recorded")]
    PathReconstruction { node: NodeId },

    /// Raised when consecutive route steps are not joined by an edge.
    #[error("no edge between {from} and {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    /// Network definition file could not be located.
    #[error("network definition not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for network configuration")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::UnknownNode`] without suggestions.
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Error::UnknownNode {
            id: id.into(),
            suggestions: Vec::new(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
