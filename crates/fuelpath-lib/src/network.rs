//! Loading road networks from JSON definitions.
//!
//! A network definition lists nodes with planar positions, undirected weighted
//! edges, and optionally the fuel tunables used when a request does not
//! override them:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "A", "x": 0, "y": 0 }, { "id": "B", "x": 2, "y": 2 }],
//!   "edges": [{ "from": "A", "to": "B", "weight": 30 }],
//!   "fuel": { "capacity": 15, "consumption_per_unit": 0.25, "refuel_nodes": ["B"] }
//! }
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::fuel::FuelConfig;
use crate::graph::{Graph, Position};
use crate::heuristic::inadmissible_edges;

/// Environment variable naming the network definition to load.
pub const NETWORK_ENV_VAR: &str = "FUELPATH_NETWORK";

/// Filename looked up in the user's configuration directory.
const NETWORK_FILENAME: &str = "network.json";

/// Eleven-node city network with two fuel bunks, bundled with the library.
const SAMPLE_NETWORK: &str = include_str!("../data/city_network.json");

/// Serialized form of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDefinition {
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// Immutable graph plus the fuel configuration it was published with.
#[derive(Debug, Clone)]
pub struct Network {
    graph: Graph,
    fuel: FuelConfig,
}

impl Network {
    /// Pair a graph with its default fuel configuration.
    pub fn new(graph: Graph, fuel: FuelConfig) -> Result<Self> {
        fuel.validate_against(&graph)?;

        let offending = inadmissible_edges(&graph);
        for (from, to, weight, straight) in &offending {
            debug!(%from, %to, weight, straight, "edge shorter than straight-line distance");
        }
        if !offending.is_empty() {
            warn!(
                edges = offending.len(),
                "network has edges shorter than the straight-line distance; routes may not be optimal"
            );
        }

        Ok(Self { graph, fuel })
    }

    /// Build a network from its definition.
    ///
    /// Construction is all-or-nothing: the first invalid node, edge, or refuel
    /// identifier aborts and no network is returned.
    pub fn from_definition(definition: &NetworkDefinition) -> Result<Self> {
        let mut graph = Graph::new();
        for node in &definition.nodes {
            graph.add_node(node.id.as_str(), Position::new(node.x, node.y))?;
        }
        for edge in &definition.edges {
            graph.add_edge(&edge.from, &edge.to, edge.weight)?;
        }

        let fuel = definition.fuel.clone().unwrap_or_default();
        Self::new(graph, fuel)
    }

    /// Parse a JSON definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definition: NetworkDefinition = serde_json::from_str(json)?;
        Self::from_definition(&definition)
    }

    /// The bundled city network: nodes `A` through `K` with fuel bunks
    /// `G_Bunk` and `H_Bunk`, capacity 15 and consumption 0.25 per unit.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_NETWORK)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Fuel configuration used when a request does not override it.
    pub fn fuel(&self) -> &FuelConfig {
        &self.fuel
    }

    /// Serialize back into a definition (nodes and edges in insertion order).
    pub fn to_definition(&self) -> NetworkDefinition {
        let nodes = self
            .graph
            .nodes()
            .map(|(id, position)| NodeSpec {
                id: id.to_string(),
                x: position.x,
                y: position.y,
            })
            .collect();

        let mut edges = Vec::new();
        for (id, _) in self.graph.nodes() {
            let Ok(neighbours) = self.graph.neighbours(id.as_str()) else {
                continue;
            };
            for edge in neighbours.iter().filter(|edge| edge.target >= *id) {
                edges.push(EdgeSpec {
                    from: id.to_string(),
                    to: edge.target.to_string(),
                    weight: edge.weight,
                });
            }
        }

        NetworkDefinition {
            nodes,
            edges,
            fuel: Some(self.fuel.clone()),
        }
    }
}

/// Load a network definition from a JSON file.
pub fn load_network(path: &Path) -> Result<Network> {
    if !path.exists() {
        return Err(Error::NetworkNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let network = Network::from_json_str(&contents)?;
    info!(
        path = %path.display(),
        nodes = network.graph.node_count(),
        edges = network.graph.edge_count(),
        refuel_nodes = network.fuel.refuel_nodes.len(),
        "loaded network definition"
    );
    Ok(network)
}

/// Location of the per-user network definition.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "fuelpath", "fuelpath").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.config_dir().join(NETWORK_FILENAME))
}

/// Decide which network file to load.
///
/// Resolution order: the explicit path, then `FUELPATH_NETWORK`, then
/// `network.json` in the user's configuration directory if it exists.
/// `None` means the bundled sample network should be used.
pub fn resolve_network_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(value) = env::var(NETWORK_ENV_VAR) {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value));
        }
    }

    match default_network_path() {
        Ok(path) if path.exists() => Some(path),
        Ok(path) => {
            debug!(path = %path.display(), "no user network definition");
            None
        }
        Err(err) => {
            debug!(error = %err, "unable to resolve user configuration directory");
            None
        }
    }
}

/// Load the network named by [`resolve_network_path`], falling back to the sample.
pub fn load_network_or_sample(explicit: Option<&Path>) -> Result<Network> {
    match resolve_network_path(explicit) {
        Some(path) => load_network(&path),
        None => {
            info!("using bundled sample network");
            Network::sample()
        }
    }
}
