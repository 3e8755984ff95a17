//! fuelpath library entry points.
//!
//! This crate models a road network as an undirected weighted graph, and
//! finds minimum-distance routes for a traveller whose fuel tank only refills
//! at designated nodes. Higher-level consumers (CLI, HTTP service) should only
//! depend on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod fuel;
pub mod graph;
pub mod heuristic;
pub mod network;
pub mod output;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use fuel::{project_fuel, FuelConfig, FuelProjection};
pub use graph::{Edge, Graph, NodeId, Position};
pub use heuristic::heuristic;
pub use network::{
    load_network, load_network_or_sample, resolve_network_path, Network, NetworkDefinition,
};
pub use output::{RouteRenderMode, RouteStatus, RouteStep, RouteSummary};
pub use path::{find_path, reconstruct_path, FuelPath, SearchOutcome};
pub use routing::{plan_route, FuelOverrides, RoutePlan, RouteRequest};
