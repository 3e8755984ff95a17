//! Route planning over a loaded [`Network`].
//!
//! This is the entry point front-ends use: it resolves user-supplied node
//! names, merges per-request fuel overrides into the network defaults, and
//! runs [`find_path`].
//!
//! # Example
//!
//! ```
//! use fuelpath_lib::{plan_route, Network, RouteRequest};
//!
//! let network = Network::sample()?;
//! let plan = plan_route(&network, &RouteRequest::new("A", "B"))?;
//! assert!(plan.is_found());
//! assert_eq!(plan.hop_count(), 1);
//! # Ok::<(), fuelpath_lib::Error>(())
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::fuel::FuelConfig;
use crate::graph::{Graph, NodeId};
use crate::network::Network;
use crate::path::{find_path, SearchOutcome};

/// Per-request adjustments to the network's fuel configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption_per_unit: Option<f64>,
    /// Replaces the network's refuel set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refuel_nodes: Option<Vec<String>>,
}

impl FuelOverrides {
    /// Merge these overrides into `base`, resolving refuel node names against `graph`.
    pub fn apply(&self, base: &FuelConfig, graph: &Graph) -> Result<FuelConfig> {
        let mut fuel = base.clone();
        if let Some(capacity) = self.capacity {
            fuel.capacity = capacity;
        }
        if let Some(consumption) = self.consumption_per_unit {
            fuel.consumption_per_unit = consumption;
        }
        if let Some(names) = &self.refuel_nodes {
            fuel.refuel_nodes = names
                .iter()
                .map(|name| graph.resolve(name))
                .collect::<Result<BTreeSet<NodeId>>>()?;
        }
        fuel.validate()?;
        Ok(fuel)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub fuel: FuelOverrides,
}

impl RouteRequest {
    /// Request a route using the network's own fuel configuration.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            fuel: FuelOverrides::default(),
        }
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.fuel.capacity = Some(capacity);
        self
    }

    pub fn with_consumption(mut self, consumption_per_unit: f64) -> Self {
        self.fuel.consumption_per_unit = Some(consumption_per_unit);
        self
    }

    pub fn with_refuel_nodes<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fuel.refuel_nodes = Some(nodes.into_iter().map(Into::into).collect());
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub start: NodeId,
    pub goal: NodeId,
    /// Fuel configuration the search actually ran with.
    pub fuel: FuelConfig,
    pub outcome: SearchOutcome,
}

impl RoutePlan {
    pub fn is_found(&self) -> bool {
        self.outcome.is_found()
    }

    /// Number of hops in the route; zero when no route exists.
    pub fn hop_count(&self) -> usize {
        self.outcome.path().map_or(0, |path| path.hop_count())
    }
}

/// Compute a fuel-feasible route for the request.
///
/// Unknown node names are errors (with suggestions); an unreachable goal is
/// not, and is reported as [`SearchOutcome::NoPath`] inside the plan.
pub fn plan_route(network: &Network, request: &RouteRequest) -> Result<RoutePlan> {
    let graph = network.graph();
    let start = graph.resolve(&request.start)?;
    let goal = graph.resolve(&request.goal)?;
    let fuel = request.fuel.apply(network.fuel(), graph)?;

    let outcome = find_path(graph, start.as_str(), goal.as_str(), &fuel)?;
    debug!(
        %start,
        %goal,
        capacity = fuel.capacity,
        consumption = fuel.consumption_per_unit,
        found = outcome.is_found(),
        "route planned"
    );

    Ok(RoutePlan {
        start,
        goal,
        fuel,
        outcome,
    })
}
