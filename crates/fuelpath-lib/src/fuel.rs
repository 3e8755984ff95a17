//! Fuel tunables and per-hop fuel projection.
//!
//! A traveller starts with a full tank, spends `weight × consumption_per_unit`
//! on every edge, and is topped back up to capacity on arrival at a refuel
//! node, before departing along the next edge.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// Tank size used when a network does not configure one.
pub const DEFAULT_FUEL_CAPACITY: f64 = 15.0;

/// Fuel spent per unit of distance when a network does not configure it.
pub const DEFAULT_CONSUMPTION_PER_UNIT: f64 = 0.25;

/// Fuel calculation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelConfig {
    /// Maximum fuel carried at once. May be `f64::INFINITY` for an unconstrained search.
    pub capacity: f64,
    /// Fuel spent per unit of edge weight.
    pub consumption_per_unit: f64,
    /// Nodes where the tank is refilled on arrival.
    #[serde(default)]
    pub refuel_nodes: BTreeSet<NodeId>,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_FUEL_CAPACITY,
            consumption_per_unit: DEFAULT_CONSUMPTION_PER_UNIT,
            refuel_nodes: BTreeSet::new(),
        }
    }
}

impl FuelConfig {
    pub fn new(capacity: f64, consumption_per_unit: f64) -> Self {
        Self {
            capacity,
            consumption_per_unit,
            refuel_nodes: BTreeSet::new(),
        }
    }

    /// Add refuel nodes to the configuration.
    pub fn with_refuel_nodes<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        self.refuel_nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Validate the fuel configuration.
    pub fn validate(&self) -> Result<()> {
        if self.capacity.is_nan() || self.capacity < 0.0 {
            return Err(Error::InvalidFuelConfig {
                message: format!(
                    "capacity must be a non-negative number, got {}",
                    self.capacity
                ),
            });
        }

        if !self.consumption_per_unit.is_finite() || self.consumption_per_unit < 0.0 {
            return Err(Error::InvalidFuelConfig {
                message: format!(
                    "consumption_per_unit must be a finite non-negative number, got {}",
                    self.consumption_per_unit
                ),
            });
        }

        Ok(())
    }

    /// Ensure every refuel node exists in `graph`.
    pub fn validate_against(&self, graph: &Graph) -> Result<()> {
        self.validate()?;
        for node in &self.refuel_nodes {
            graph.resolve(node.as_str())?;
        }
        Ok(())
    }

    /// Fuel spent travelling along an edge of the given weight.
    pub fn fuel_needed(&self, weight: f64) -> f64 {
        weight * self.consumption_per_unit
    }

    pub fn is_refuel_node(&self, node: &str) -> bool {
        self.refuel_nodes.contains(node)
    }
}

/// Fuel projection for a single hop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelProjection {
    /// Fuel units consumed for this hop.
    pub hop_cost: f64,
    /// Cumulative fuel consumed up to and including this hop.
    pub cumulative: f64,
    /// Fuel remaining on arrival; `None` when the tank is unlimited.
    pub remaining: Option<f64>,
    /// Whether the tank was refilled before departing on this hop.
    pub refueled: bool,
}

/// Project fuel consumption along a route, one entry per hop.
///
/// `steps` must be contiguous in `graph`; a missing edge is reported as
/// [`Error::MissingEdge`].
///
/// # Examples
/// ```
/// use fuelpath_lib::{project_fuel, FuelConfig, Graph, Position};
///
/// let mut graph = Graph::new();
/// graph.add_node("X", Position::new(0.0, 0.0)).unwrap();
/// graph.add_node("Y", Position::new(4.0, 0.0)).unwrap();
/// graph.add_edge("X", "Y", 4.0).unwrap();
///
/// let steps = vec!["X".into(), "Y".into()];
/// let hops = project_fuel(&graph, &steps, &FuelConfig::new(5.0, 1.0)).unwrap();
/// assert_eq!(hops[0].hop_cost, 4.0);
/// assert_eq!(hops[0].remaining, Some(1.0));
/// ```
pub fn project_fuel(
    graph: &Graph,
    steps: &[NodeId],
    config: &FuelConfig,
) -> Result<Vec<FuelProjection>> {
    let mut remaining = config.capacity;
    let mut cumulative = 0.0;
    let mut projections = Vec::with_capacity(steps.len().saturating_sub(1));

    for pair in steps.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        let weight = graph
            .edge_weight(from.as_str(), to.as_str())
            .ok_or_else(|| Error::MissingEdge {
                from: from.clone(),
                to: to.clone(),
            })?;

        let refueled = config.is_refuel_node(from.as_str());
        if refueled {
            remaining = config.capacity;
        }

        let hop_cost = config.fuel_needed(weight);
        remaining -= hop_cost;
        cumulative += hop_cost;

        projections.push(FuelProjection {
            hop_cost,
            cumulative,
            remaining: Some(remaining).filter(|r| r.is_finite()),
            refueled,
        });
    }

    Ok(projections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    fn line() -> Graph {
        let mut graph = Graph::new();
        graph.add_node("X", Position::new(0.0, 0.0)).unwrap();
        graph.add_node("Y", Position::new(10.0, 0.0)).unwrap();
        graph.add_node("Z", Position::new(20.0, 0.0)).unwrap();
        graph.add_edge("X", "Y", 10.0).unwrap();
        graph.add_edge("Y", "Z", 10.0).unwrap();
        graph
    }

    #[test]
    fn default_config_is_valid() {
        let config = FuelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.capacity, DEFAULT_FUEL_CAPACITY);
        assert_eq!(config.consumption_per_unit, DEFAULT_CONSUMPTION_PER_UNIT);
    }

    #[test]
    fn infinite_capacity_is_allowed() {
        assert!(FuelConfig::new(f64::INFINITY, 1.0).validate().is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        for config in [
            FuelConfig::new(-1.0, 1.0),
            FuelConfig::new(f64::NAN, 1.0),
            FuelConfig::new(10.0, -0.5),
            FuelConfig::new(10.0, f64::INFINITY),
        ] {
            assert!(
                matches!(config.validate(), Err(Error::InvalidFuelConfig { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_refuel_node_is_rejected() {
        let config = FuelConfig::new(10.0, 1.0).with_refuel_nodes(["Q"]);
        assert!(matches!(
            config.validate_against(&line()),
            Err(Error::UnknownNode { .. })
        ));
    }

    #[test]
    fn projection_refills_at_refuel_nodes() {
        let graph = line();
        let config = FuelConfig::new(10.0, 1.0).with_refuel_nodes(["Y"]);
        let steps: Vec<NodeId> = vec!["X".into(), "Y".into(), "Z".into()];

        let hops = project_fuel(&graph, &steps, &config).unwrap();
        assert_eq!(hops.len(), 2);
        assert!(!hops[0].refueled);
        assert_eq!(hops[0].remaining, Some(0.0));
        assert!(hops[1].refueled);
        assert_eq!(hops[1].remaining, Some(0.0));
        assert_eq!(hops[1].cumulative, 20.0);
    }

    #[test]
    fn projection_rejects_non_contiguous_routes() {
        let graph = line();
        let steps: Vec<NodeId> = vec!["X".into(), "Z".into()];
        assert!(matches!(
            project_fuel(&graph, &steps, &FuelConfig::default()),
            Err(Error::MissingEdge { .. })
        ));
    }

    #[test]
    fn single_node_route_has_no_hops() {
        let steps: Vec<NodeId> = vec!["X".into()];
        assert!(project_fuel(&line(), &steps, &FuelConfig::default())
            .unwrap()
            .is_empty());
    }
}
