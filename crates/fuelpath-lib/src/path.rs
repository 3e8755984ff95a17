use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fuel::FuelConfig;
use crate::graph::{Graph, NodeId};
use crate::heuristic::heuristic;

/// Route found by [`find_path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelPath {
    /// Ordered node sequence from start to goal, both inclusive.
    pub steps: Vec<NodeId>,
    /// Sum of the traversed edge weights.
    pub total_distance: f64,
    /// Capacity minus fuel remaining on arrival at the goal.
    pub fuel_consumed: f64,
}

impl FuelPath {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Result of a fuel-constrained search.
///
/// `NoPath` is a regular outcome: the goal is unreachable within the fuel and
/// connectivity constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(FuelPath),
    NoPath,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn path(&self) -> Option<&FuelPath> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }

    pub fn into_path(self) -> Option<FuelPath> {
        match self {
            SearchOutcome::Found(path) => Some(path),
            SearchOutcome::NoPath => None,
        }
    }

    /// Route length, or `f64::INFINITY` when no route exists.
    pub fn total_distance(&self) -> f64 {
        self.path()
            .map(|path| path.total_distance)
            .unwrap_or(f64::INFINITY)
    }

    /// Fuel consumed, or `0.0` when no route exists.
    pub fn fuel_consumed(&self) -> f64 {
        self.path().map(|path| path.fuel_consumed).unwrap_or(0.0)
    }
}

/// Find the cheapest route from `start` to `goal` that never runs the tank dry.
///
/// Runs A* over (node, remaining fuel) states with a Euclidean heuristic. A
/// node is finalized the first time it is popped from the frontier and is not
/// reopened, even if a later arrival would carry more fuel. The tank is
/// refilled to capacity when departing from any node in
/// [`FuelConfig::refuel_nodes`].
///
/// # Examples
/// ```
/// use fuelpath_lib::{find_path, FuelConfig, Graph, Position};
///
/// let mut graph = Graph::new();
/// graph.add_node("X", Position::new(0.0, 0.0)).unwrap();
/// graph.add_node("Y", Position::new(4.0, 0.0)).unwrap();
/// graph.add_edge("X", "Y", 4.0).unwrap();
///
/// let outcome = find_path(&graph, "X", "Y", &FuelConfig::new(5.0, 1.0)).unwrap();
/// let path = outcome.path().unwrap();
/// assert_eq!(path.total_distance, 4.0);
/// assert_eq!(path.fuel_consumed, 4.0);
/// ```
pub fn find_path(
    graph: &Graph,
    start: &str,
    goal: &str,
    fuel: &FuelConfig,
) -> Result<SearchOutcome> {
    fuel.validate()?;
    let start = graph.node_id(start)?;
    let goal = graph.node_id(goal)?;

    if start == goal {
        return Ok(SearchOutcome::Found(FuelPath {
            steps: vec![start],
            total_distance: 0.0,
            fuel_consumed: 0.0,
        }));
    }

    let mut best_cost: HashMap<NodeId, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut finalized: HashSet<NodeId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    best_cost.insert(start.clone(), 0.0);
    predecessors.insert(start.clone(), None);
    let start_estimate = heuristic(graph, start.as_str(), goal.as_str())?;
    frontier.push(FrontierEntry::new(
        start_estimate,
        start.clone(),
        Tank::full(fuel.capacity),
    ));

    while let Some(entry) = frontier.pop() {
        if !finalized.insert(entry.node.clone()) {
            continue;
        }

        let current_cost = best_cost
            .get(&entry.node)
            .copied()
            .ok_or_else(|| Error::PathReconstruction {
                node: entry.node.clone(),
            })?;

        if entry.node == goal {
            let steps = reconstruct_path(&predecessors, &goal)?;
            debug!(
                start = %start,
                goal = %goal,
                finalized = finalized.len(),
                hops = steps.len() - 1,
                "route found"
            );
            return Ok(SearchOutcome::Found(FuelPath {
                steps,
                total_distance: current_cost,
                fuel_consumed: entry.tank.consumed(fuel.capacity),
            }));
        }

        let tank = if fuel.is_refuel_node(entry.node.as_str()) {
            Tank::full(fuel.capacity)
        } else {
            entry.tank
        };

        for edge in graph.neighbours(entry.node.as_str())? {
            if finalized.contains(&edge.target) {
                continue;
            }

            let fuel_needed = fuel.fuel_needed(edge.weight);
            if tank.remaining < fuel_needed {
                continue;
            }

            let new_cost = current_cost + edge.weight;
            let improves = best_cost
                .get(&edge.target)
                .map_or(true, |&known| new_cost < known);
            if !improves {
                continue;
            }

            best_cost.insert(edge.target.clone(), new_cost);
            predecessors.insert(edge.target.clone(), Some(entry.node.clone()));
            let estimate = new_cost + heuristic(graph, edge.target.as_str(), goal.as_str())?;
            frontier.push(FrontierEntry::new(
                estimate,
                edge.target.clone(),
                tank.spend(fuel_needed),
            ));
        }
    }

    debug!(
        start = %start,
        goal = %goal,
        finalized = finalized.len(),
        "frontier exhausted without reaching goal"
    );
    Ok(SearchOutcome::NoPath)
}

/// Walk predecessor links back from `goal` and return the route in travel order.
///
/// The walk stops at the node whose predecessor is `None`. A node missing from
/// the map, or a walk longer than the map (a cycle), is reported as
/// [`Error::PathReconstruction`].
pub fn reconstruct_path(
    predecessors: &HashMap<NodeId, Option<NodeId>>,
    goal: &NodeId,
) -> Result<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = goal.clone();
    loop {
        let parent = predecessors
            .get(&current)
            .ok_or_else(|| Error::PathReconstruction {
                node: current.clone(),
            })?;
        if path.len() == predecessors.len() {
            return Err(Error::PathReconstruction { node: current });
        }
        path.push(current);
        match parent {
            Some(node) => current = node.clone(),
            None => break,
        }
    }
    path.reverse();
    Ok(path)
}

/// Fuel carried by a search state.
#[derive(Copy, Clone, Debug)]
struct Tank {
    remaining: f64,
    /// Fuel drawn since the tank was last full; reported when capacity is unbounded.
    drawn: f64,
}

impl Tank {
    fn full(capacity: f64) -> Self {
        Self {
            remaining: capacity,
            drawn: 0.0,
        }
    }

    fn spend(self, amount: f64) -> Self {
        Self {
            remaining: self.remaining - amount,
            drawn: self.drawn + amount,
        }
    }

    fn consumed(self, capacity: f64) -> f64 {
        if capacity.is_finite() {
            capacity - self.remaining
        } else {
            self.drawn
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug)]
struct FrontierEntry {
    estimate: FloatOrd,
    node: NodeId,
    tank: Tank,
}

impl FrontierEntry {
    fn new(estimate: f64, node: NodeId, tank: Tank) -> Self {
        Self {
            estimate: FloatOrd(estimate),
            node,
            tank,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the lowest estimate, then the lowest node
        // identifier, then the fullest tank.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| FloatOrd(self.tank.remaining).cmp(&FloatOrd(other.tank.remaining)))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}
