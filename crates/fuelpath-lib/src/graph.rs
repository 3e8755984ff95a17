use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a node name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Opaque node identifier. Cloning is cheap; ordering is lexical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Arc<str>);

impl NodeId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

/// Planar coordinates for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Edge within the routing graph, seen from one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// Undirected weighted graph used by the fuel-aware search.
///
/// Every edge is stored on both endpoints so neighbour lookup is a single map
/// access. Node insertion order is kept for listings.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    order: Vec<NodeId>,
    positions: HashMap<NodeId, Position>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node at the given position.
    pub fn add_node(&mut self, id: impl Into<NodeId>, position: Position) -> Result<()> {
        let id = id.into();
        if self.positions.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }

        self.positions.insert(id.clone(), position);
        self.adjacency.insert(id.clone(), Vec::new());
        self.order.push(id);
        Ok(())
    }

    /// Connect two registered nodes. Re-adding an existing pair replaces its weight.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: f64) -> Result<()> {
        let u = self.node_id(u)?;
        let v = self.node_id(v)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight {
                from: u,
                to: v,
                weight,
            });
        }

        let inserted = self.upsert_half_edge(&u, &v, weight);
        if u != v {
            self.upsert_half_edge(&v, &u, weight);
        }
        if inserted {
            self.edge_count += 1;
        }
        Ok(())
    }

    fn upsert_half_edge(&mut self, from: &NodeId, to: &NodeId, weight: f64) -> bool {
        let edges = self.adjacency.entry(from.clone()).or_default();
        if let Some(existing) = edges.iter_mut().find(|edge| &edge.target == to) {
            existing.weight = weight;
            return false;
        }
        edges.push(Edge {
            target: to.clone(),
            weight,
        });
        true
    }

    /// Return the edges leaving `node`. Isolated nodes yield an empty slice.
    pub fn neighbours(&self, node: &str) -> Result<&[Edge]> {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::unknown_node(node))
    }

    /// Position of a registered node.
    pub fn position(&self, node: &str) -> Result<Position> {
        self.positions
            .get(node)
            .copied()
            .ok_or_else(|| Error::unknown_node(node))
    }

    pub fn contains(&self, node: &str) -> bool {
        self.positions.contains_key(node)
    }

    /// Canonical identifier for `node`, sharing the graph's allocation.
    pub fn node_id(&self, node: &str) -> Result<NodeId> {
        self.positions
            .get_key_value(node)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| Error::unknown_node(node))
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&NodeId, Position)> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.positions.get(id).map(|pos| (id, *pos)))
    }

    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Weight of the edge joining `u` and `v`, if any.
    pub fn edge_weight(&self, u: &str, v: &str) -> Option<f64> {
        self.adjacency
            .get(u)?
            .iter()
            .find(|edge| edge.target.as_str() == v)
            .map(|edge| edge.weight)
    }

    /// Resolve a user-supplied name, attaching close matches when it is unknown.
    pub fn resolve(&self, name: &str) -> Result<NodeId> {
        self.node_id(name).map_err(|_| Error::UnknownNode {
            id: name.to_string(),
            suggestions: self.fuzzy_node_matches(name, 3),
        })
    }

    /// Node names most similar to `name`, best match first.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &NodeId)> = self
            .order
            .iter()
            .map(|id| (strsim::jaro_winkler(name, id.as_str()), id))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored.truncate(limit);
        scored.into_iter().map(|(_, id)| id.to_string()).collect()
    }
}
