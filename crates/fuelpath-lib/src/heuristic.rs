//! Straight-line distance estimate used to guide the search.
//!
//! The estimate is admissible and consistent as long as every edge weight is
//! at least the straight-line distance between its endpoints. Networks that
//! break this still produce valid routes, but optimality is no longer
//! guaranteed; [`inadmissible_edges`] reports the offending edges.

use crate::error::Result;
use crate::graph::{Graph, NodeId};

/// Euclidean distance between the positions of `node` and `goal`.
pub fn heuristic(graph: &Graph, node: &str, goal: &str) -> Result<f64> {
    let from = graph.position(node)?;
    let to = graph.position(goal)?;
    Ok(from.distance_to(&to))
}

/// Edges whose weight is shorter than the straight-line distance between their endpoints.
///
/// Each undirected edge is reported once, with endpoints in lexical order.
pub fn inadmissible_edges(graph: &Graph) -> Vec<(NodeId, NodeId, f64, f64)> {
    let mut offending = Vec::new();
    for (id, position) in graph.nodes() {
        let Ok(edges) = graph.neighbours(id.as_str()) else {
            continue;
        };
        for edge in edges {
            if edge.target <= *id {
                continue;
            }
            let Ok(target) = graph.position(edge.target.as_str()) else {
                continue;
            };
            let straight = position.distance_to(&target);
            if edge.weight < straight {
                offending.push((id.clone(), edge.target.clone(), edge.weight, straight));
            }
        }
    }
    offending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::Position;

    #[test]
    fn heuristic_is_straight_line_distance() {
        let mut graph = Graph::new();
        graph.add_node("A", Position::new(0.0, 0.0)).unwrap();
        graph.add_node("B", Position::new(6.0, 8.0)).unwrap();
        assert_eq!(heuristic(&graph, "A", "B").unwrap(), 10.0);
        assert_eq!(heuristic(&graph, "B", "B").unwrap(), 0.0);
    }

    #[test]
    fn heuristic_rejects_unknown_nodes() {
        let graph = Graph::new();
        assert!(matches!(
            heuristic(&graph, "A", "B"),
            Err(Error::UnknownNode { .. })
        ));
    }

    #[test]
    fn short_edges_are_reported_once() {
        let mut graph = Graph::new();
        graph.add_node("A", Position::new(0.0, 0.0)).unwrap();
        graph.add_node("B", Position::new(3.0, 4.0)).unwrap();
        graph.add_node("C", Position::new(3.0, 0.0)).unwrap();
        graph.add_edge("A", "B", 2.0).unwrap();
        graph.add_edge("A", "C", 3.0).unwrap();

        let offending = inadmissible_edges(&graph);
        assert_eq!(offending.len(), 1);
        assert_eq!(offending[0].0.as_str(), "A");
        assert_eq!(offending[0].1.as_str(), "B");
        assert_eq!(offending[0].3, 5.0);
    }
}
