#![allow(dead_code)]

use std::collections::HashMap;

use fuelpath_lib::{Graph, Network, NodeId, Position};

pub fn sample_network() -> Network {
    Network::sample().expect("bundled sample network parses")
}

/// A 5x5 grid with orthogonal and some diagonal links. Every weight is at
/// least the straight-line distance, so the Euclidean estimate stays admissible.
pub fn grid_graph() -> Graph {
    let mut graph = Graph::new();
    for row in 0..5 {
        for col in 0..5 {
            graph
                .add_node(grid_id(row, col), Position::new(col as f64, row as f64))
                .expect("unique grid node");
        }
    }

    for row in 0..5 {
        for col in 0..5 {
            let stretch = 1.0 + ((row * 7 + col * 3) % 5) as f64 / 4.0;
            if col + 1 < 5 {
                graph
                    .add_edge(&grid_id(row, col), &grid_id(row, col + 1), stretch)
                    .expect("grid edge");
            }
            if row + 1 < 5 {
                graph
                    .add_edge(&grid_id(row, col), &grid_id(row + 1, col), 2.5 - stretch / 2.0)
                    .expect("grid edge");
            }
            if row + 1 < 5 && col + 1 < 5 && (row + col) % 3 == 0 {
                graph
                    .add_edge(
                        &grid_id(row, col),
                        &grid_id(row + 1, col + 1),
                        std::f64::consts::SQRT_2 * stretch,
                    )
                    .expect("grid edge");
            }
        }
    }
    graph
}

pub fn grid_id(row: usize, col: usize) -> String {
    format!("r{row}c{col}")
}

/// Plain Dijkstra distances from `start`, ignoring fuel.
pub fn reference_distances(graph: &Graph, start: &str) -> HashMap<NodeId, f64> {
    let mut distances: HashMap<NodeId, f64> = HashMap::new();
    let mut done: Vec<NodeId> = Vec::new();
    distances.insert(NodeId::from(start), 0.0);

    loop {
        let next = distances
            .iter()
            .filter(|(id, _)| !done.contains(*id))
            .min_by(|a, b| a.1.total_cmp(b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(id, cost)| (id.clone(), *cost));
        let Some((node, cost)) = next else {
            break;
        };
        done.push(node.clone());

        for edge in graph.neighbours(node.as_str()).expect("known node") {
            let candidate = cost + edge.weight;
            let known = distances.get(&edge.target).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                distances.insert(edge.target.clone(), candidate);
            }
        }
    }
    distances
}

/// Sum of edge weights along `steps`, panicking if any hop is not an edge.
pub fn path_length(graph: &Graph, steps: &[NodeId]) -> f64 {
    steps
        .windows(2)
        .map(|pair| {
            graph
                .edge_weight(pair[0].as_str(), pair[1].as_str())
                .unwrap_or_else(|| panic!("{} and {} are not adjacent", pair[0], pair[1]))
        })
        .sum()
}
