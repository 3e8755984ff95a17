mod common;

use fuelpath_lib::{find_path, FuelConfig, Graph, Position, SearchOutcome};

use common::{grid_graph, grid_id, path_length, reference_distances, sample_network};

fn all_ids(graph: &Graph) -> Vec<String> {
    graph.nodes().map(|(id, _)| id.to_string()).collect()
}

#[test]
fn every_node_routes_to_itself_for_free() {
    let network = sample_network();
    let graph = network.graph();
    for id in all_ids(graph) {
        for capacity in [0.0, 15.0, f64::INFINITY] {
            let path = find_path(graph, &id, &id, &FuelConfig::new(capacity, 0.25))
                .unwrap()
                .into_path()
                .expect("trivial route");
            assert_eq!(path.steps.len(), 1);
            assert_eq!(path.steps[0].as_str(), id);
            assert_eq!(path.total_distance, 0.0);
            assert_eq!(path.fuel_consumed, 0.0);
        }
    }
}

#[test]
fn found_routes_are_contiguous_and_within_capacity() {
    let network = sample_network();
    let graph = network.graph();
    let ids = all_ids(graph);

    for capacity in [8.0, 12.0, 15.0, 25.0] {
        let fuel = FuelConfig {
            capacity,
            ..network.fuel().clone()
        };
        for start in &ids {
            for goal in &ids {
                let outcome = find_path(graph, start, goal, &fuel).unwrap();
                let SearchOutcome::Found(path) = outcome else {
                    continue;
                };
                assert_eq!(path.steps.first().unwrap().as_str(), start);
                assert_eq!(path.steps.last().unwrap().as_str(), goal);
                let length = path_length(graph, &path.steps);
                assert!(
                    (length - path.total_distance).abs() < 1e-9,
                    "{start}->{goal}: reported {} but edges sum to {length}",
                    path.total_distance
                );
                assert!(path.fuel_consumed >= 0.0);
                assert!(
                    path.fuel_consumed <= capacity,
                    "{start}->{goal}: consumed {} with capacity {capacity}",
                    path.fuel_consumed
                );
            }
        }
    }
}

#[test]
fn zero_consumption_matches_unconstrained_shortest_paths() {
    let graph = grid_graph();
    let ids = all_ids(&graph);
    let fuel = FuelConfig::new(0.0, 0.0);

    for start in &ids {
        let reference = reference_distances(&graph, start);
        for goal in &ids {
            let outcome = find_path(&graph, start, goal, &fuel).unwrap();
            let expected = reference[goal.as_str()];
            assert!(
                (outcome.total_distance() - expected).abs() < 1e-9,
                "{start}->{goal}: got {} expected {expected}",
                outcome.total_distance()
            );
            assert_eq!(outcome.fuel_consumed(), 0.0);
        }
    }
}

#[test]
fn infinite_capacity_matches_unconstrained_shortest_paths() {
    let graph = grid_graph();
    let start = grid_id(0, 0);
    let goal = grid_id(4, 4);
    let fuel = FuelConfig::new(f64::INFINITY, 2.0);

    let path = find_path(&graph, &start, &goal, &fuel)
        .unwrap()
        .into_path()
        .expect("grid is connected");
    let expected = reference_distances(&graph, &start)[goal.as_str()];
    assert!((path.total_distance - expected).abs() < 1e-9);
    assert!((path.fuel_consumed - 2.0 * path.total_distance).abs() < 1e-9);
}

#[test]
fn raising_capacity_never_loses_a_route_on_a_tree() {
    // Hub-and-spoke tree with a fuel stop half way down the long spoke.
    let mut graph = Graph::new();
    graph.add_node("hub", Position::new(0.0, 0.0)).unwrap();
    graph.add_node("north", Position::new(0.0, 6.0)).unwrap();
    graph.add_node("depot", Position::new(9.0, 0.0)).unwrap();
    graph.add_node("far", Position::new(21.0, 0.0)).unwrap();
    graph.add_node("south", Position::new(0.0, -4.0)).unwrap();
    graph.add_edge("hub", "north", 6.0).unwrap();
    graph.add_edge("hub", "depot", 9.0).unwrap();
    graph.add_edge("depot", "far", 12.0).unwrap();
    graph.add_edge("hub", "south", 4.0).unwrap();

    for (start, goal) in [("north", "far"), ("far", "south"), ("south", "north")] {
        let mut reachable = false;
        for capacity in 0..=40 {
            let fuel = FuelConfig::new(capacity as f64, 1.0).with_refuel_nodes(["depot"]);
            let found = find_path(&graph, start, goal, &fuel).unwrap().is_found();
            assert!(
                found || !reachable,
                "{start}->{goal} lost its route at capacity {capacity}"
            );
            reachable |= found;
        }
        assert!(reachable, "{start}->{goal} never became reachable");
    }
}

#[test]
fn searches_share_a_graph_across_threads() {
    let network = std::sync::Arc::new(sample_network());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let network = std::sync::Arc::clone(&network);
            std::thread::spawn(move || {
                find_path(network.graph(), "A", "K", network.fuel())
                    .unwrap()
                    .total_distance()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 46.0);
    }
}
