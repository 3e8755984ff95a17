use criterion::{criterion_group, criterion_main, Criterion};
use fuelpath_lib::{find_path, plan_route, FuelConfig, Graph, Network, Position, RouteRequest};
use once_cell::sync::Lazy;
use std::hint::black_box;

const GRID_SIDE: usize = 40;

static SAMPLE: Lazy<Network> = Lazy::new(|| Network::sample().expect("sample parses"));
static GRID: Lazy<Graph> = Lazy::new(build_grid);
static SAMPLE_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::new("A", "G_Bunk"));
static TIGHT_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("A", "K").with_capacity(10.0));

fn grid_id(row: usize, col: usize) -> String {
    format!("r{row}c{col}")
}

/// Square lattice with every fifth column holding a fuel stop.
fn build_grid() -> Graph {
    let mut graph = Graph::new();
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            graph
                .add_node(grid_id(row, col), Position::new(col as f64, row as f64))
                .expect("unique node");
        }
    }
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            let weight = 1.0 + ((row * 13 + col * 7) % 4) as f64 * 0.5;
            if col + 1 < GRID_SIDE {
                graph
                    .add_edge(&grid_id(row, col), &grid_id(row, col + 1), weight)
                    .expect("edge");
            }
            if row + 1 < GRID_SIDE {
                graph
                    .add_edge(&grid_id(row, col), &grid_id(row + 1, col), weight)
                    .expect("edge");
            }
        }
    }
    graph
}

fn grid_fuel() -> FuelConfig {
    let stops = (0..GRID_SIDE)
        .flat_map(|row| (0..GRID_SIDE).step_by(5).map(move |col| grid_id(row, col)));
    FuelConfig::new(12.0, 1.0).with_refuel_nodes(stops)
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let network = &*SAMPLE;

    c.bench_function("sample_a_to_g_bunk", |b| {
        let request = &*SAMPLE_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("sample_unreachable", |b| {
        let request = &*TIGHT_REQUEST;
        b.iter(|| {
            let plan = plan_route(network, request).expect("planning succeeds");
            black_box(plan.is_found())
        });
    });

    let grid = &*GRID;
    let start = grid_id(0, 0);
    let goal = grid_id(GRID_SIDE - 1, GRID_SIDE - 1);

    c.bench_function("grid_unconstrained", |b| {
        let fuel = FuelConfig::new(f64::INFINITY, 1.0);
        b.iter(|| {
            let outcome = find_path(grid, &start, &goal, &fuel).expect("search runs");
            black_box(outcome.total_distance())
        });
    });

    c.bench_function("grid_with_fuel_stops", |b| {
        let fuel = grid_fuel();
        b.iter(|| {
            let outcome = find_path(grid, &start, &goal, &fuel).expect("search runs");
            black_box(outcome.total_distance())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
