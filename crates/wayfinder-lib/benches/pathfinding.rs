use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use wayfinder_lib::{
    build_default_graph, find_route_a_star, find_route_dijkstra, plan_route, Graph, Point,
    RouteAlgorithm, RouteRequest,
};

const GRID_SIZE: usize = 30;

/// Square grid of points 0.003 degrees apart, so each point links to its
/// orthogonal and diagonal neighbours under the default radius.
static GRID: Lazy<Graph> = Lazy::new(|| {
    let points: Vec<Point> = (0..GRID_SIZE)
        .flat_map(|row| {
            (0..GRID_SIZE).map(move |col| {
                Point::new(
                    format!("r{row:02}c{col:02}"),
                    -33.45 + row as f64 * 0.003,
                    -70.66 + col as f64 * 0.003,
                )
            })
        })
        .collect();
    build_default_graph(&points).expect("grid builds")
});

static CORNER_TO_CORNER: Lazy<(String, String)> = Lazy::new(|| {
    let last = GRID_SIZE - 1;
    ("r00c00".to_string(), format!("r{last:02}c{last:02}"))
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;
    let (start, goal) = &*CORNER_TO_CORNER;

    c.bench_function("a_star_grid_corner", |b| {
        b.iter(|| {
            let result = find_route_a_star(graph, start, goal).expect("route exists");
            black_box(result.total_distance_km)
        });
    });

    c.bench_function("dijkstra_grid_corner", |b| {
        b.iter(|| {
            let result = find_route_dijkstra(graph, start, goal).expect("route exists");
            black_box(result.total_distance_km)
        });
    });

    c.bench_function("plan_route_dijkstra_grid_corner", |b| {
        let request =
            RouteRequest::new(start.clone(), goal.clone()).with_algorithm(RouteAlgorithm::Dijkstra);
        b.iter(|| {
            let plan = plan_route(graph, &request).expect("route exists");
            black_box(plan.hop_count())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
