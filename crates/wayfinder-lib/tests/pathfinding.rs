mod common;

use common::linked_graph;
use wayfinder_lib::{
    build_default_graph, build_graph, find_route_a_star, find_route_dijkstra, load_points, Error,
    Graph, GraphBuildOptions, PathResult, Point,
};

const TOLERANCE: f64 = 1e-9;

fn ids(result: &PathResult) -> Vec<&str> {
    result.path.iter().map(|node| node.id.as_str()).collect()
}

/// Start and goal joined by a straight route through `mid`, a long detour
/// through `north`, and a direct edge that is weighted like a winding road.
fn diamond() -> Graph {
    linked_graph(
        &[
            Point::new("start", 0.0, 0.0),
            Point::new("mid", 0.0, 0.005),
            Point::new("north", 0.005, 0.005),
            Point::new("goal", 0.0, 0.01),
        ],
        &[
            ("start", "mid", None),
            ("mid", "goal", None),
            ("start", "north", None),
            ("north", "goal", None),
            ("start", "goal", Some(5.0)),
        ],
    )
}

fn grid(size: usize) -> Graph {
    let mut points = Vec::new();
    for row in 0..size {
        for col in 0..size {
            // Slight jitter keeps most path costs distinct.
            let jitter = ((row * 7 + col * 13) % 5) as f64 * 0.0001;
            points.push(Point::new(
                format!("r{row}c{col}"),
                row as f64 * 0.003 + jitter,
                col as f64 * 0.003,
            ));
        }
    }
    build_default_graph(&points).expect("grid builds")
}

#[test]
fn a_star_prefers_lower_total_weight_over_fewer_hops() {
    let graph = diamond();
    let result = find_route_a_star(&graph, "start", "goal").expect("route exists");

    assert_eq!(ids(&result), vec!["start", "mid", "goal"]);
    assert!((result.total_distance_km - 1.1119).abs() < 1e-3);
    assert!(
        (result.estimated_time_min - result.total_distance_km / 5.0 * 60.0).abs() < TOLERANCE
    );
}

#[test]
fn dijkstra_matches_a_star_on_diamond() {
    let graph = diamond();
    let a_star = find_route_a_star(&graph, "start", "goal").expect("route exists");
    let dijkstra = find_route_dijkstra(&graph, "start", "goal").expect("route exists");

    assert!((a_star.total_distance_km - dijkstra.total_distance_km).abs() < TOLERANCE);
    assert_eq!(ids(&a_star), ids(&dijkstra));
}

#[test]
fn algorithms_agree_on_every_pair_of_a_grid() {
    let graph = grid(5);
    let mut node_ids: Vec<String> = graph.nodes().map(|node| node.id.clone()).collect();
    node_ids.sort();

    for start in &node_ids {
        for goal in &node_ids {
            let a_star = find_route_a_star(&graph, start, goal).expect("grid is connected");
            let dijkstra = find_route_dijkstra(&graph, start, goal).expect("grid is connected");
            assert!(
                (a_star.total_distance_km - dijkstra.total_distance_km).abs() < 1e-9,
                "{start} -> {goal}: {} vs {}",
                a_star.total_distance_km,
                dijkstra.total_distance_km
            );
            assert_eq!(a_star.path.first().map(|n| n.id.as_str()), Some(start.as_str()));
            assert_eq!(a_star.path.last().map(|n| n.id.as_str()), Some(goal.as_str()));
        }
    }
}

#[test]
fn path_weights_sum_to_total_distance() {
    let graph = grid(4);
    let result = find_route_dijkstra(&graph, "r0c0", "r3c3").expect("route exists");

    let summed: f64 = result
        .path
        .windows(2)
        .map(|pair| {
            graph
                .neighbours(&pair[0].id)
                .iter()
                .find(|edge| edge.to == pair[1].id)
                .expect("consecutive nodes are linked")
                .weight
        })
        .sum();
    assert!((summed - result.total_distance_km).abs() < TOLERANCE);
}

#[test]
fn searches_are_deterministic() {
    let graph = grid(4);
    let first = find_route_a_star(&graph, "r0c0", "r3c3").expect("route exists");
    for _ in 0..5 {
        let again = find_route_a_star(&graph, "r0c0", "r3c3").expect("route exists");
        assert_eq!(ids(&first), ids(&again));
    }
}

#[test]
fn equal_cost_ties_prefer_lowest_identifier() {
    // Two mirror-image detours of identical length.
    let graph = linked_graph(
        &[
            Point::new("s", 0.0, 0.0),
            Point::new("b-upper", 0.001, 0.001),
            Point::new("a-lower", -0.001, 0.001),
            Point::new("g", 0.0, 0.002),
        ],
        &[
            ("s", "b-upper", Some(1.0)),
            ("b-upper", "g", Some(1.0)),
            ("s", "a-lower", Some(1.0)),
            ("a-lower", "g", Some(1.0)),
        ],
    );

    let a_star = find_route_a_star(&graph, "s", "g").expect("route exists");
    let dijkstra = find_route_dijkstra(&graph, "s", "g").expect("route exists");
    assert_eq!(ids(&a_star), vec!["s", "a-lower", "g"]);
    assert_eq!(ids(&dijkstra), vec!["s", "a-lower", "g"]);
}

#[test]
fn unreachable_goal_is_not_found() {
    let points = load_points(common::santiago_fixture()).expect("fixture loads");
    let graph = build_default_graph(&points).expect("graph builds");

    for search in [find_route_a_star, find_route_dijkstra] {
        let err = search(&graph, "mercado-central", "barrio-lastarria").expect_err("disconnected");
        assert!(matches!(err, Error::RouteNotFound { .. }), "{err}");
        assert!(err.to_string().contains("no route found"));

        let err = search(&graph, "catedral", "cerro-san-cristobal").expect_err("isolated");
        assert!(matches!(err, Error::RouteNotFound { .. }));
    }
}

#[test]
fn wider_threshold_joins_clusters() {
    let points = load_points(common::santiago_fixture()).expect("fixture loads");
    let graph = build_graph(
        &points,
        &GraphBuildOptions {
            max_connection_distance_km: 0.8,
        },
    )
    .expect("graph builds");

    let result =
        find_route_a_star(&graph, "mercado-central", "barrio-lastarria").expect("route exists");
    assert!(result.hop_count() >= 2);
}

#[test]
fn fixture_route_matches_expected_landmarks() {
    let points = load_points(common::santiago_fixture()).expect("fixture loads");
    let graph = build_default_graph(&points).expect("graph builds");

    for search in [find_route_a_star, find_route_dijkstra] {
        let result = search(&graph, "mercado-central", "palacio-la-moneda").expect("route exists");
        assert_eq!(
            ids(&result),
            vec![
                "mercado-central",
                "catedral",
                "museo-precolombino",
                "palacio-la-moneda"
            ]
        );
        assert!((result.total_distance_km - 1.0698).abs() < 1e-3);
    }
}

#[test]
fn trivial_path_when_start_is_goal() {
    let graph = diamond();
    for search in [find_route_a_star, find_route_dijkstra] {
        let result = search(&graph, "mid", "mid").expect("trivial route");
        assert_eq!(ids(&result), vec!["mid"]);
        assert_eq!(result.total_distance_km, 0.0);
        assert_eq!(result.estimated_time_min, 0.0);
        assert_eq!(result.hop_count(), 0);
    }

    let isolated = build_default_graph(&[Point::new("solo", 0.0, 0.0)]).expect("graph builds");
    assert!(find_route_dijkstra(&isolated, "solo", "solo").is_ok());
}

#[test]
fn unknown_ids_fail_with_suggestions() {
    let graph = diamond();
    for search in [find_route_a_star, find_route_dijkstra] {
        let err = search(&graph, "strat", "goal").expect_err("unknown start");
        match err {
            Error::UnknownNode { id, suggestions } => {
                assert_eq!(id, "strat");
                assert!(suggestions.contains(&"start".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = search(&graph, "start", "nowhere").expect_err("unknown goal");
        assert!(matches!(err, Error::UnknownNode { ref id, .. } if id == "nowhere"));
    }
}
