#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use wayfinder_lib::{distance_km, Coordinate, Edge, Graph, Node, Point};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn santiago_fixture() -> PathBuf {
    fixtures_dir().join("santiago_centro.json")
}

/// Build a graph from points and an explicit list of undirected links.
///
/// Links without a weight use the great-circle distance; explicit weights
/// must not be shorter than it or the A* heuristic stops being admissible.
pub fn linked_graph(points: &[Point], links: &[(&str, &str, Option<f64>)]) -> Graph {
    let nodes: HashMap<String, Node> = points
        .iter()
        .map(|point| (point.id.clone(), Node::from(point)))
        .collect();
    let coordinate = |id: &str| -> Coordinate { nodes[id].coordinate };

    let mut adjacency: HashMap<String, Vec<Edge>> = HashMap::new();
    for &(a, b, weight) in links {
        let weight = weight.unwrap_or_else(|| distance_km(coordinate(a), coordinate(b)));
        for (from, to) in [(a, b), (b, a)] {
            adjacency.entry(from.to_string()).or_default().push(Edge {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            });
        }
    }

    Graph::from_parts(nodes, adjacency).expect("links reference known points")
}
