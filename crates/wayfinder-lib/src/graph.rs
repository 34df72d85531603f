use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{distance_km, Coordinate};

/// Identifier for a point of interest.
pub type NodeId = String;

/// Default radius within which two points are connected, in kilometres.
pub const DEFAULT_MAX_CONNECTION_DISTANCE_KM: f64 = 0.5;

/// Minimum similarity score for an identifier to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Labelled point supplied by the caller when building a graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Point {
    pub fn new(id: impl Into<NodeId>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Graph vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Node {
    /// Name when present, identifier otherwise.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl From<&Point> for Node {
    fn from(point: &Point) -> Self {
        Self {
            id: point.id.clone(),
            coordinate: point.coordinate(),
            name: point.name.clone(),
        }
    }
}

/// Directed, weighted edge. Weight is the great-circle distance in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: f64,
}

/// Options controlling graph construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphBuildOptions {
    /// Points further apart than this are left unconnected.
    pub max_connection_distance_km: f64,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            max_connection_distance_km: DEFAULT_MAX_CONNECTION_DISTANCE_KM,
        }
    }
}

/// Graph structure used by pathfinding algorithms.
///
/// Every node owns an adjacency entry (possibly empty) and every edge points
/// at a known node. The graph is read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<HashMap<NodeId, Node>>,
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
}

impl Graph {
    /// Assemble a graph from pre-computed parts, checking the edge invariants.
    pub fn from_parts(
        nodes: HashMap<NodeId, Node>,
        mut adjacency: HashMap<NodeId, Vec<Edge>>,
    ) -> Result<Self> {
        for (owner, edges) in &adjacency {
            if !nodes.contains_key(owner) {
                return Err(Error::InvalidEdge {
                    from: owner.clone(),
                    to: String::new(),
                    reason: "adjacency owner is not a node",
                });
            }
            for edge in edges {
                if &edge.from != owner {
                    return Err(Error::InvalidEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        reason: "edge source does not match its adjacency list",
                    });
                }
                if !nodes.contains_key(&edge.to) {
                    return Err(Error::InvalidEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        reason: "edge target is not a node",
                    });
                }
                if edge.weight.is_nan() || edge.weight < 0.0 {
                    return Err(Error::InvalidEdge {
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        reason: "edge weight must be a non-negative number",
                    });
                }
            }
        }

        for id in nodes.keys() {
            adjacency.entry(id.clone()).or_default();
        }

        Ok(Self {
            nodes: Arc::new(nodes),
            adjacency: Arc::new(adjacency),
        })
    }

    /// Look up a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Outgoing edges of a node, empty for unknown identifiers.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Identifiers of nodes without outgoing edges, sorted.
    pub fn isolated_nodes(&self) -> Vec<&str> {
        let mut isolated: Vec<&str> = self
            .nodes
            .keys()
            .filter(|id| self.neighbours(id).is_empty())
            .map(String::as_str)
            .collect();
        isolated.sort_unstable();
        isolated
    }

    /// Identifiers that look similar to `query`, best match first.
    pub fn fuzzy_node_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .nodes
            .keys()
            .map(|id| (strsim::jaro_winkler(&query, &id.to_lowercase()), id))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// Resolve an identifier to its node, suggesting close matches on failure.
    pub fn resolve(&self, id: &str) -> Result<&Node> {
        self.node(id).ok_or_else(|| Error::UnknownNode {
            id: id.to_string(),
            suggestions: self.fuzzy_node_matches(id, 3),
        })
    }
}

/// Build a graph with the default 0.5 km connection radius.
pub fn build_default_graph(points: &[Point]) -> Result<Graph> {
    build_graph(points, &GraphBuildOptions::default())
}

/// Build a graph by connecting every pair of points within the configured radius.
///
/// Both directions are added with the same weight. Points with no neighbour in
/// range remain as isolated nodes.
pub fn build_graph(points: &[Point], options: &GraphBuildOptions) -> Result<Graph> {
    let mut nodes: HashMap<NodeId, Node> = HashMap::with_capacity(points.len());
    for point in points {
        if nodes.insert(point.id.clone(), Node::from(point)).is_some() {
            return Err(Error::DuplicateNode {
                id: point.id.clone(),
            });
        }
    }

    let threshold = options.max_connection_distance_km;
    let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::with_capacity(points.len());
    for origin in points {
        let edges: Vec<Edge> = points
            .iter()
            .filter(|target| target.id != origin.id)
            .filter_map(|target| {
                let weight = distance_km(origin.coordinate(), target.coordinate());
                (weight <= threshold).then(|| Edge {
                    from: origin.id.clone(),
                    to: target.id.clone(),
                    weight,
                })
            })
            .collect();
        adjacency.insert(origin.id.clone(), edges);
    }

    let graph = Graph {
        nodes: Arc::new(nodes),
        adjacency: Arc::new(adjacency),
    };

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        threshold_km = threshold,
        "built point graph"
    );

    Ok(graph)
}
