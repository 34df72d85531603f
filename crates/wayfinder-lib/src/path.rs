use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{distance_km, estimate_walking_time};
use crate::graph::{Graph, Node};

/// Budget applied to a single search run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of nodes the search may expand before giving up.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        Self {
            max_expansions: Some(max_expansions),
        }
    }
}

/// Shortest path found by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Nodes from start to goal inclusive.
    pub path: Vec<Node>,
    /// Sum of edge weights along the path in kilometres.
    pub total_distance_km: f64,
    /// Walking time for `total_distance_km` in minutes.
    pub estimated_time_min: f64,
}

impl PathResult {
    fn new(path: Vec<Node>, total_distance_km: f64) -> Self {
        Self {
            path,
            total_distance_km,
            estimated_time_min: estimate_walking_time(total_distance_km),
        }
    }

    fn trivial(node: &Node) -> Self {
        Self::new(vec![node.clone()], 0.0)
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<&Node> {
        self.path.first()
    }

    pub fn goal(&self) -> Option<&Node> {
        self.path.last()
    }
}

/// Run A* between `start` and `goal` with an unbounded budget.
pub fn find_route_a_star(graph: &Graph, start: &str, goal: &str) -> Result<PathResult> {
    find_route_a_star_with_limits(graph, start, goal, &SearchLimits::default())
}

/// Run A* search guided by the great-circle distance to the goal.
///
/// Edge weights are great-circle distances too, so the heuristic never
/// overestimates and the returned path has minimum total weight. Among equal
/// estimates the node with the lowest identifier is expanded first.
pub fn find_route_a_star_with_limits(
    graph: &Graph,
    start: &str,
    goal: &str,
    limits: &SearchLimits,
) -> Result<PathResult> {
    let start_node = graph.resolve(start)?;
    let goal_node = graph.resolve(goal)?;

    if start == goal {
        return Ok(PathResult::trivial(start_node));
    }

    let start_id = start_node.id.as_str();
    let goal_id = goal_node.id.as_str();

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut closed: HashSet<&str> = HashSet::new();
    let mut open = BinaryHeap::new();
    let mut expansions = 0usize;

    g_score.insert(start_id, 0.0);
    open.push(AStarEntry::new(
        start_id,
        0.0,
        heuristic(start_node, goal_node),
    ));

    while let Some(entry) = open.pop() {
        if closed.contains(entry.node) {
            continue;
        }
        let current_score = match g_score.get(entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal_id {
            debug!(start, goal, expansions, "a* reached goal");
            return Ok(reconstruct_path(
                graph,
                &parents,
                start_id,
                goal_id,
                current_score,
            ));
        }

        check_budget(limits, expansions, start, goal)?;
        expansions += 1;
        closed.insert(entry.node);

        for edge in graph.neighbours(entry.node) {
            let next = edge.to.as_str();
            if closed.contains(next) {
                continue;
            }

            let tentative_g = current_score + edge.weight;
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.node);
                let estimate = graph
                    .node(next)
                    .map(|node| heuristic(node, goal_node))
                    .unwrap_or(0.0);
                open.push(AStarEntry::new(next, tentative_g, estimate));
            }
        }
    }

    debug!(start, goal, expansions, "a* exhausted the open set");
    Err(Error::RouteNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

/// Run Dijkstra's algorithm between `start` and `goal` with an unbounded budget.
pub fn find_route_dijkstra(graph: &Graph, start: &str, goal: &str) -> Result<PathResult> {
    find_route_dijkstra_with_limits(graph, start, goal, &SearchLimits::default())
}

/// Run Dijkstra's algorithm to find the lowest-cost path.
///
/// Nodes are settled in order of distance from `start`, lowest identifier
/// first among equal distances. The search stops as soon as `goal` is settled.
pub fn find_route_dijkstra_with_limits(
    graph: &Graph,
    start: &str,
    goal: &str,
    limits: &SearchLimits,
) -> Result<PathResult> {
    let start_node = graph.resolve(start)?;
    let goal_node = graph.resolve(goal)?;

    if start == goal {
        return Ok(PathResult::trivial(start_node));
    }

    let start_id = start_node.id.as_str();
    let goal_id = goal_node.id.as_str();

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue = BinaryHeap::new();
    let mut expansions = 0usize;

    distances.insert(start_id, 0.0);
    queue.push(QueueEntry::new(start_id, 0.0));

    while let Some(entry) = queue.pop() {
        if visited.contains(entry.node) {
            continue;
        }
        let current_distance = match distances.get(entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal_id {
            debug!(start, goal, expansions, "dijkstra settled goal");
            return Ok(reconstruct_path(
                graph,
                &parents,
                start_id,
                goal_id,
                current_distance,
            ));
        }

        check_budget(limits, expansions, start, goal)?;
        expansions += 1;
        visited.insert(entry.node);

        for edge in graph.neighbours(entry.node) {
            let next = edge.to.as_str();
            if visited.contains(next) {
                continue;
            }

            let next_cost = current_distance + edge.weight;
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(start, goal, expansions, "dijkstra ran out of reachable nodes");
    Err(Error::RouteNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })
}

fn check_budget(limits: &SearchLimits, expansions: usize, start: &str, goal: &str) -> Result<()> {
    match limits.max_expansions {
        Some(limit) if expansions >= limit => Err(Error::SearchExhausted {
            start: start.to_string(),
            goal: goal.to_string(),
            limit,
        }),
        _ => Ok(()),
    }
}

fn heuristic(node: &Node, goal: &Node) -> f64 {
    distance_km(node.coordinate, goal.coordinate)
}

fn reconstruct_path(
    graph: &Graph,
    parents: &HashMap<&str, &str>,
    start: &str,
    goal: &str,
    total_distance_km: f64,
) -> PathResult {
    let mut ids = vec![goal];
    let mut current = goal;
    while current != start {
        match parents.get(current) {
            Some(&parent) => {
                ids.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    ids.reverse();

    let path = ids
        .into_iter()
        .filter_map(|id| graph.node(id).cloned())
        .collect();
    PathResult::new(path, total_distance_km)
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

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl<'a> AStarEntry<'a> {
    fn new(node: &'a str, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for AStarEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
