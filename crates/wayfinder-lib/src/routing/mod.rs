//! Route planning over a point-of-interest graph.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (A*, Dijkstra)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] implementation and picked
//! by [`select_planner`], so adding a search does not touch `plan_route`.
//!
//! # Example
//!
//! ```ignore
//! use wayfinder_lib::{build_default_graph, load_points, plan_route, RouteRequest};
//!
//! let points = load_points("points.json")?;
//! let graph = build_default_graph(&points)?;
//! let plan = plan_route(&graph, &RouteRequest::new("catedral", "museo"))?;
//! println!("Route: {} hops", plan.hop_count());
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::geo::TransportMode;
use crate::graph::Graph;
use crate::path::{PathResult, SearchLimits};
use crate::route_result::RouteResult;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// A* search (heuristic guided).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
    /// Dijkstra's algorithm.
    Dijkstra,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::AStar => "a-star",
            RouteAlgorithm::Dijkstra => "dijkstra",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            other => Err(format!("unknown routing algorithm '{other}'")),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub algorithm: RouteAlgorithm,
    /// Mode used to derive the duration of the resulting [`RouteResult`].
    pub mode: TransportMode,
    pub limits: SearchLimits,
}

impl RouteRequest {
    /// A* walking route without a search budget.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm: RouteAlgorithm::default(),
            mode: TransportMode::default(),
            limits: SearchLimits::default(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub mode: TransportMode,
    pub path: PathResult,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.path.hop_count()
    }

    /// Display-facing result with the duration derived for the plan's mode.
    pub fn to_route_result(&self) -> RouteResult {
        RouteResult::from_path_with_mode(&self.path, self.mode)
    }
}

/// Compute a route using the requested algorithm.
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let planner = select_planner(request);
    let path = planner.find_path(graph, &request.start, &request.goal)?;

    debug!(
        algorithm = %request.algorithm,
        start = %request.start,
        goal = %request.goal,
        hops = path.hop_count(),
        distance_km = path.total_distance_km,
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        mode: request.mode,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_strings() {
        for algorithm in [RouteAlgorithm::AStar, RouteAlgorithm::Dijkstra] {
            assert_eq!(algorithm.to_string().parse::<RouteAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert!("bfs".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn default_request_is_walking_a_star() {
        let request = RouteRequest::new("a", "b");
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.mode, TransportMode::Walking);
        assert_eq!(request.limits, SearchLimits::default());
    }

    #[test]
    fn algorithm_serializes_with_dash() {
        let json = serde_json::to_string(&RouteAlgorithm::AStar).expect("serialize");
        assert_eq!(json, "\"a-star\"");
    }
}
