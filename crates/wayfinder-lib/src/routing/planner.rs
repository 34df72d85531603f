//! Route planning strategies implementing the Strategy pattern.
//!
//! This module provides the `RoutePlanner` trait and one implementation per
//! search algorithm, so `plan_route` never needs to know which search runs.

use crate::error::Result;
use crate::graph::Graph;
use crate::path::{
    find_route_a_star_with_limits, find_route_dijkstra_with_limits, PathResult, SearchLimits,
};

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on the given graph.
    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Result<PathResult>;
}

/// A* planner guided by the great-circle distance to the goal.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner {
    limits: SearchLimits,
}

impl AStarPlanner {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Result<PathResult> {
        find_route_a_star_with_limits(graph, start, goal, &self.limits)
    }
}

/// Dijkstra planner, exploring without a heuristic.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner {
    limits: SearchLimits,
}

impl DijkstraPlanner {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }
}

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &Graph, start: &str, goal: &str) -> Result<PathResult> {
        find_route_dijkstra_with_limits(graph, start, goal, &self.limits)
    }
}

/// Select the appropriate planner for a given request.
pub fn select_planner(request: &RouteRequest) -> Box<dyn RoutePlanner> {
    match request.algorithm {
        RouteAlgorithm::AStar => Box::new(AStarPlanner::new(request.limits)),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner::new(request.limits)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planners_report_their_algorithm() {
        assert_eq!(AStarPlanner::default().algorithm(), RouteAlgorithm::AStar);
        assert_eq!(
            DijkstraPlanner::default().algorithm(),
            RouteAlgorithm::Dijkstra
        );
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        let request = RouteRequest::new("a", "b").with_algorithm(RouteAlgorithm::Dijkstra);
        assert_eq!(select_planner(&request).algorithm(), RouteAlgorithm::Dijkstra);

        let request = RouteRequest::new("a", "b");
        assert_eq!(select_planner(&request).algorithm(), RouteAlgorithm::AStar);
    }
}
