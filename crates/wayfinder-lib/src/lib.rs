//! Wayfinder library entry points.
//!
//! This crate builds weighted graphs from points of interest, runs A* and
//! Dijkstra searches over them, and normalises the results (or responses from
//! a remote street router) into a single display-facing route shape.
//! Higher-level consumers (CLI, apps) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod points;
pub mod remote;
pub mod route_result;
pub mod routing;

pub use error::{Error, Result};
pub use geo::{distance_km, estimate_travel_time, estimate_walking_time, Coordinate, TransportMode};
pub use graph::{
    build_default_graph, build_graph, Edge, Graph, GraphBuildOptions, Node, NodeId, Point,
    DEFAULT_MAX_CONNECTION_DISTANCE_KM,
};
pub use output::{
    format_distance, format_duration, RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary,
};
pub use path::{
    find_route_a_star, find_route_a_star_with_limits, find_route_dijkstra,
    find_route_dijkstra_with_limits, PathResult, SearchLimits,
};
pub use points::{load_points, parse_points};
pub use remote::{RemoteRouter, RemoteRoutingConfig};
pub use route_result::RouteResult;
pub use routing::{plan_route, RouteAlgorithm, RoutePlan, RouteRequest};
