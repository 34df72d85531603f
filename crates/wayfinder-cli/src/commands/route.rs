//! Route command handler for computing paths between points of interest.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use wayfinder_lib::{
    build_graph, load_points, plan_route, Error as RouteError, Graph, GraphBuildOptions,
    RouteAlgorithm, RouteRequest, RouteResult, RouteSummary, SearchLimits, TransportMode,
};

use crate::output::{render_route, render_route_result, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// JSON document with the points of interest.
    pub points: PathBuf,
    /// Starting point identifier.
    pub from: String,
    /// Destination point identifier.
    pub to: String,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Transport mode used for the duration estimate.
    pub mode: TransportMode,
    /// Connection radius in kilometres.
    pub max_distance_km: f64,
    /// Optional cap on node expansions.
    pub max_expansions: Option<usize>,
    /// Print a straight line when the points are not connected.
    pub straight_line_fallback: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library [`RouteRequest`].
    pub fn to_request(&self) -> RouteRequest {
        let limits = match self.max_expansions {
            Some(limit) => SearchLimits::with_max_expansions(limit),
            None => SearchLimits::unbounded(),
        };
        RouteRequest::new(self.from.clone(), self.to.clone())
            .with_algorithm(self.algorithm)
            .with_mode(self.mode)
            .with_limits(limits)
    }

    fn build_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            max_connection_distance_km: self.max_distance_km,
        }
    }
}

/// Handle the `route` subcommand.
pub fn handle_route_command(format: OutputFormat, args: &RouteCommandArgs) -> Result<()> {
    let graph = load_graph(&args.points, &args.build_options())?;
    let request = args.to_request();

    match plan_route(&graph, &request) {
        Ok(plan) => {
            let summary =
                RouteSummary::from_plan(&plan).context("failed to summarise route plan")?;
            render_route(&summary, format).context("failed to write route output")
        }
        Err(RouteError::RouteNotFound { start, goal }) if args.straight_line_fallback => {
            warn!(%start, %goal, "points are not connected; using a straight line");
            let route = straight_line_between(&graph, &start, &goal, args.mode)?;
            render_route_result("Straight line", &route, format)
                .context("failed to write route output")
        }
        Err(err) => Err(handle_route_failure(args, err)),
    }
}

/// Load a points file and connect it into a graph.
pub(crate) fn load_graph(path: &std::path::Path, options: &GraphBuildOptions) -> Result<Graph> {
    let radius = options.max_connection_distance_km;
    if radius.is_nan() || radius < 0.0 {
        anyhow::bail!(
            "--max-distance must be a non-negative number of kilometres, got {}",
            radius
        );
    }

    let points = load_points(path).context("failed to load points")?;
    let graph = build_graph(&points, options)
        .with_context(|| format!("failed to build graph from {}", path.display()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        max_distance_km = options.max_connection_distance_km,
        "graph ready"
    );
    Ok(graph)
}

fn straight_line_between(
    graph: &Graph,
    start: &str,
    goal: &str,
    mode: TransportMode,
) -> Result<RouteResult> {
    let origin = graph.resolve(start)?;
    let destination = graph.resolve(goal)?;
    Ok(RouteResult::straight_line(
        origin.coordinate,
        destination.coordinate,
        mode,
    ))
}

fn handle_route_failure(args: &RouteCommandArgs, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownNode { id, suggestions } => {
            anyhow::anyhow!(format_unknown_point_message(&id, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(
                &start,
                &goal,
                args.max_distance_km
            ))
        }
        RouteError::SearchExhausted { start, goal, limit } => anyhow::anyhow!(
            "Search between {} and {} gave up after {} expansions. Raise --max-expansions or omit it.",
            start,
            goal,
            limit
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_point_message(id: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown point '{}'.", id);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str, max_distance_km: f64) -> String {
    format!(
        "No route found between {} and {}. Try increasing --max-distance (currently {} km) \
         or pass --straight-line-fallback.",
        start, goal, max_distance_km
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            points: PathBuf::from("points.json"),
            from: "plaza".to_string(),
            to: "museum".to_string(),
            algorithm: RouteAlgorithm::Dijkstra,
            mode: TransportMode::Cycling,
            max_distance_km: 0.8,
            max_expansions: Some(12),
            straight_line_fallback: false,
        }
    }

    #[test]
    fn request_carries_cli_options() {
        let request = args().to_request();
        assert_eq!(request.start, "plaza");
        assert_eq!(request.goal, "museum");
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(request.mode, TransportMode::Cycling);
        assert_eq!(request.limits.max_expansions, Some(12));
    }

    #[test]
    fn unknown_point_message_lists_suggestions() {
        assert_eq!(format_unknown_point_message("x", &[]), "Unknown point 'x'.");
        assert_eq!(
            format_unknown_point_message("musem", &["museum".to_string()]),
            "Unknown point 'musem'. Did you mean 'museum'?"
        );
        assert_eq!(
            format_unknown_point_message("m", &["museum".to_string(), "market".to_string()]),
            "Unknown point 'm'. Did you mean one of: 'museum', 'market'?"
        );
    }

    #[test]
    fn route_not_found_mentions_radius() {
        let message = format_route_not_found_message("a", "b", 0.5);
        assert!(message.starts_with("No route found between a and b."));
        assert!(message.contains("currently 0.5 km"));
    }

    #[test]
    fn negative_radius_is_rejected() {
        let options = GraphBuildOptions {
            max_connection_distance_km: -1.0,
        };
        let err = load_graph(std::path::Path::new("missing.json"), &options)
            .expect_err("negative radius fails");
        assert!(err.to_string().contains("--max-distance"));
    }
}
