use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Wayfinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier is not present in the graph.
    #[error("unknown node: {id}{}", format_suggestions(.suggestions))]
    UnknownNode { id: String, suggestions: Vec<String> },

    /// Raised when the search exhausted the graph without reaching the goal.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a search expanded more nodes than its budget allows.
    #[error("search between {start} and {goal} gave up after {limit} expansions")]
    SearchExhausted {
        start: String,
        goal: String,
        limit: usize,
    },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when two input points share the same identifier.
    #[error("duplicate point identifier: {id}")]
    DuplicateNode { id: String },

    /// Raised when an adjacency list breaks the graph invariants.
    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        reason: &'static str,
    },

    /// Raised when a multi-stop route is requested with fewer than two stops.
    #[error("at least two waypoints are required, got {count}")]
    NotEnoughWaypoints { count: usize },

    /// Raised when neither remote routing provider produced a usable route.
    #[error("remote routing unavailable: {reason}")]
    RemoteRouteUnavailable { reason: String },

    /// Raised when a points document could not be read from disk.
    #[error("failed to read points from {path}: {source}")]
    PointsLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
