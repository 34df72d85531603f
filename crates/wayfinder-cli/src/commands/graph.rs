//! Graph command handler reporting how a points file connects.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use wayfinder_lib::{Graph, GraphBuildOptions};

use crate::commands::route::load_graph;
use crate::output::{render_json, OutputFormat};

/// Arguments for the graph command.
#[derive(Debug, Clone)]
pub struct GraphCommandArgs {
    /// JSON document with the points of interest.
    pub points: PathBuf,
    /// Connection radius in kilometres.
    pub max_distance_km: f64,
}

/// Connectivity figures for a built graph.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphStats {
    pub max_distance_km: f64,
    pub nodes: usize,
    /// Directed edge count; every connection appears once per direction.
    pub edges: usize,
    pub isolated: Vec<String>,
}

impl GraphStats {
    pub fn from_graph(graph: &Graph, max_distance_km: f64) -> Self {
        Self {
            max_distance_km,
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            isolated: graph
                .isolated_nodes()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    fn render_text(&self) -> String {
        let isolated = if self.isolated.is_empty() {
            "none".to_string()
        } else {
            self.isolated.join(", ")
        };
        format!(
            "Graph: {} nodes, {} edges (max distance {} km)\nIsolated: {}\n",
            self.nodes, self.edges, self.max_distance_km, isolated
        )
    }
}

/// Handle the `graph` subcommand.
pub fn handle_graph_command(format: OutputFormat, args: &GraphCommandArgs) -> Result<()> {
    let options = GraphBuildOptions {
        max_connection_distance_km: args.max_distance_km,
    };
    let graph = load_graph(&args.points, &options)?;
    let stats = GraphStats::from_graph(&graph, args.max_distance_km);

    match format {
        OutputFormat::Json => render_json(&stats).context("failed to write graph stats"),
        _ => {
            print!("{}", stats.render_text());
            Ok(())
        }
    }
}
