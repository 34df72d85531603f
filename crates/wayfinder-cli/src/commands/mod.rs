// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs only parses arguments and dispatches.

pub mod graph;
pub mod remote;
pub mod route;

use clap::ValueEnum;

use wayfinder_lib::{RouteAlgorithm, TransportMode};

/// Algorithm choices accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    #[value(name = "a-star", alias = "astar")]
    AStar,
    Dijkstra,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
        }
    }
}

/// Transport modes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    #[default]
    #[value(alias = "foot")]
    Walking,
    #[value(alias = "bike")]
    Cycling,
    #[value(alias = "car")]
    Driving,
}

impl From<ModeArg> for TransportMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Walking => TransportMode::Walking,
            ModeArg::Cycling => TransportMode::Cycling,
            ModeArg::Driving => TransportMode::Driving,
        }
    }
}
