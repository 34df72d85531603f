use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wayfinder_cli::commands::graph::{handle_graph_command, GraphCommandArgs};
use wayfinder_cli::commands::remote::{handle_remote_command, parse_coordinate, RemoteCommandArgs};
use wayfinder_cli::commands::route::{handle_route_command, RouteCommandArgs};
use wayfinder_cli::commands::{AlgorithmArg, ModeArg};
use wayfinder_cli::output::OutputFormat;
use wayfinder_lib::{Coordinate, DEFAULT_MAX_CONNECTION_DISTANCE_KM};

#[derive(Parser, Debug)]
#[command(author, version, about = "Point-of-interest routing utilities")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a route between two points of interest.
    Route {
        /// JSON file with the points of interest.
        #[arg(long)]
        points: PathBuf,
        /// Starting point identifier.
        #[arg(long = "from")]
        from: String,
        /// Destination point identifier.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Transport mode used for the duration estimate.
        #[arg(long, value_enum, default_value_t = ModeArg::Walking)]
        mode: ModeArg,
        /// Connect points closer than this many kilometres.
        #[arg(long, default_value_t = DEFAULT_MAX_CONNECTION_DISTANCE_KM)]
        max_distance: f64,
        /// Give up after expanding this many nodes.
        #[arg(long)]
        max_expansions: Option<usize>,
        /// Print a straight line between the endpoints when no route exists.
        #[arg(long)]
        straight_line_fallback: bool,
    },
    /// Report how the points connect at a given radius.
    Graph {
        /// JSON file with the points of interest.
        #[arg(long)]
        points: PathBuf,
        /// Connect points closer than this many kilometres.
        #[arg(long, default_value_t = DEFAULT_MAX_CONNECTION_DISTANCE_KM)]
        max_distance: f64,
    },
    /// Ask a remote street router (OpenRouteService, then OSRM) for a route.
    Remote {
        /// Origin as `lat,lon`.
        #[arg(long = "from", value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,
        /// Destination as `lat,lon`.
        #[arg(long = "to", value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
        /// Intermediate stop as `lat,lon`; repeat for several.
        #[arg(long = "via", value_parser = parse_coordinate, allow_hyphen_values = true)]
        via: Vec<Coordinate>,
        /// Transport mode.
        #[arg(long, value_enum, default_value_t = ModeArg::Walking)]
        mode: ModeArg,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            points,
            from,
            to,
            algorithm,
            mode,
            max_distance,
            max_expansions,
            straight_line_fallback,
        } => handle_route_command(
            cli.format,
            &RouteCommandArgs {
                points,
                from,
                to,
                algorithm: algorithm.into(),
                mode: mode.into(),
                max_distance_km: max_distance,
                max_expansions,
                straight_line_fallback,
            },
        ),
        Command::Graph {
            points,
            max_distance,
        } => handle_graph_command(
            cli.format,
            &GraphCommandArgs {
                points,
                max_distance_km: max_distance,
            },
        ),
        Command::Remote {
            from,
            to,
            via,
            mode,
        } => handle_remote_command(
            cli.format,
            &RemoteCommandArgs {
                from,
                to,
                via,
                mode: mode.into(),
            },
        ),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
