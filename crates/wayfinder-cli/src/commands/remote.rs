//! Remote command handler delegating to OpenRouteService or OSRM.

use anyhow::{Context, Result};
use tracing::debug;

use wayfinder_lib::{Coordinate, RemoteRouter, RemoteRoutingConfig, TransportMode};

use crate::output::{render_route_result, OutputFormat};

/// Arguments for the remote command.
#[derive(Debug, Clone)]
pub struct RemoteCommandArgs {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Intermediate stops, visited in order.
    pub via: Vec<Coordinate>,
    pub mode: TransportMode,
}

impl RemoteCommandArgs {
    fn waypoints(&self) -> Vec<Coordinate> {
        let mut waypoints = Vec::with_capacity(self.via.len() + 2);
        waypoints.push(self.from);
        waypoints.extend(self.via.iter().copied());
        waypoints.push(self.to);
        waypoints
    }

    fn failure_context(&self) -> String {
        if self.via.is_empty() {
            format!("remote routing from {} to {} failed", self.from, self.to)
        } else {
            format!(
                "remote routing from {} to {} via {} stops ({} waypoints) failed",
                self.from,
                self.to,
                self.via.len(),
                self.via.len() + 2
            )
        }
    }
}

/// Handle the `remote` subcommand.
pub fn handle_remote_command(format: OutputFormat, args: &RemoteCommandArgs) -> Result<()> {
    let router = RemoteRouter::new(RemoteRoutingConfig::from_env())
        .context("failed to create HTTP client")?;
    let config = router.config();
    debug!(
        ors = config.ors_api_key.is_some(),
        osrm = %config.osrm_base_url,
        "remote routing configured"
    );

    let route = if args.via.is_empty() {
        router.route(args.from, args.to, args.mode)
    } else {
        router.route_with_waypoints(&args.waypoints(), args.mode)
    }
    .with_context(|| args.failure_context())?;

    render_route_result("Remote route", &route, format).context("failed to write route output")
}

/// Parse a `lat,lon` pair as given on the command line.
pub fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} is outside -90..=90"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {lon} is outside -180..=180"));
    }
    Ok(Coordinate::new(lat, lon))
}
