//! Street-level routing through OpenRouteService with an OSRM fallback.
//!
//! The client never reads process state on its own; callers build a
//! [`RemoteRoutingConfig`] (optionally via [`RemoteRoutingConfig::from_env`])
//! and hand it to [`RemoteRouter::new`]. Responses are normalised into the
//! same [`RouteResult`] produced from graph search.

use std::env;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::{Coordinate, TransportMode};
use crate::route_result::RouteResult;

pub const DEFAULT_ORS_BASE_URL: &str = "https://api.openrouteservice.org/v2/directions";
pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

const ORS_API_KEY_ENV: &str = "WAYFINDER_ORS_API_KEY";
const ORS_BASE_URL_ENV: &str = "WAYFINDER_ORS_BASE_URL";
const OSRM_BASE_URL_ENV: &str = "WAYFINDER_OSRM_BASE_URL";

const ORS_ACCEPT: &str =
    "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

/// OSRM only offers driving and foot profiles publicly; cycling reuses the
/// driving route and stretches its duration by this factor.
const CYCLING_DURATION_FACTOR: f64 = 2.5;

/// Connection settings for the remote routing providers.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteRoutingConfig {
    /// OpenRouteService key. When absent or empty only OSRM is queried.
    pub ors_api_key: Option<String>,
    pub ors_base_url: String,
    pub osrm_base_url: String,
    pub timeout: Duration,
}

impl Default for RemoteRoutingConfig {
    fn default() -> Self {
        Self {
            ors_api_key: None,
            ors_base_url: DEFAULT_ORS_BASE_URL.to_string(),
            osrm_base_url: DEFAULT_OSRM_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RemoteRoutingConfig {
    /// Read `WAYFINDER_ORS_API_KEY`, `WAYFINDER_ORS_BASE_URL` and
    /// `WAYFINDER_OSRM_BASE_URL`, keeping defaults for unset values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ors_api_key: env::var(ORS_API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            ors_base_url: env::var(ORS_BASE_URL_ENV).unwrap_or(defaults.ors_base_url),
            osrm_base_url: env::var(OSRM_BASE_URL_ENV).unwrap_or(defaults.osrm_base_url),
            timeout: defaults.timeout,
        }
    }

    pub fn with_ors_api_key(mut self, key: impl Into<String>) -> Self {
        self.ors_api_key = Some(key.into());
        self
    }

    fn ors_key(&self) -> Option<&str> {
        self.ors_api_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// Blocking client for remote street routing.
#[derive(Debug, Clone)]
pub struct RemoteRouter {
    client: Client,
    config: RemoteRoutingConfig,
}

impl RemoteRouter {
    pub fn new(config: RemoteRoutingConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("wayfinder/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteRoutingConfig {
        &self.config
    }

    /// Route between two coordinates.
    ///
    /// OpenRouteService is tried first when a key is configured; any failure
    /// there falls through to a single OSRM request.
    pub fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RouteResult> {
        match self.config.ors_key() {
            Some(key) => match self.fetch_ors(key, origin, destination, mode) {
                Ok(route) => return Ok(route),
                Err(err) => {
                    warn!(
                        error = %err,
                        %mode,
                        "openrouteservice request failed; falling back to OSRM"
                    );
                }
            },
            None => info!("no OpenRouteService key configured; using OSRM"),
        }

        self.fetch_osrm(&[origin, destination], mode)
    }

    /// Route through every waypoint in order using OSRM.
    pub fn route_with_waypoints(
        &self,
        waypoints: &[Coordinate],
        mode: TransportMode,
    ) -> Result<RouteResult> {
        if waypoints.len() < 2 {
            return Err(Error::NotEnoughWaypoints {
                count: waypoints.len(),
            });
        }
        self.fetch_osrm(waypoints, mode)
    }

    fn fetch_ors(
        &self,
        key: &str,
        origin: Coordinate,
        destination: Coordinate,
        mode: TransportMode,
    ) -> Result<RouteResult> {
        let url = ors_url(&self.config.ors_base_url, mode, origin, destination);
        debug!(%url, "requesting openrouteservice route");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, ORS_ACCEPT)
            .header(AUTHORIZATION, key)
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteRouteUnavailable {
                reason: format!("openrouteservice returned {status}"),
            });
        }

        parse_ors_response(&response.text()?, mode)
    }

    fn fetch_osrm(&self, waypoints: &[Coordinate], mode: TransportMode) -> Result<RouteResult> {
        let url = osrm_url(&self.config.osrm_base_url, mode, waypoints);
        debug!(%url, "requesting OSRM route");

        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::RemoteRouteUnavailable {
                reason: format!("OSRM returned {status}"),
            });
        }

        parse_osrm_response(&response.text()?, mode)
    }
}

fn ors_profile(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walking => "foot-walking",
        TransportMode::Cycling => "cycling-regular",
        TransportMode::Driving => "driving-car",
    }
}

fn osrm_profile(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walking => "foot",
        TransportMode::Cycling | TransportMode::Driving => "driving",
    }
}

fn ors_url(base: &str, mode: TransportMode, origin: Coordinate, destination: Coordinate) -> String {
    format!(
        "{}/{}?start={},{}&end={},{}",
        base.trim_end_matches('/'),
        ors_profile(mode),
        origin.lon,
        origin.lat,
        destination.lon,
        destination.lat
    )
}

fn osrm_url(base: &str, mode: TransportMode, waypoints: &[Coordinate]) -> String {
    let coordinates = waypoints
        .iter()
        .map(|wp| format!("{},{}", wp.lon, wp.lat))
        .collect::<Vec<_>>()
        .join(";");
    format!(
        "{}/route/v1/{}/{}?overview=full&geometries=geojson",
        base.trim_end_matches('/'),
        osrm_profile(mode),
        coordinates
    )
}

#[derive(Debug, Deserialize)]
struct OrsResponse {
    #[serde(default)]
    features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    properties: OrsProperties,
    geometry: LineString,
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

#[derive(Debug, Deserialize)]
struct OrsSummary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: LineString,
}

/// GeoJSON line geometry with `[lon, lat]` positions.
#[derive(Debug, Deserialize)]
struct LineString {
    coordinates: Vec<[f64; 2]>,
}

impl LineString {
    fn into_coordinates(self) -> Vec<Coordinate> {
        self.coordinates
            .into_iter()
            .map(|[lon, lat]| Coordinate::new(lat, lon))
            .collect()
    }
}

/// Normalise an OpenRouteService GeoJSON directions response.
pub fn parse_ors_response(body: &str, mode: TransportMode) -> Result<RouteResult> {
    let response: OrsResponse = serde_json::from_str(body)?;
    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or_else(|| Error::RemoteRouteUnavailable {
            reason: "openrouteservice returned no routes".to_string(),
        })?;

    Ok(RouteResult::from_polyline(
        feature.properties.summary.distance,
        feature.properties.summary.duration,
        feature.geometry.into_coordinates(),
        mode,
    ))
}

/// Normalise an OSRM route response, adjusting the duration for cycling.
pub fn parse_osrm_response(body: &str, mode: TransportMode) -> Result<RouteResult> {
    let response: OsrmResponse = serde_json::from_str(body)?;
    if response.code != "Ok" {
        return Err(Error::RemoteRouteUnavailable {
            reason: format!("OSRM responded with code {}", response.code),
        });
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::RemoteRouteUnavailable {
            reason: "OSRM returned no routes".to_string(),
        })?;

    let duration = match mode {
        TransportMode::Cycling => route.duration * CYCLING_DURATION_FACTOR,
        _ => route.duration,
    };

    Ok(RouteResult::from_polyline(
        route.distance,
        duration,
        route.geometry.into_coordinates(),
        mode,
    ))
}
