//! Display-facing route shape shared by graph search and remote routing.
//!
//! A [`RouteResult`] carries distance in metres, duration in seconds and the
//! ordered geometry. Consumers cannot tell whether it came from
//! [`crate::path`] or from a remote street router.

use serde::{Deserialize, Serialize};

use crate::geo::{distance_km, estimate_travel_time, Coordinate, TransportMode};
use crate::path::PathResult;

/// Route ready to be drawn and summarised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub geometry: Vec<Coordinate>,
    #[serde(default)]
    pub mode: TransportMode,
}

impl RouteResult {
    /// Convert a graph-search result using its walking-time estimate.
    pub fn from_path(path: &PathResult) -> Self {
        Self {
            distance_meters: path.total_distance_km * 1000.0,
            duration_seconds: path.estimated_time_min * 60.0,
            geometry: geometry_of(path),
            mode: TransportMode::Walking,
        }
    }

    /// Convert a graph-search result, re-deriving the duration for `mode`.
    pub fn from_path_with_mode(path: &PathResult, mode: TransportMode) -> Self {
        Self {
            distance_meters: path.total_distance_km * 1000.0,
            duration_seconds: estimate_travel_time(path.total_distance_km, mode) * 60.0,
            geometry: geometry_of(path),
            mode,
        }
    }

    /// Wrap a polyline that is already expressed in metres and seconds.
    pub fn from_polyline(
        distance_meters: f64,
        duration_seconds: f64,
        geometry: Vec<Coordinate>,
        mode: TransportMode,
    ) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            geometry,
            mode,
        }
    }

    /// Direct segment between two coordinates, used when no route is available.
    pub fn straight_line(origin: Coordinate, destination: Coordinate, mode: TransportMode) -> Self {
        let km = distance_km(origin, destination);
        Self {
            distance_meters: km * 1000.0,
            duration_seconds: estimate_travel_time(km, mode) * 60.0,
            geometry: vec![origin, destination],
            mode,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// Geometry as `(latitude, longitude)` pairs.
    pub fn polyline(&self) -> Vec<(f64, f64)> {
        self.geometry.iter().map(|c| (c.lat, c.lon)).collect()
    }
}

impl From<&PathResult> for RouteResult {
    fn from(path: &PathResult) -> Self {
        Self::from_path(path)
    }
}

fn geometry_of(path: &PathResult) -> Vec<Coordinate> {
    path.path.iter().map(|node| node.coordinate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_default_graph, Point};
    use crate::path::find_route_a_star;

    fn sample_path() -> PathResult {
        let graph = build_default_graph(&[
            Point::new("a", -33.4372, -70.6506),
            Point::new("b", -33.4380, -70.6480),
            Point::new("c", -33.4395, -70.6450),
        ])
        .expect("graph builds");
        find_route_a_star(&graph, "a", "c").expect("route exists")
    }

    #[test]
    fn path_conversion_scales_units() {
        let path = sample_path();
        let route = RouteResult::from(&path);
        assert!((route.distance_meters - path.total_distance_km * 1000.0).abs() < 1e-9);
        assert!((route.duration_seconds - path.estimated_time_min * 60.0).abs() < 1e-9);
        assert_eq!(route.geometry.len(), path.path.len());
        assert_eq!(route.geometry[0], path.path[0].coordinate);
        assert_eq!(route.mode, TransportMode::Walking);
    }

    #[test]
    fn mode_conversion_shortens_cycling() {
        let path = sample_path();
        let walking = RouteResult::from_path(&path);
        let cycling = RouteResult::from_path_with_mode(&path, TransportMode::Cycling);
        assert_eq!(walking.distance_meters, cycling.distance_meters);
        assert!(cycling.duration_seconds < walking.duration_seconds);
        assert!((cycling.duration_seconds * 3.0 - walking.duration_seconds).abs() < 1e-6);
    }

    #[test]
    fn polyline_passes_through() {
        let geometry = vec![Coordinate::new(1.0, 2.0), Coordinate::new(3.0, 4.0)];
        let route =
            RouteResult::from_polyline(1500.0, 420.0, geometry.clone(), TransportMode::Driving);
        assert_eq!(route.geometry, geometry);
        assert_eq!(route.distance_km(), 1.5);
        assert_eq!(route.duration_minutes(), 7.0);
        assert_eq!(route.polyline(), vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn straight_line_has_two_points() {
        let origin = Coordinate::new(0.0, 0.0);
        let destination = Coordinate::new(0.0, 0.01);
        let route = RouteResult::straight_line(origin, destination, TransportMode::Walking);
        assert_eq!(route.geometry, vec![origin, destination]);
        assert!(route.distance_meters > 1100.0 && route.distance_meters < 1120.0);
    }
}
