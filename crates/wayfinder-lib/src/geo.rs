use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average walking speed assumed by [`estimate_walking_time`], in km/h.
pub const WALKING_SPEED_KMH: f64 = 5.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// Inputs are not validated; NaN components yield a NaN distance.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Walking time in minutes for the given distance at a flat 5 km/h.
pub fn estimate_walking_time(distance_km: f64) -> f64 {
    distance_km / WALKING_SPEED_KMH * 60.0
}

/// Travel time in minutes for the given distance using the mode's average speed.
pub fn estimate_travel_time(distance_km: f64, mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Walking => estimate_walking_time(distance_km),
        _ => distance_km / mode.average_speed_kmh() * 60.0,
    }
}

/// Means of transport used to derive durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Walking,
    Cycling,
    Driving,
}

impl TransportMode {
    /// Average speed in km/h used by the linear time model.
    pub fn average_speed_kmh(self) -> f64 {
        match self {
            TransportMode::Walking => WALKING_SPEED_KMH,
            TransportMode::Cycling => 15.0,
            TransportMode::Driving => 40.0,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TransportMode::Walking => "walking",
            TransportMode::Cycling => "cycling",
            TransportMode::Driving => "driving",
        };
        f.write_str(value)
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walking" | "foot" => Ok(TransportMode::Walking),
            "cycling" | "bike" => Ok(TransportMode::Cycling),
            "driving" | "car" => Ok(TransportMode::Driving),
            other => Err(format!("unknown transport mode '{other}'")),
        }
    }
}
