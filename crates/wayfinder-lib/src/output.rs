use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::{Coordinate, TransportMode};
use crate::graph::Node;
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Human-readable distance: whole metres below a kilometre, one decimal above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round())
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

/// Human-readable duration in seconds, minutes, or hours and minutes.
pub fn format_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{} sec", seconds.round())
    } else if seconds < 3600.0 {
        format!("{} min", (seconds / 60.0).round())
    } else {
        let hours = (seconds / 3600.0).floor();
        let minutes = ((seconds % 3600.0) / 60.0).round();
        format!("{hours}h {minutes}min")
    }
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coordinate: Coordinate,
}

impl RouteEndpoint {
    fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            coordinate: node.coordinate,
        }
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub coordinate: Coordinate,
    /// Distance from the previous step in kilometres (zero for the first step).
    pub leg_km: f64,
    pub cumulative_km: f64,
}

impl RouteStep {
    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub mode: TransportMode,
    pub hops: usize,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with per-leg distances.
    pub fn from_plan(plan: &RoutePlan) -> Result<Self> {
        let nodes = &plan.path.path;
        let (Some(first), Some(last)) = (plan.path.start(), plan.path.goal()) else {
            return Err(Error::EmptyRoutePlan);
        };

        let mut cumulative_km = 0.0;
        let mut previous: Option<&Node> = None;
        let mut steps = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let leg_km = previous
                .map(|prev| prev.coordinate.distance_to(&node.coordinate))
                .unwrap_or(0.0);
            cumulative_km += leg_km;
            steps.push(RouteStep {
                index,
                id: node.id.clone(),
                name: node.name.clone(),
                coordinate: node.coordinate,
                leg_km,
                cumulative_km,
            });
            previous = Some(node);
        }

        let route = plan.to_route_result();
        Ok(Self {
            algorithm: plan.algorithm,
            mode: plan.mode,
            hops: plan.hop_count(),
            distance_meters: route.distance_meters,
            duration_seconds: route.duration_seconds,
            start: RouteEndpoint::from_node(first),
            goal: RouteEndpoint::from_node(last),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.algorithm
        );
        let _ = writeln!(
            buffer,
            "Distance: {}, {}: {}",
            format_distance(self.distance_meters),
            self.mode,
            format_duration(self.duration_seconds)
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) +{}",
                step.index,
                step.display_name(),
                step.id,
                format_distance(step.leg_km * 1000.0)
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} to {}_ ({} hops, algorithm: `{}`)",
            self.start.display_name(),
            self.goal.display_name(),
            self.hops,
            self.algorithm
        );
        let _ = writeln!(
            buffer,
            "_{} by {} in {}_",
            format_distance(self.distance_meters),
            self.mode,
            format_duration(self.duration_seconds)
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`)",
                step.index,
                step.display_name(),
                step.id
            );
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_default_graph, Point};
    use crate::routing::{plan_route, RouteRequest};

    #[test]
    fn distances_switch_to_kilometres() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(12_345.0), "12.3 km");
    }

    #[test]
    fn durations_pick_units() {
        assert_eq!(format_duration(42.4), "42 sec");
        assert_eq!(format_duration(60.0), "1 min");
        assert_eq!(format_duration(1_770.0), "30 min");
        assert_eq!(format_duration(3_600.0), "1h 0min");
        assert_eq!(format_duration(5_430.0), "1h 31min");
    }

    #[test]
    fn summary_accumulates_legs() {
        let graph = build_default_graph(&[
            Point::new("a", 0.0, 0.0).with_name("Alpha"),
            Point::new("b", 0.0, 0.003),
            Point::new("c", 0.0, 0.006).with_name("Gamma"),
        ])
        .expect("graph builds");
        let plan = plan_route(&graph, &RouteRequest::new("a", "c")).expect("route exists");
        let summary = RouteSummary::from_plan(&plan).expect("summary");

        assert_eq!(summary.hops, 2);
        assert_eq!(summary.steps[0].leg_km, 0.0);
        let last = summary.steps.last().expect("steps");
        assert!((last.cumulative_km - plan.path.total_distance_km).abs() < 1e-9);
        assert!((summary.distance_meters - plan.path.total_distance_km * 1000.0).abs() < 1e-9);

        let text = summary.render(RouteRenderMode::PlainText);
        assert!(text.starts_with("Route: Alpha -> Gamma (2 hops, algorithm: a-star)"));
        assert!(text.contains("  1: b (b)"));

        let rich = summary.render(RouteRenderMode::RichText);
        assert!(rich.contains("**Gamma**"));
    }
}
