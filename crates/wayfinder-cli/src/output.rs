//! Output formatting for routes and remote results.
//!
//! Every renderer writes to stdout; logs go to stderr so JSON output stays
//! machine-readable.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use wayfinder_lib::{
    format_distance, format_duration, RouteRenderMode, RouteResult, RouteStep, RouteSummary,
};

use crate::terminal::ColorPalette;

/// Output format selected with the global `--format` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary with one line per step.
    #[default]
    Text,
    /// Markdown-flavoured summary.
    Rich,
    /// Minimal path listing with `+`/`|`/`-` prefixes.
    Basic,
    /// Colored listing with start, stop and goal tags.
    Enhanced,
    /// Pretty-printed JSON.
    Json,
}

/// Render a route summary in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(summary),
        OutputFormat::Rich => render_rich(summary),
        OutputFormat::Basic => render_basic(summary),
        OutputFormat::Enhanced => EnhancedRenderer::new(ColorPalette::detect()).render(summary)?,
        OutputFormat::Json => render_json(summary)?,
    }
    Ok(())
}

/// Render a route summary as plain text using the library's renderer.
pub fn render_text(summary: &RouteSummary) {
    print!("{}", summary.render(RouteRenderMode::PlainText));
}

/// Render a route summary in rich text format using the library's renderer.
pub fn render_rich(summary: &RouteSummary) {
    print!("{}", summary.render(RouteRenderMode::RichText));
}

/// Render any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Render a route summary in basic path format.
///
/// Uses `+`/`|`/`-` prefixes for first/middle/last steps.
pub fn render_basic(summary: &RouteSummary) {
    print!("{}", format_basic(summary));
}

fn format_basic(summary: &RouteSummary) -> String {
    let len = summary.steps.len();
    let mut buffer = String::new();
    for (i, step) in summary.steps.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        buffer.push_str(&format!("{} {}\n", prefix, step.id));
    }
    buffer.push_str(&format!(
        "{} by {}\n",
        format_distance(summary.distance_meters),
        summary.mode
    ));
    buffer
}

/// Render a route produced outside the local graph (remote router or
/// straight-line fallback).
///
/// # Errors
///
/// Returns an error if JSON serialization or writing to stdout fails.
pub fn render_route_result(
    label: &str,
    route: &RouteResult,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(route),
        OutputFormat::Rich => {
            println!("**{}** _{}_", label, describe_route_result(route));
            Ok(())
        }
        _ => {
            println!("{}: {}", label, describe_route_result(route));
            Ok(())
        }
    }
}

fn describe_route_result(route: &RouteResult) -> String {
    format!(
        "{} by {} in {} ({} points)",
        format_distance(route.distance_meters),
        route.mode,
        format_duration(route.duration_seconds),
        route.geometry.len()
    )
}

/// Colored renderer that tags the start, intermediate stops and goal.
#[derive(Debug, Clone, Copy)]
pub struct EnhancedRenderer {
    palette: ColorPalette,
}

impl EnhancedRenderer {
    /// Create a new enhanced renderer with the given color palette.
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    /// Render a route summary to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn render(&self, summary: &RouteSummary) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle, summary)
    }

    /// Render a route summary into any writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_to<W: Write>(&self, out: &mut W, summary: &RouteSummary) -> io::Result<()> {
        let p = &self.palette;
        writeln!(
            out,
            "Route from {}{}{} to {}{}{} ({} hops):",
            p.white_bold,
            summary.start.name.as_deref().unwrap_or(&summary.start.id),
            p.reset,
            p.white_bold,
            summary.goal.name.as_deref().unwrap_or(&summary.goal.id),
            p.reset,
            summary.hops
        )?;

        let len = summary.steps.len();
        for (i, step) in summary.steps.iter().enumerate() {
            self.write_step(out, step, i == 0, i + 1 == len)?;
        }

        writeln!(
            out,
            "{}Total:{} {}{}{} by {}, about {}",
            p.gray,
            p.reset,
            p.cyan,
            format_distance(summary.distance_meters),
            p.reset,
            summary.mode,
            format_duration(summary.duration_seconds)
        )
    }

    fn write_step<W: Write>(
        &self,
        out: &mut W,
        step: &RouteStep,
        is_first: bool,
        is_last: bool,
    ) -> io::Result<()> {
        let p = &self.palette;
        let (tag_color, tag_text) = self.step_tag(is_first, is_last);
        let name = step.name.as_deref().unwrap_or(&step.id);

        write!(
            out,
            "{}{}{} {}{}{} {}[{}]{}",
            tag_color, tag_text, p.reset, p.white_bold, name, p.reset, p.gray, step.id, p.reset
        )?;
        if is_first {
            writeln!(out)
        } else {
            writeln!(
                out,
                " {}+{}{}",
                p.green,
                format_distance(step.leg_km * 1000.0),
                p.reset
            )
        }
    }

    fn step_tag(&self, is_first: bool, is_last: bool) -> (&str, &str) {
        let p = &self.palette;
        if is_first {
            (p.tag_start, " STRT ")
        } else if is_last {
            (p.tag_goal, " GOAL ")
        } else {
            (p.tag_stop, " STOP ")
        }
    }
}
