use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::Point;

/// Load a JSON array of `{ "id", "lat", "lon", "name"? }` objects from disk.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| Error::PointsLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let points = parse_points(&contents)?;
    debug!(path = %path.display(), count = points.len(), "loaded points");
    Ok(points)
}

/// Parse a JSON array of points.
pub fn parse_points(json: &str) -> Result<Vec<Point>> {
    Ok(serde_json::from_str(json)?)
}
