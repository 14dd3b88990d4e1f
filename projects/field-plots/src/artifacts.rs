// Field artifact struct definitions
//
// Structs for the JSON documents a survey hands us: the declarative field
// config and the surveyed plot boundary polygons.

use anyhow::{Context, Result};
use geo_types::{LineString, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// A 2D point in the survey's coordinate system
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Surveyed plot boundaries as stored in a boundaries JSON file. Each
/// plot is the exterior ring of its boundary polygon, in file order.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlotBoundaries {
    pub plots: Vec<Vec<Point>>,
}

impl PlotBoundaries {
    /// Converts each surveyed ring into a polygon, preserving file order.
    pub fn to_polygons(&self) -> Vec<Polygon<f64>> {
        self.plots
            .iter()
            .map(|ring| {
                let coords: Vec<(f64, f64)> = ring.iter().map(|p| (p.x, p.y)).collect();
                Polygon::new(LineString::from(coords), vec![])
            })
            .collect()
    }
}

/// Reads a raw field config document, keeping the author's row order.
pub fn load_field_config(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading field config {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing field config {}", path.display()))
}

/// Reads a plot boundaries document.
pub fn load_plot_boundaries(path: &Path) -> Result<PlotBoundaries> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading plot boundaries {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing plot boundaries {}", path.display()))
}
