//! Bounding box filter values
//!
//! The scenes endpoint takes a `bbox` query parameter as a comma-joined
//! coordinate string. Callers may hand us a geometry, a list of coordinates or
//! an already formatted string; all three are resolved to the query value here.

use std::fmt;

use super::{ClientError, Result};

/// Anything that can report its bounds as `[min_x, min_y, max_x, max_y]`
pub trait HasBounds {
    fn bounds(&self) -> [f64; 4];
}

/// A bounding box in one of the accepted input shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Bbox {
    /// Bounds taken from a geometry
    Bounds([f64; 4]),
    /// Raw coordinate sequence
    Coordinates(Vec<f64>),
    /// Pre-formatted value, passed through unchanged
    Raw(String),
}

impl Bbox {
    /// Bounding box of a geometry
    pub fn of(geometry: &impl HasBounds) -> Self {
        Bbox::Bounds(geometry.bounds())
    }

    /// Render as the comma-joined value the API expects
    pub fn to_query_value(&self) -> String {
        match self {
            Bbox::Bounds(bounds) => join_coordinates(bounds),
            Bbox::Coordinates(coords) => join_coordinates(coords),
            Bbox::Raw(raw) => raw.clone(),
        }
    }

    /// Parse into `[min_x, min_y, max_x, max_y]`
    pub fn to_bounds(&self) -> Result<[f64; 4]> {
        let coords: Vec<f64> = match self {
            Bbox::Bounds(bounds) => return Ok(*bounds),
            Bbox::Coordinates(coords) => coords.clone(),
            Bbox::Raw(raw) => raw
                .split(',')
                .map(|part| {
                    part.trim()
                        .parse::<f64>()
                        .map_err(|e| ClientError::InvalidBbox(format!("{:?}: {}", raw, e)))
                })
                .collect::<Result<_>>()?,
        };

        <[f64; 4]>::try_from(coords.as_slice()).map_err(|_| {
            ClientError::InvalidBbox(format!("expected 4 coordinates, got {}", coords.len()))
        })
    }
}

fn join_coordinates(coords: &[f64]) -> String {
    coords
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

impl From<[f64; 4]> for Bbox {
    fn from(bounds: [f64; 4]) -> Self {
        Bbox::Bounds(bounds)
    }
}

impl From<Vec<f64>> for Bbox {
    fn from(coords: Vec<f64>) -> Self {
        Bbox::Coordinates(coords)
    }
}

impl From<&str> for Bbox {
    fn from(raw: &str) -> Self {
        Bbox::Raw(raw.to_string())
    }
}

impl From<String> for Bbox {
    fn from(raw: String) -> Self {
        Bbox::Raw(raw)
    }
}
