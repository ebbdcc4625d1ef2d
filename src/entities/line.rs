//! Line entity

use super::EntityCommon;
use crate::types::Vector3;

/// A line entity defined by two endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line (code 10)
    pub start: Option<Vector3>,
    /// End point of the line (code 11)
    pub end: Option<Vector3>,
    /// Thickness (extrusion in Z direction)
    pub thickness: Option<f64>,
    /// Extrusion direction
    pub normal: Option<Vector3>,
}

impl Line {
    /// Create an empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new line between two points
    pub fn from_points(start: Vector3, end: Vector3) -> Self {
        Line {
            start: Some(start),
            end: Some(end),
            ..Self::new()
        }
    }

    /// Get the length of the line; missing endpoints count as the origin
    pub fn length(&self) -> f64 {
        self.start
            .unwrap_or(Vector3::ZERO)
            .distance(&self.end.unwrap_or(Vector3::ZERO))
    }
}

super::impl_entity!(Line, "LINE");
