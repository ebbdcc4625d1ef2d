//! Circle entity

use super::EntityCommon;
use crate::types::Vector3;
use std::f64::consts::PI;

/// A circle entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Option<Vector3>,
    /// Radius
    pub radius: Option<f64>,
    /// Thickness (extrusion in Z direction)
    pub thickness: Option<f64>,
    /// Extrusion direction
    pub normal: Option<Vector3>,
}

impl Circle {
    /// Create an empty circle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circle from center and radius
    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Circle {
            center: Some(center),
            radius: Some(radius),
            ..Self::new()
        }
    }

    /// Circumference, if the radius is known
    pub fn circumference(&self) -> Option<f64> {
        self.radius.map(|r| 2.0 * PI * r)
    }
}

super::impl_entity!(Circle, "CIRCLE");
