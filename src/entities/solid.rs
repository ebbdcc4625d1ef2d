//! Solid entity

use super::EntityCommon;
use crate::types::Vector3;

/// A filled triangle or quadrilateral (SOLID)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    /// Common entity data
    pub common: EntityCommon,
    pub first_corner: Option<Vector3>,
    pub second_corner: Option<Vector3>,
    pub third_corner: Option<Vector3>,
    /// Absent for triangles
    pub fourth_corner: Option<Vector3>,
    pub thickness: Option<f64>,
    pub normal: Option<Vector3>,
}

impl Solid {
    /// Create an empty solid
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this is a triangle (fourth corner missing or equal to the third)
    pub fn is_triangle(&self) -> bool {
        match self.fourth_corner {
            None => true,
            Some(fourth) => Some(fourth) == self.third_corner,
        }
    }
}

super::impl_entity!(Solid, "SOLID");
