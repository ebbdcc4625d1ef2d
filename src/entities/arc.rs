//! Arc entity

use super::EntityCommon;
use crate::types::Vector3;
use std::f64::consts::TAU;

/// A circular arc, stored as a start angle and a counter-clockwise sweep
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arc {
    /// Common entity data
    pub common: EntityCommon,
    /// Center point
    pub center: Option<Vector3>,
    /// Radius
    pub radius: Option<f64>,
    /// Start angle in radians
    pub start_angle: Option<f64>,
    /// Sweep in radians, in `[0, 2π)`
    pub sweep: f64,
    /// Thickness (extrusion in Z direction)
    pub thickness: Option<f64>,
    /// Extrusion direction
    pub normal: Option<Vector3>,
}

impl Arc {
    /// Create an empty arc
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter-clockwise sweep from `start` to `end` (radians), in `[0, 2π]`.
    ///
    /// An end exactly one turn after the start is a full circle and keeps
    /// the sweep of `2π`; anything else is wrapped into `[0, 2π)`.
    pub fn sweep_between(start: f64, end: f64) -> f64 {
        let sweep = end - start;
        if (0.0..=TAU).contains(&sweep) {
            sweep
        } else {
            sweep.rem_euclid(TAU)
        }
    }

    /// End angle in radians
    pub fn end_angle(&self) -> f64 {
        self.start_angle.unwrap_or(0.0) + self.sweep
    }
}

super::impl_entity!(Arc, "ARC");
