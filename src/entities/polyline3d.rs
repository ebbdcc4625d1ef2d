//! 3D polyline entity

use super::EntityCommon;
use crate::types::Vector3;

/// A 3D polyline, collapsed from a heavy POLYLINE and its vertices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline3D {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertex positions
    pub vertices: Vec<Vector3>,
    /// Polyline flags (code 70)
    pub flags: Option<i16>,
}

impl Polyline3D {
    /// Create an empty 3D polyline
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.is_some_and(|f| f & 0x1 != 0)
    }

    /// Total length of the open path
    pub fn length(&self) -> f64 {
        self.vertices.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

super::impl_entity!(Polyline3D, "POLYLINE");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length() {
        let polyline = Polyline3D {
            vertices: vec![
                Vector3::ZERO,
                Vector3::new(0.0, 0.0, 2.0),
                Vector3::new(0.0, 3.0, 2.0),
            ],
            ..Polyline3D::new()
        };
        assert!((polyline.length() - 5.0).abs() < 1e-12);
        assert!(!polyline.is_closed());
    }
}
