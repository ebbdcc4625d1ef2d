//! 2D polyline and polyline vertex entities

use super::EntityCommon;
use crate::types::Vector3;

/// A 2D polyline.
///
/// Both LWPOLYLINE and 2D heavy POLYLINE records decode to this shape.
/// Each vertex stores x and y in the usual components and the bulge of the
/// segment that starts at it in `z`; the plane height lives in `elevation`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    /// Common entity data
    pub common: EntityCommon,
    /// Vertices as (x, y, bulge)
    pub vertices: Vec<Vector3>,
    /// Polyline flags (code 70); bit 1 marks a closed polyline
    pub flags: Option<i16>,
    /// Constant width
    pub width: Option<f64>,
    /// Elevation of the polyline plane
    pub elevation: Option<f64>,
    /// Thickness (extrusion in Z direction)
    pub thickness: Option<f64>,
    /// Extrusion direction
    pub normal: Option<Vector3>,
}

impl Polyline {
    /// Create an empty polyline
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the polyline is closed
    pub fn is_closed(&self) -> bool {
        self.flags.is_some_and(|f| f & 0x1 != 0)
    }

    /// Bulge of the segment starting at vertex `index`
    pub fn bulge(&self, index: usize) -> Option<f64> {
        self.vertices.get(index).map(|v| v.z)
    }
}

super::impl_entity!(Polyline, "LWPOLYLINE");

/// Vertex subclass declared by a VERTEX record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VertexKind {
    /// No specific subclass (legacy files)
    #[default]
    Generic,
    Polyline2D,
    Polyline3D,
    PolygonMesh,
    PolyFaceMesh,
}

impl VertexKind {
    /// Map a vertex subclass marker
    pub fn from_subclass(name: &str) -> Self {
        match name {
            "AcDb2dVertex" => VertexKind::Polyline2D,
            "AcDb3dPolylineVertex" => VertexKind::Polyline3D,
            "AcDbPolygonMeshVertex" => VertexKind::PolygonMesh,
            "AcDbPolyFaceMeshVertex" | "AcDbFaceRecord" => VertexKind::PolyFaceMesh,
            _ => VertexKind::Generic,
        }
    }
}

/// One VERTEX record of a heavy polyline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vertex {
    /// Common entity data
    pub common: EntityCommon,
    pub kind: VertexKind,
    /// Location (code 10)
    pub position: Option<Vector3>,
    pub start_width: Option<f64>,
    pub end_width: Option<f64>,
    pub bulge: Option<f64>,
    /// Vertex flags (code 70)
    pub flags: Option<i16>,
    /// Curve-fit tangent direction in radians
    pub tangent: Option<f64>,
    /// Vertex identifier (code 91)
    pub identifier: Option<i32>,
}

impl Vertex {
    /// Create an empty vertex
    pub fn new() -> Self {
        Self::default()
    }
}

super::impl_entity!(Vertex, "VERTEX");
