//! Text entity

use super::EntityCommon;
use crate::document::StyleId;
use crate::types::Vector3;

/// Justification of a single-line text, combining the horizontal (72) and
/// vertical (73) alignment codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    /// Fit between two points, height scaled
    Aligned,
    Middle,
    /// Fit between two points, height kept
    Fit,
    BottomLeft,
    BottomCenter,
    BottomRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    TopLeft,
    TopCenter,
    TopRight,
}

impl TextAlignment {
    /// Resolve a horizontal/vertical code pair.
    ///
    /// Baseline text (vertical 0) knows six horizontal modes; the bottom,
    /// middle and top bands only left, center and right. Any other pair
    /// returns `None`.
    pub fn from_codes(horizontal: i16, vertical: i16) -> Option<Self> {
        use TextAlignment::*;
        let alignment = match (vertical, horizontal) {
            (0, 0) => Left,
            (0, 1) => Center,
            (0, 2) => Right,
            (0, 3) => Aligned,
            (0, 4) => Middle,
            (0, 5) => Fit,
            (1, 0) => BottomLeft,
            (1, 1) => BottomCenter,
            (1, 2) => BottomRight,
            (2, 0) => MiddleLeft,
            (2, 1) => MiddleCenter,
            (2, 2) => MiddleRight,
            (3, 0) => TopLeft,
            (3, 1) => TopCenter,
            (3, 2) => TopRight,
            _ => return None,
        };
        Some(alignment)
    }
}

/// A single-line text entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    /// Common entity data
    pub common: EntityCommon,
    /// Text content
    pub value: Option<String>,
    /// First alignment point (code 10)
    pub position: Option<Vector3>,
    /// Second alignment point (code 11)
    pub alignment_point: Option<Vector3>,
    /// Text height
    pub height: Option<f64>,
    /// Rotation angle in radians
    pub rotation: Option<f64>,
    /// Width scale factor
    pub width_factor: Option<f64>,
    /// Oblique angle in radians
    pub oblique_angle: Option<f64>,
    /// Resolved text style (code 7)
    pub style: Option<StyleId>,
    pub alignment: TextAlignment,
    /// Text generation flags (code 71)
    pub generation: Option<i16>,
    pub thickness: Option<f64>,
    pub normal: Option<Vector3>,
}

impl Text {
    /// Create an empty text
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a text with content at a position
    pub fn with_value(value: impl Into<String>, position: Vector3) -> Self {
        Text {
            value: Some(value.into()),
            position: Some(position),
            ..Self::new()
        }
    }
}

super::impl_entity!(Text, "TEXT");
