//! Line type table entry

use super::TableEntry;
use crate::objects::DxfObject;
use crate::types::{Handle, Vector2};
use bitflags::bitflags;

bitflags! {
    /// Complex element type (code 74).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineTypeElementFlags: i16 {
        /// Rotation is absolute rather than relative to the line.
        const ABSOLUTE_ROTATION = 0x1;
        /// Element is a text string.
        const TEXT = 0x2;
        /// Element is a shape from a shape file.
        const SHAPE = 0x4;
    }
}

/// One dash, dot, space or embedded shape/text of a line type pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineTypeElement {
    /// Length of the element (positive = dash, negative = space, 0 = dot)
    pub length: f64,
    /// Complex element type; absent for plain dashes
    pub flags: Option<LineTypeElementFlags>,
    /// Shape number, or text index when [`LineTypeElementFlags::TEXT`] is set
    pub shape_number: Option<i16>,
    /// Text style or shape file reference
    pub style: Option<Handle>,
    pub scale: Option<f64>,
    /// Rotation in radians
    pub rotation: Option<f64>,
    pub offset: Option<Vector2>,
    /// Embedded text (code 9)
    pub text: Option<String>,
}

impl LineTypeElement {
    /// Create a simple dash, space or dot element
    pub fn new(length: f64) -> Self {
        LineTypeElement {
            length,
            ..Default::default()
        }
    }

    /// Check if this is a dash
    pub fn is_dash(&self) -> bool {
        self.length > 0.0
    }

    /// Check if this is a space
    pub fn is_space(&self) -> bool {
        self.length < 0.0
    }

    /// Check if this is a dot
    pub fn is_dot(&self) -> bool {
        self.length == 0.0
    }

    /// Whether the element embeds text or a shape
    pub fn is_complex(&self) -> bool {
        self.flags
            .is_some_and(|f| f.intersects(LineTypeElementFlags::TEXT | LineTypeElementFlags::SHAPE))
    }
}

/// A line type table entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineType {
    /// Line type name
    pub name: String,
    pub description: Option<String>,
    /// Pattern elements in drawing order
    pub elements: Vec<LineTypeElement>,
    /// Total pattern length (code 40)
    pub pattern_length: Option<f64>,
    /// Alignment code (72), always 'A' in practice
    pub alignment: Option<i16>,
    pub object: DxfObject,
}

impl LineType {
    /// Create a new line type
    pub fn new(name: impl Into<String>) -> Self {
        LineType {
            name: name.into(),
            description: None,
            elements: Vec::new(),
            pattern_length: None,
            alignment: None,
            object: DxfObject::new(),
        }
    }

    /// The built-in "Continuous" line type
    pub fn continuous() -> Self {
        LineType {
            description: Some("Solid line".to_string()),
            ..Self::new("Continuous")
        }
    }

    /// The built-in "ByLayer" line type
    pub fn by_layer() -> Self {
        Self::new("ByLayer")
    }

    /// The built-in "ByBlock" line type
    pub fn by_block() -> Self {
        Self::new("ByBlock")
    }

    /// Check if the pattern is empty (solid line)
    pub fn is_continuous(&self) -> bool {
        self.elements.is_empty()
    }
}

impl TableEntry for LineType {
    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> &DxfObject {
        &self.object
    }
}
