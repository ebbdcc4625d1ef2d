//! Layer table entry

use super::TableEntry;
use crate::document::LinetypeId;
use crate::objects::DxfObject;
use crate::types::{Color, LineWeight};

/// Layer state flags (code 70, and the sign of code 62)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerFlags {
    /// Layer is off (invisible)
    pub hidden: bool,
    /// Layer is frozen
    pub disabled: bool,
}

impl LayerFlags {
    /// Decode the code 70 bit field
    pub fn from_bits(bits: i16) -> Self {
        LayerFlags {
            hidden: bits & 0x1 != 0,
            disabled: bits & 0x4 != 0,
        }
    }
}

/// A layer table entry
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Layer name
    pub name: String,
    pub description: Option<String>,
    /// Layer flags
    pub flags: LayerFlags,
    /// Layer color
    pub color: Option<Color>,
    /// Resolved line type
    pub line_type: Option<LinetypeId>,
    /// Line weight
    pub line_weight: Option<LineWeight>,
    /// Excluded from plotting (code 290 = 0)
    pub unplottable: bool,
    pub object: DxfObject,
}

impl Layer {
    /// Create a new layer
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            description: None,
            flags: LayerFlags::default(),
            color: None,
            line_type: None,
            line_weight: None,
            unplottable: false,
            object: DxfObject::new(),
        }
    }

    /// Create the default layer "0"
    pub fn layer_0() -> Self {
        Layer {
            color: Some(Color::WHITE),
            ..Self::new("0")
        }
    }

    /// Check if the layer is visible
    pub fn is_visible(&self) -> bool {
        !self.flags.hidden
    }
}

impl TableEntry for Layer {
    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> &DxfObject {
        &self.object
    }
}
