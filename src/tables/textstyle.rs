//! Text style table entry

use super::TableEntry;
use crate::objects::DxfObject;

/// Text generation flags (code 71)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextGenerationFlags {
    /// Text is backward (mirrored in X)
    pub backward: bool,
    /// Text is upside down (mirrored in Y)
    pub upside_down: bool,
}

impl TextGenerationFlags {
    /// Decode the DXF bit field
    pub fn from_bits(bits: i16) -> Self {
        TextGenerationFlags {
            backward: bits & 0x2 != 0,
            upside_down: bits & 0x4 != 0,
        }
    }

    /// Encode back to the DXF bit field
    pub fn bits(&self) -> i16 {
        let mut bits = 0;
        if self.backward {
            bits |= 0x2;
        }
        if self.upside_down {
            bits |= 0x4;
        }
        bits
    }
}

/// A text style table entry
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Style name
    pub name: String,
    /// Text generation flags
    pub flags: TextGenerationFlags,
    /// Fixed text height (0 = variable)
    pub height: Option<f64>,
    /// Width factor
    pub width_factor: Option<f64>,
    /// Oblique angle in radians
    pub oblique_angle: Option<f64>,
    /// Primary font file name
    pub font_file: Option<String>,
    /// Big font file name (for Asian languages)
    pub big_font_file: Option<String>,
    pub object: DxfObject,
}

impl TextStyle {
    /// Create a new text style
    pub fn new(name: impl Into<String>) -> Self {
        TextStyle {
            name: name.into(),
            flags: TextGenerationFlags::default(),
            height: None,
            width_factor: None,
            oblique_angle: None,
            font_file: None,
            big_font_file: None,
            object: DxfObject::new(),
        }
    }

    /// The built-in "Standard" style
    pub fn standard() -> Self {
        TextStyle {
            font_file: Some("txt".to_string()),
            ..Self::new("Standard")
        }
    }
}

impl TableEntry for TextStyle {
    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> &DxfObject {
        &self.object
    }
}
