//! Attribute entity - block attribute instance attached to an INSERT

use super::{EntityCommon, Text, TextAlignment};

/// Attribute flags (code 70)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributeFlags {
    pub invisible: bool,
    pub constant: bool,
    /// Verification required on input
    pub verify: bool,
    /// Preset, no prompt on insertion
    pub preset: bool,
}

impl AttributeFlags {
    /// Decode the DXF bit field
    pub fn from_bits(bits: i16) -> Self {
        AttributeFlags {
            invisible: bits & 0x1 != 0,
            constant: bits & 0x2 != 0,
            verify: bits & 0x4 != 0,
            preset: bits & 0x8 != 0,
        }
    }
}

/// Attribute entity (ATTRIB).
///
/// The text part is decoded exactly like a TEXT entity; its `common` field
/// is the attribute's common data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeEntity {
    /// Text properties and common entity data
    pub text: Text,
    /// Attribute tag (code 2)
    pub tag: Option<String>,
    pub flags: AttributeFlags,
    /// Field length (code 73)
    pub field_length: Option<i16>,
}

impl AttributeEntity {
    /// Create an empty attribute
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute value
    pub fn value(&self) -> Option<&str> {
        self.text.value.as_deref()
    }

    /// Justification of the attribute text
    pub fn alignment(&self) -> TextAlignment {
        self.text.alignment
    }
}

impl super::Entity for AttributeEntity {
    fn common(&self) -> &EntityCommon {
        &self.text.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.text.common
    }

    fn entity_type(&self) -> &'static str {
        "ATTRIB"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Entity;

    #[test]
    fn test_flags() {
        let flags = AttributeFlags::from_bits(0x9);
        assert!(flags.invisible);
        assert!(flags.preset);
        assert!(!flags.constant);
    }

    #[test]
    fn test_common_is_the_text_common() {
        let mut attribute = AttributeEntity::new();
        attribute.common_mut().paper_space = true;
        assert!(attribute.text.common.paper_space);
        assert_eq!(attribute.entity_type(), "ATTRIB");
        assert_eq!(attribute.value(), None);
    }
}
