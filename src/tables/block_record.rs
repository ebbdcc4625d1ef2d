//! Block record table entry

use super::TableEntry;
use crate::entities::EntityType;
use crate::objects::DxfObject;
use crate::types::{Handle, Vector3};

/// Block type flags (code 70 of BLOCK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockFlags {
    /// Block is anonymous
    pub anonymous: bool,
    /// Block has attribute definitions
    pub has_attributes: bool,
    /// Block is external reference (xref)
    pub is_xref: bool,
    /// Block is xref overlay
    pub is_xref_overlay: bool,
    /// Block is from external reference
    pub is_external: bool,
}

impl BlockFlags {
    /// Decode the DXF bit field
    pub fn from_bits(bits: i16) -> Self {
        BlockFlags {
            anonymous: bits & 0x1 != 0,
            has_attributes: bits & 0x2 != 0,
            is_xref: bits & 0x4 != 0,
            is_xref_overlay: bits & 0x8 != 0,
            is_external: bits & 0x10 != 0,
        }
    }
}

/// A block definition: the BLOCK_RECORD table entry plus the content of
/// the matching BLOCK ... ENDBLK definition.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    /// Block name
    pub name: String,
    /// Block flags
    pub flags: BlockFlags,
    /// Insertion base point
    pub base_point: Option<Vector3>,
    pub description: Option<String>,
    /// Path of the referenced drawing for xrefs
    pub xref_path: Option<String>,
    /// Layout object handle (code 340)
    pub layout: Option<Handle>,
    /// Insertion units (code 70 of BLOCK_RECORD)
    pub units: Option<i16>,
    /// Explodability flag
    pub explodable: Option<bool>,
    /// Can scale uniformly
    pub scale_uniformly: Option<bool>,
    /// Entities owned by this block
    pub entities: Vec<EntityType>,
    pub object: DxfObject,
}

impl BlockRecord {
    /// Create a new, empty block
    pub fn new(name: impl Into<String>) -> Self {
        BlockRecord {
            name: name.into(),
            flags: BlockFlags::default(),
            base_point: None,
            description: None,
            xref_path: None,
            layout: None,
            units: None,
            explodable: None,
            scale_uniformly: None,
            entities: Vec::new(),
            object: DxfObject::new(),
        }
    }

    /// Check if this block is anonymous
    pub fn is_anonymous(&self) -> bool {
        self.flags.anonymous || self.name.starts_with('*')
    }
}

impl TableEntry for BlockRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn object(&self) -> &DxfObject {
        &self.object
    }
}
