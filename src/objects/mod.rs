//! Object metadata shared by table records, blocks and entities
//!
//! Every record decoded from a DXF stream carries the same envelope: its own
//! handle, the handle of the container that owns it, extended data attached
//! by applications, and the extension dictionary references.

use crate::types::Handle;
use crate::xdata::ExtendedData;

/// Identity and attachments of one decoded DXF object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfObject {
    /// Document-unique handle (code 5, or 105 for DIMSTYLE)
    pub handle: Option<Handle>,
    /// Owner back-reference (code 330); `None` when absent or null.
    /// Resolved by lookup, never followed as a pointer.
    pub owner: Option<Handle>,
    /// Extended data by application name
    pub extended_data: ExtendedData,
    /// Extension dictionaries (`{ACAD_XDICTIONARY` group)
    pub xdictionary: Vec<Handle>,
    /// Persistent reactors (`{ACAD_REACTORS` group)
    pub reactors: Vec<Handle>,
}

impl DxfObject {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the object declared an owner.
    pub fn has_owner(&self) -> bool {
        self.owner.is_some()
    }
}
