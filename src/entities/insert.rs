//! Insert entity (block reference)

use super::{AttributeEntity, EntityCommon};
use crate::document::BlockId;
use crate::types::Vector3;

/// Insert entity - a reference to a block definition
///
/// An Insert entity places an instance of a block at a specified location
/// with optional scaling, rotation, and array properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub common: EntityCommon,
    /// Resolved block; `None` when the name is not a known block
    pub block: Option<BlockId>,
    /// Block name as written (code 2)
    pub block_name: Option<String>,
    /// Insertion point (in WCS)
    pub position: Option<Vector3>,
    /// X, Y and Z scale factors
    pub scale: Option<Vector3>,
    /// Rotation angle in radians
    pub rotation: Option<f64>,
    /// Column count (for array inserts)
    pub column_count: Option<i16>,
    /// Row count (for array inserts)
    pub row_count: Option<i16>,
    /// Column spacing (for array inserts)
    pub column_spacing: Option<f64>,
    /// Row spacing (for array inserts)
    pub row_spacing: Option<f64>,
    /// Normal vector (extrusion direction)
    pub normal: Option<Vector3>,
    /// Attributes read from the subset that follows the INSERT
    pub attributes: Vec<AttributeEntity>,
}

impl Insert {
    /// Create an empty insert
    pub fn new() -> Self {
        Self::default()
    }

    /// Scale factors, defaulting to 1 when the file gave none
    pub fn scale_or_unit(&self) -> Vector3 {
        self.scale.unwrap_or(Vector3::ONE)
    }

    /// Whether this is an array (MINSERT style) insert
    pub fn is_array(&self) -> bool {
        self.column_count.unwrap_or(1) > 1 || self.row_count.unwrap_or(1) > 1
    }
}

super::impl_entity!(Insert, "INSERT");
