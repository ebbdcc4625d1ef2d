//! Decoded graphical entities
//!
//! Each kind the loader understands has its own struct carrying an
//! [`EntityCommon`] plus the kind-specific fields. Fields the file did not
//! set stay `None`: a missing thickness is not the same as a zero one.

use crate::document::{LayerId, LinetypeId};
use crate::objects::DxfObject;
use crate::types::{Color, Handle, LineWeight};

/// Implements [`Entity`] for a struct with a `common` field.
macro_rules! impl_entity {
    ($type:ty, $name:literal) => {
        impl $crate::entities::Entity for $type {
            fn common(&self) -> &$crate::entities::EntityCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut $crate::entities::EntityCommon {
                &mut self.common
            }

            fn entity_type(&self) -> &'static str {
                $name
            }
        }
    };
}

pub(crate) use impl_entity;

pub mod arc;
pub mod attribute_entity;
pub mod circle;
pub mod insert;
pub mod line;
pub mod polyline;
pub mod polyline3d;
pub mod solid;
pub mod text;

pub use arc::Arc;
pub use attribute_entity::{AttributeEntity, AttributeFlags};
pub use circle::Circle;
pub use insert::Insert;
pub use line::Line;
pub use polyline::{Polyline, Vertex, VertexKind};
pub use polyline3d::Polyline3D;
pub use solid::Solid;
pub use text::{Text, TextAlignment};

/// Base trait for all decoded entities
pub trait Entity {
    /// Common entity data
    fn common(&self) -> &EntityCommon;

    /// Mutable common entity data
    fn common_mut(&mut self) -> &mut EntityCommon;

    /// DXF record name of the entity kind
    fn entity_type(&self) -> &'static str;

    /// Get the entity's handle
    fn handle(&self) -> Option<Handle> {
        self.common().object.handle
    }

    /// Get the entity's layer
    fn layer(&self) -> Option<LayerId> {
        self.common().layer
    }

    /// Get the entity's color
    fn color(&self) -> Option<Color> {
        self.common().color
    }
}

/// Properties shared by every entity (the `AcDbEntity` subclass)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityCommon {
    /// Resolved layer (code 8)
    pub layer: Option<LayerId>,
    /// Resolved line type (code 6)
    pub line_type: Option<LinetypeId>,
    /// Indexed (62) or true color (420)
    pub color: Option<Color>,
    /// Line weight (370)
    pub line_weight: Option<LineWeight>,
    /// Line type scale (48)
    pub line_type_scale: Option<f64>,
    /// Flagged as paper space (67)
    pub paper_space: bool,
    /// Handle, owner and attached data
    pub object: DxfObject,
}

impl EntityCommon {
    /// Create new common entity data with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific layer
    pub fn with_layer(layer: LayerId) -> Self {
        EntityCommon {
            layer: Some(layer),
            ..Self::new()
        }
    }
}

/// Enumeration of all entity types for type-safe storage
#[derive(Debug, Clone, PartialEq)]
pub enum EntityType {
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    /// 2D polyline, from LWPOLYLINE or a 2D heavy POLYLINE
    Polyline(Polyline),
    /// 3D heavy POLYLINE
    Polyline3D(Polyline3D),
    Text(Text),
    Solid(Solid),
    /// Block reference, with its attributes
    Insert(Insert),
    /// Polyline vertex; only seen inside a POLYLINE subset
    Vertex(Vertex),
    /// Attribute instance; only seen inside an INSERT subset
    Attribute(AttributeEntity),
}

impl EntityType {
    /// Get a reference to the entity trait object
    pub fn as_entity(&self) -> &dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Polyline3D(e) => e,
            EntityType::Text(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::Attribute(e) => e,
        }
    }

    /// Get a mutable reference to the entity trait object
    pub fn as_entity_mut(&mut self) -> &mut dyn Entity {
        match self {
            EntityType::Line(e) => e,
            EntityType::Circle(e) => e,
            EntityType::Arc(e) => e,
            EntityType::Polyline(e) => e,
            EntityType::Polyline3D(e) => e,
            EntityType::Text(e) => e,
            EntityType::Solid(e) => e,
            EntityType::Insert(e) => e,
            EntityType::Vertex(e) => e,
            EntityType::Attribute(e) => e,
        }
    }

    /// Common entity data
    pub fn common(&self) -> &EntityCommon {
        self.as_entity().common()
    }

    /// Mutable common entity data
    pub fn common_mut(&mut self) -> &mut EntityCommon {
        self.as_entity_mut().common_mut()
    }

    /// Object metadata of the entity
    pub fn object(&self) -> &DxfObject {
        &self.common().object
    }
}
