//! # dxf-loader
//!
//! A streaming decoder for ASCII DXF drawings.
//!
//! The decoder reads a DXF text buffer token by token and hands the decoded
//! styles, line types, layers, blocks, layouts and entities to a
//! [`Drawing`] sink. [`CadDocument`] is the in-memory sink shipped with the
//! crate; other drawing models implement the trait themselves.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxf_loader::{read_document, EntityType};
//!
//! let bytes = std::fs::read("sample.dxf")?;
//! let doc = read_document(&bytes)?;
//!
//! for entity in doc.entities() {
//!     if let EntityType::Line(line) = entity {
//!         println!("line of length {}", line.length());
//!     }
//! }
//! for notification in doc.notifications.iter() {
//!     eprintln!("{notification}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`io::dxf::GroupCodeValueType`] - value kind of each group code
//! - [`io::dxf::DxfTextReader`] - code/value tokens with one-token push back
//! - [`io::dxf::SubclassReader`] - view bounded to one subclass body
//! - [`io::dxf::DxfReader`] - section grammar, driving a [`Drawing`]
//!
//! Malformed structure is a [`DxfError`]; recoverable anomalies are reported
//! through [`notification::Diagnostics`] and the `tracing` facade.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod classes;
pub mod document;
pub mod entities;
pub mod error;
pub mod io;
pub mod notification;
pub mod objects;
pub mod tables;
pub mod types;
pub mod xdata;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{Color, DxfVersion, Handle, LineWeight, Vector2, Vector3};

// Re-export entity types
pub use entities::{
    Arc, AttributeEntity, Circle, Entity, EntityCommon, EntityType, Insert, Line, Polyline,
    Polyline3D, Solid, Text, TextAlignment, Vertex,
};

// Re-export table types
pub use tables::{BlockRecord, Layer, LineType, Table, TableEntry, TextStyle};

// Re-export document types
pub use classes::{DxfClass, DxfClassCollection};
pub use document::{
    BlockId, CadDocument, Drawing, HeaderVariables, LayerId, LayoutId, LinetypeId, StyleId,
};
pub use io::dxf::{DxfReader, DxfReaderConfiguration};
pub use notification::{Diagnostics, Notification, NotificationCollection, NotificationType};
pub use objects::DxfObject;
pub use xdata::{ExtendedData, XDataValue};

/// Decode a complete DXF text into a [`CadDocument`].
///
/// Notifications raised while reading are kept in
/// [`CadDocument::notifications`].
pub fn read_document(data: &[u8]) -> Result<CadDocument> {
    DxfReader::new(data).read()
}
