//! Core value types shared by the reader and the document model

mod color;
mod handle;
mod line_weight;
mod vector;
mod version;

pub use color::{Color, TRUE_COLOR_FLAG};
pub use handle::Handle;
pub use line_weight::LineWeight;
pub use vector::{Vector2, Vector3};
pub use version::DxfVersion;
