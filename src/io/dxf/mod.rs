//! DXF (Drawing Exchange Format) reading

pub mod code_page;
pub mod group_code_value;
mod reader;

pub use group_code_value::{GroupCodeValueType, ReferenceType};
pub use reader::{
    Brace, DxfFileInfo, DxfReader, DxfReaderConfiguration, DxfStreamReader, DxfTextReader,
    DxfToken, DxfValue, SubclassReader,
};
