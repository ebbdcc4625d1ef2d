//! DXF file reader

mod entity_reader;
mod object_data;
mod object_reader;
mod section_reader;
mod stream_reader;
mod text_reader;

pub use object_reader::SubclassReader;
pub use stream_reader::{Brace, DxfStreamReader, DxfToken, DxfValue};
pub use text_reader::DxfTextReader;

use section_reader::SectionReader;

use crate::classes::DxfClassCollection;
use crate::document::{CadDocument, Drawing, HeaderVariables};
use crate::error::{DxfError, Result};
use crate::io::dxf::group_code_value::{NAME, START};
use crate::notification::{Diagnostics, NotificationCollection};
use crate::types::DxfVersion;
use bitflags::bitflags;
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::path::Path;

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// Text encoding until `$DWGCODEPAGE` or a Unicode revision replaces it.
    ///
    /// Default: Windows-1252.
    pub default_encoding: &'static Encoding,
    /// Report entities dropped because their owner is not a known layout.
    ///
    /// Default: `true`.
    pub warn_unresolved_owner: bool,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            default_encoding: encoding_rs::WINDOWS_1252,
            warn_unresolved_owner: true,
        }
    }
}

bitflags! {
    /// Top-level sections already read
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct SectionSet: u8 {
        const HEADER = 0x1;
        const CLASSES = 0x2;
        const TABLES = 0x4;
        const BLOCKS = 0x8;
        const ENTITIES = 0x10;
        const OBJECTS = 0x20;
        const THUMBNAILIMAGE = 0x40;
        const ACDSDATA = 0x80;
    }
}

impl SectionSet {
    fn from_section_name(name: &str) -> Option<Self> {
        let section = match name {
            "HEADER" => Self::HEADER,
            "CLASSES" => Self::CLASSES,
            "TABLES" => Self::TABLES,
            "BLOCKS" => Self::BLOCKS,
            "ENTITIES" => Self::ENTITIES,
            "OBJECTS" => Self::OBJECTS,
            "THUMBNAILIMAGE" => Self::THUMBNAILIMAGE,
            "ACDSDATA" => Self::ACDSDATA,
            _ => return None,
        };
        Some(section)
    }

    /// The section that must have been read first
    fn requires(self) -> Option<(Self, &'static str)> {
        if self == Self::CLASSES {
            Some((Self::HEADER, "HEADER"))
        } else if self == Self::BLOCKS {
            Some((Self::TABLES, "TABLES"))
        } else if self == Self::ENTITIES {
            Some((Self::BLOCKS, "BLOCKS"))
        } else if self == Self::OBJECTS {
            Some((Self::ENTITIES, "ENTITIES"))
        } else {
            None
        }
    }
}

/// Document-level results of a read that do not go through the sink
#[derive(Debug, Clone, Default)]
pub struct DxfFileInfo {
    /// Version declared by `$ACADVER`, or the legacy default
    pub version: DxfVersion,
    /// Code page declared by `$DWGCODEPAGE`
    pub code_page: Option<String>,
    pub header: HeaderVariables,
    pub classes: DxfClassCollection,
}

/// DXF file reader over an in-memory buffer
pub struct DxfReader<'a> {
    data: Cow<'a, [u8]>,
    config: DxfReaderConfiguration,
}

impl<'a> DxfReader<'a> {
    /// Create a reader over a complete DXF text
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Decode the document into `drawing`, reporting recoverable anomalies
    /// to `diagnostics`.
    ///
    /// Any error abandons the read; whatever the sink received up to that
    /// point is left as is.
    pub fn read_into(&self, drawing: &mut dyn Drawing, diagnostics: &mut dyn Diagnostics) -> Result<DxfFileInfo> {
        let mut reader =
            DxfTextReader::new(&self.data, diagnostics).with_encoding(self.config.default_encoding);
        let mut sections = SectionReader::new(&mut reader, drawing, self.config.warn_unresolved_owner);
        read_sections(&mut sections)?;
        Ok(DxfFileInfo {
            version: sections.version(),
            code_page: sections.code_page.take(),
            header: std::mem::take(&mut sections.header),
            classes: std::mem::take(&mut sections.classes),
        })
    }

    /// Read the DXF text into a [`CadDocument`]
    pub fn read(self) -> Result<CadDocument> {
        let mut document = CadDocument::new();
        let mut notifications = NotificationCollection::new();
        let info = self.read_into(&mut document, &mut notifications)?;
        document.version = info.version;
        document.code_page = info.code_page;
        document.header = info.header;
        document.classes = info.classes;
        document.notifications = notifications;
        Ok(document)
    }
}

impl DxfReader<'static> {
    /// Create a reader over the content of a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self {
            data: Cow::Owned(data),
            config: DxfReaderConfiguration::default(),
        })
    }
}

/// Top level: `0 SECTION` / `2 <name>` blocks until `0 EOF`
fn read_sections(sections: &mut SectionReader<'_, '_>) -> Result<()> {
    let mut seen = SectionSet::empty();
    loop {
        let Some(token) = sections.reader().read_pair()? else {
            tracing::debug!("end of data without EOF");
            return Ok(());
        };
        let line = sections.reader().line();
        if token.code != START {
            return Err(DxfError::UnexpectedCode {
                expected: START,
                actual: token.code,
                line,
            });
        }
        if token.is(START, "EOF") {
            return Ok(());
        }
        if !token.is(START, "SECTION") {
            return Err(DxfError::UnexpectedValue {
                expected: "SECTION".to_string(),
                actual: token.value.to_string(),
                line,
            });
        }

        let name = sections.reader().read_verify(NAME)?.to_string();
        let line = sections.reader().line();
        let Some(section) = SectionSet::from_section_name(&name) else {
            sections.reader().warn("Bad section {0} at line {1}", &[&name, &line]);
            sections.skip_to("ENDSEC")?;
            continue;
        };
        if seen.contains(section) {
            return Err(DxfError::DuplicateSection { name, line });
        }
        if let Some((required, required_name)) = section.requires() {
            if !seen.contains(required) {
                return Err(DxfError::SectionOrder {
                    section: name,
                    requires: required_name.to_string(),
                    line,
                });
            }
        }

        tracing::debug!(section = %name, line, "reading section");
        if section == SectionSet::HEADER {
            sections.read_header()?;
        } else if section == SectionSet::CLASSES {
            sections.read_classes()?;
        } else if section == SectionSet::TABLES {
            sections.read_tables()?;
        } else if section == SectionSet::BLOCKS {
            sections.read_blocks()?;
        } else if section == SectionSet::ENTITIES {
            sections.read_entities()?;
        } else {
            sections.skip_to("ENDSEC")?;
        }
        seen |= section;
    }
}
