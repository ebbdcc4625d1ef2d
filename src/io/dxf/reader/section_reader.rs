//! Section decoders
//!
//! A [`SectionReader`] lives for one document read. It owns the name maps
//! built while reading TABLES and BLOCKS, so that entity properties can be
//! resolved against the records the sink handed back.

use super::entity_reader::read_entity;
use super::object_data::{read_object, read_optional, warn_unexpected};
use super::object_reader::SubclassReader;
use super::stream_reader::{DxfStreamReader, DxfToken};
use super::text_reader::DxfTextReader;
use crate::classes::{DxfClass, DxfClassCollection};
use crate::document::{
    BlockId, Drawing, HeaderVariables, LayerId, LayoutId, LinetypeId, StyleId,
};
use crate::entities::{EntityCommon, EntityType};
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::encoding_from_code_page;
use crate::io::dxf::group_code_value::{CONTROL_STRING, NAME, START, VARIABLE_NAME};
use crate::tables::{
    BlockFlags, BlockRecord, Layer, LayerFlags, LineType, LineTypeElement, LineTypeElementFlags,
    TextGenerationFlags, TextStyle,
};
use crate::types::{Color, DxfVersion, Handle, LineWeight, Vector2};
use bitflags::bitflags;
use std::collections::HashMap;

const PAPER_SPACE_LAYOUT: &str = "*PAPER_SPACE";

bitflags! {
    /// Symbol tables already read
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TableSet: u8 {
        const STYLE = 0x1;
        const LTYPE = 0x2;
        const LAYER = 0x4;
        const BLOCK_RECORD = 0x8;
    }
}

/// Records resolved so far, keyed by upper-cased name
#[derive(Debug, Default)]
pub(crate) struct Symbols {
    styles: HashMap<String, StyleId>,
    line_types: HashMap<String, LinetypeId>,
    layers: HashMap<String, LayerId>,
    blocks: HashMap<String, BlockId>,
}

impl Symbols {
    pub fn style(&self, name: &str) -> Option<StyleId> {
        self.styles.get(&name.to_uppercase()).copied()
    }

    pub fn line_type(&self, name: &str) -> Option<LinetypeId> {
        self.line_types.get(&name.to_uppercase()).copied()
    }

    pub fn layer(&self, name: &str) -> Option<LayerId> {
        self.layers.get(&name.to_uppercase()).copied()
    }

    pub fn block(&self, name: &str) -> Option<BlockId> {
        self.blocks.get(&name.to_uppercase()).copied()
    }
}

/// Where the entities of a BLOCK definition go
#[derive(Clone, Copy)]
enum BlockTarget {
    Block(BlockId),
    Layout(LayoutId),
}

/// Decoder state for the sections of one document
pub struct SectionReader<'r, 'a> {
    reader: &'r mut DxfTextReader<'a>,
    drawing: &'r mut dyn Drawing,
    warn_unresolved_owner: bool,
    pub(crate) header: HeaderVariables,
    pub(crate) classes: DxfClassCollection,
    pub(crate) code_page: Option<String>,
    symbols: Symbols,
    /// Block record handle to layout, for entity owners
    layouts: HashMap<Handle, LayoutId>,
    /// Layout block names (`*MODEL_SPACE`, `*PAPER_SPACE0`, ...)
    layout_blocks: HashMap<String, LayoutId>,
    paper_layout: Option<LayoutId>,
}

impl<'r, 'a> SectionReader<'r, 'a> {
    pub fn new(
        reader: &'r mut DxfTextReader<'a>,
        drawing: &'r mut dyn Drawing,
        warn_unresolved_owner: bool,
    ) -> Self {
        Self {
            reader,
            drawing,
            warn_unresolved_owner,
            header: HeaderVariables::new(),
            classes: DxfClassCollection::new(),
            code_page: None,
            symbols: Symbols::default(),
            layouts: HashMap::new(),
            layout_blocks: HashMap::new(),
            paper_layout: None,
        }
    }

    /// The token reader underneath
    pub fn reader(&mut self) -> &mut DxfTextReader<'a> {
        &mut *self.reader
    }

    pub fn version(&self) -> DxfVersion {
        self.reader.version()
    }

    fn next_token(&mut self) -> Result<DxfToken> {
        self.reader
            .read_pair()?
            .ok_or(DxfError::UnexpectedEof { line: self.reader.line() })
    }

    fn unexpected_value(&self, expected: &str, token: &DxfToken) -> DxfError {
        DxfError::UnexpectedValue {
            expected: expected.to_string(),
            actual: token.value.to_string(),
            line: self.reader.line(),
        }
    }

    /// Consume records up to and including `0 <marker>`
    pub fn skip_to(&mut self, marker: &str) -> Result<()> {
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, marker) {
                break;
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // HEADER
    // ---------------------------------------------------------------

    /// Read `9 $NAME` / value pairs until ENDSEC.
    ///
    /// `$ACADVER` switches the reader to the declared revision and
    /// `$DWGCODEPAGE` to the declared encoding, both taking effect for the
    /// very next token.
    pub fn read_header(&mut self) -> Result<()> {
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, "ENDSEC") {
                break;
            }
            if token.code != VARIABLE_NAME {
                return Err(DxfError::UnexpectedCode {
                    expected: VARIABLE_NAME,
                    actual: token.code,
                    line: self.reader.line(),
                });
            }
            let name = token.expect_str()?.to_string();
            let Some(value) = self.reader.read_pair()? else {
                break;
            };
            match name.as_str() {
                "$ACADVER" => {
                    let text = value.value.to_string();
                    let version = DxfVersion::from_version_string(&text)
                        .ok_or(DxfError::UnsupportedVersion(text))?;
                    self.reader.set_version(version);
                }
                "$DWGCODEPAGE" => {
                    let code_page = value.value.to_string();
                    match encoding_from_code_page(&code_page) {
                        Some(encoding) => self.reader.set_code_page(encoding),
                        None => self.reader.warn(
                            "Unknown code page {0} at line {1}",
                            &[&code_page, &self.reader.line()],
                        ),
                    }
                    self.code_page = Some(code_page);
                }
                _ => {}
            }
            self.header.set(name, value.value);
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // CLASSES
    // ---------------------------------------------------------------

    /// Read CLASS records until ENDSEC
    pub fn read_classes(&mut self) -> Result<()> {
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, "ENDSEC") {
                break;
            }
            if !token.is(START, "CLASS") {
                return Err(self.unexpected_value("CLASS", &token));
            }
            let class = self.read_class()?;
            self.classes.add(class);
        }
        Ok(())
    }

    fn read_class(&mut self) -> Result<DxfClass> {
        let mut dxf_name = None;
        let mut cpp_class_name = None;
        let mut application_name = None;
        let mut proxy_flags = None;
        let mut instance_count = None;
        let mut is_zombie = None;
        let mut is_an_entity = None;

        while let Some(token) = self.reader.read_pair()? {
            match token.code {
                START => {
                    self.reader.push_back(token)?;
                    break;
                }
                1 => dxf_name = Some(token.expect_str()?.to_string()),
                2 => cpp_class_name = Some(token.expect_str()?.to_string()),
                3 => application_name = Some(token.expect_str()?.to_string()),
                90 => proxy_flags = Some(token.expect_i32()?),
                91 => instance_count = Some(token.expect_i32()?),
                280 => is_zombie = Some(token.expect_int()? != 0),
                281 => is_an_entity = Some(token.expect_int()? != 0),
                _ => warn_unexpected(self.reader, &token),
            }
        }

        let line = self.reader.line();
        let missing = |field| DxfError::MissingClassField { field, line };
        Ok(DxfClass {
            dxf_name: dxf_name.ok_or_else(|| missing("dxf name"))?,
            cpp_class_name: cpp_class_name.ok_or_else(|| missing("class name"))?,
            application_name: application_name.ok_or_else(|| missing("application name"))?,
            proxy_flags: proxy_flags.ok_or_else(|| missing("proxy flags"))?,
            instance_count,
            is_zombie: is_zombie.ok_or_else(|| missing("was a proxy"))?,
            is_an_entity: is_an_entity.ok_or_else(|| missing("is an entity"))?,
        })
    }

    // ---------------------------------------------------------------
    // TABLES
    // ---------------------------------------------------------------

    /// Read TABLE blocks until ENDSEC.
    ///
    /// STYLE, LTYPE, LAYER and BLOCK_RECORD are decoded, each at most once,
    /// and LAYER only after LTYPE. Other tables are skipped.
    pub fn read_tables(&mut self) -> Result<()> {
        let mut done = TableSet::empty();
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, "ENDSEC") {
                break;
            }
            if !token.is(START, "TABLE") {
                return Err(self.unexpected_value("TABLE", &token));
            }
            let name = self.reader.read_verify(NAME)?.to_string();
            let line = self.reader.line();
            let table = match name.as_str() {
                "STYLE" => TableSet::STYLE,
                "LTYPE" => TableSet::LTYPE,
                "LAYER" => TableSet::LAYER,
                "BLOCK_RECORD" => TableSet::BLOCK_RECORD,
                _ => {
                    tracing::debug!(table = %name, line, "skipping table");
                    self.skip_to("ENDTAB")?;
                    continue;
                }
            };
            if done.contains(table) {
                return Err(DxfError::DuplicateTable { name, line });
            }
            if table == TableSet::LAYER && !done.contains(TableSet::LTYPE) {
                return Err(DxfError::TableOrder {
                    table: name,
                    requires: "LTYPE".to_string(),
                    line,
                });
            }

            tracing::debug!(table = %name, line, "reading table");
            read_object(self.reader, read_table_header)?;
            if table == TableSet::STYLE {
                self.read_records("STYLE", Self::read_style_entry)?;
            } else if table == TableSet::LTYPE {
                self.read_records("LTYPE", Self::read_line_type_entry)?;
            } else if table == TableSet::LAYER {
                self.read_records("LAYER", Self::read_layer_entry)?;
            } else {
                self.read_records("BLOCK_RECORD", Self::read_block_record_entry)?;
            }
            done |= table;
        }
        Ok(())
    }

    /// Read `0 <record>` entries until `0 ENDTAB`
    fn read_records(&mut self, record: &str, mut read_entry: impl FnMut(&mut Self) -> Result<()>) -> Result<()> {
        loop {
            let token = self.next_token()?;
            if token.is(START, "ENDTAB") {
                return Ok(());
            }
            if !token.is(START, record) {
                return Err(self.unexpected_value(record, &token));
            }
            read_entry(self)?;
        }
    }

    fn read_style_entry(&mut self) -> Result<()> {
        let mut style = TextStyle::new("");
        let read = read_object(self.reader, |view| read_style_record(view, &mut style))?;
        style.object = read.object;
        if style.name.is_empty() {
            self.reader.warn("Text style without name at line {0}", &[&self.reader.line()]);
            return Ok(());
        }

        let key = style.name.to_uppercase();
        let id = if key == "STANDARD" {
            self.drawing.standard_style()
        } else {
            self.drawing.add_text_style(style)?
        };
        self.symbols.styles.insert(key, id);
        Ok(())
    }

    fn read_line_type_entry(&mut self) -> Result<()> {
        let mut line_type = LineType::new("");
        let read = read_object(self.reader, |view| read_line_type_record(view, &mut line_type))?;
        line_type.object = read.object;
        if line_type.name.is_empty() {
            self.reader.warn("Line type without name at line {0}", &[&self.reader.line()]);
            return Ok(());
        }

        let key = line_type.name.to_uppercase();
        let id = match key.as_str() {
            "CONTINUOUS" => self.drawing.continuous_line_type(),
            "BYLAYER" => self.drawing.by_layer_line_type(),
            "BYBLOCK" => self.drawing.by_block_line_type(),
            _ => self.drawing.add_line_type(line_type)?,
        };
        self.symbols.line_types.insert(key, id);
        Ok(())
    }

    fn read_layer_entry(&mut self) -> Result<()> {
        let mut layer = Layer::new("");
        let symbols = &self.symbols;
        let read = read_object(self.reader, |view| read_layer_record(view, symbols, &mut layer))?;
        layer.object = read.object;
        if layer.name.is_empty() {
            self.reader.warn("Layer without name at line {0}", &[&self.reader.line()]);
            return Ok(());
        }

        let key = layer.name.to_uppercase();
        let id = if key == "0" {
            self.drawing.layer_0()
        } else {
            self.drawing.add_layer(layer)?
        };
        self.symbols.layers.insert(key, id);
        Ok(())
    }

    fn read_block_record_entry(&mut self) -> Result<()> {
        let mut record = BlockRecord::new("");
        let read = read_object(self.reader, |view| read_block_record(view, &mut record))?;
        record.object = read.object;
        if record.name.is_empty() {
            self.reader.warn("Block record without name at line {0}", &[&self.reader.line()]);
            return Ok(());
        }

        let key = record.name.to_uppercase();
        let handle = record.object.handle;
        if key == "*MODEL_SPACE" {
            let model = self.drawing.model_layout();
            self.bind_layout(key, handle, model);
        } else if key.starts_with(PAPER_SPACE_LAYOUT) {
            let layout = match self.drawing.find_layout(&record.name) {
                Some(layout) => layout,
                None => self.drawing.add_layout(&record.name)?,
            };
            self.bind_layout(key, handle, layout);
        } else {
            let id = self.drawing.add_block(record)?;
            self.symbols.blocks.insert(key, id);
        }
        Ok(())
    }

    fn bind_layout(&mut self, key: String, handle: Option<Handle>, layout: LayoutId) {
        if let Some(handle) = handle {
            self.layouts.insert(handle, layout);
        }
        self.layout_blocks.insert(key, layout);
    }

    // ---------------------------------------------------------------
    // BLOCKS
    // ---------------------------------------------------------------

    /// Read BLOCK ... ENDBLK definitions until ENDSEC
    pub fn read_blocks(&mut self) -> Result<()> {
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, "ENDSEC") {
                break;
            }
            if !token.is(START, "BLOCK") {
                return Err(self.unexpected_value("BLOCK", &token));
            }
            self.read_block()?;
        }
        Ok(())
    }

    fn read_block(&mut self) -> Result<()> {
        let mut block = BlockRecord::new("");
        let symbols = &self.symbols;
        let read = read_object(self.reader, |view| read_block_begin(view, symbols, &mut block))?;
        block.object = read.object;

        let key = block.name.to_uppercase();
        let target = if let Some(layout) = self.layout_blocks.get(&key) {
            Some(BlockTarget::Layout(*layout))
        } else if let Some(id) = self.symbols.block(&key) {
            Some(BlockTarget::Block(id))
        } else if block.name.is_empty() {
            self.reader.warn("Block without name at line {0}", &[&self.reader.line()]);
            None
        } else {
            let id = self.drawing.add_block(block)?;
            self.symbols.blocks.insert(key, id);
            Some(BlockTarget::Block(id))
        };

        let mut buffered = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.is(START, "ENDBLK") {
                let symbols = &self.symbols;
                read_object(self.reader, |view| read_block_end(view, symbols))?;
                break;
            }
            self.reader.push_back(token)?;
            let Some(entity) = read_entity(self.reader, &self.symbols)? else {
                continue;
            };
            if self.is_orphan(&entity) {
                continue;
            }
            match target {
                Some(BlockTarget::Block(id)) => self.drawing.add_block_entity(id, entity)?,
                Some(BlockTarget::Layout(_)) => buffered.push(entity),
                None => {}
            }
        }

        if let Some(BlockTarget::Layout(layout)) = target {
            self.commit(layout, buffered)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // ENTITIES
    // ---------------------------------------------------------------

    /// Read entities until ENDSEC and deliver them grouped by layout.
    ///
    /// Each layout gets a single edit bracket once the whole section is
    /// read.
    pub fn read_entities(&mut self) -> Result<()> {
        let mut pending: Vec<(LayoutId, Vec<EntityType>)> = Vec::new();
        while let Some(token) = self.reader.read_pair()? {
            if token.is(START, "ENDSEC") {
                break;
            }
            self.reader.push_back(token)?;
            let Some(entity) = read_entity(self.reader, &self.symbols)? else {
                continue;
            };
            if self.is_orphan(&entity) {
                continue;
            }
            let Some(layout) = self.resolve_layout(&entity)? else {
                continue;
            };
            match pending.iter_mut().find(|(id, _)| *id == layout) {
                Some((_, entities)) => entities.push(entity),
                None => pending.push((layout, vec![entity])),
            }
        }

        for (layout, entities) in pending {
            self.commit(layout, entities)?;
        }
        Ok(())
    }

    /// VERTEX and ATTRIB records belong to a POLYLINE or INSERT subset
    fn is_orphan(&mut self, entity: &EntityType) -> bool {
        if !matches!(entity, EntityType::Vertex(_) | EntityType::Attribute(_)) {
            return false;
        }
        let kind = entity.as_entity().entity_type();
        self.reader.warn(
            "{0} outside of a sequence at line {1}",
            &[&kind, &self.reader.line()],
        );
        true
    }

    fn resolve_layout(&mut self, entity: &EntityType) -> Result<Option<LayoutId>> {
        let common = entity.common();
        match common.object.owner {
            None if common.paper_space => self.paper_layout().map(Some),
            None => Ok(Some(self.drawing.model_layout())),
            Some(owner) => {
                let layout = self.layouts.get(&owner).copied();
                if layout.is_none() && self.warn_unresolved_owner {
                    let kind = entity.as_entity().entity_type();
                    self.reader.warn(
                        "Unresolved owner {0} of {1} at line {2}",
                        &[&owner, &kind, &self.reader.line()],
                    );
                }
                Ok(layout)
            }
        }
    }

    fn paper_layout(&mut self) -> Result<LayoutId> {
        if let Some(layout) = self.paper_layout {
            return Ok(layout);
        }
        let layout = match self.drawing.find_layout(PAPER_SPACE_LAYOUT) {
            Some(layout) => layout,
            None => self.drawing.add_layout(PAPER_SPACE_LAYOUT)?,
        };
        self.paper_layout = Some(layout);
        Ok(layout)
    }

    /// Deliver `entities` to `layout` inside one edit bracket.
    ///
    /// The bracket is closed even when adding an entity fails.
    fn commit(&mut self, layout: LayoutId, entities: Vec<EntityType>) -> Result<()> {
        tracing::debug!(layout = layout.0, count = entities.len(), "committing entities");
        self.drawing.begin_edit(layout)?;
        let added = entities
            .into_iter()
            .try_for_each(|entity| self.drawing.add_entity(layout, entity));
        let ended = self.drawing.end_edit(layout);
        added.and(ended)
    }
}

// -------------------------------------------------------------------
// Property decoders
// -------------------------------------------------------------------

fn read_table_header(view: &mut SubclassReader<'_, '_>) -> Result<()> {
    view.enter_subclass(&["AcDbSymbolTable"])?;
    while let Some(token) = view.read_pair()? {
        if token.code != 70 {
            warn_unexpected(view, &token);
        }
    }
    Ok(())
}

/// Enter the record subclass, after the shared symbol record subclass of
/// modern documents.
fn enter_record(view: &mut SubclassReader<'_, '_>, subclass: &'static str) -> Result<()> {
    if !view.version().is_legacy() {
        view.enter_subclass(&["AcDbSymbolTableRecord"])?;
        while let Some(token) = view.read_pair()? {
            warn_unexpected(view, &token);
        }
    }
    view.enter_subclass(&[subclass])?;
    Ok(())
}

fn read_style_record(view: &mut SubclassReader<'_, '_>, style: &mut TextStyle) -> Result<()> {
    enter_record(view, "AcDbTextStyleTableRecord")?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            2 => style.name = token.expect_str()?.to_string(),
            40 => style.height = Some(token.expect_double()?),
            41 => style.width_factor = Some(token.expect_double()?),
            50 => style.oblique_angle = Some(token.expect_double()?.to_radians()),
            71 => style.flags = TextGenerationFlags::from_bits(token.expect_i16()?),
            3 => style.font_file = Some(token.expect_str()?.to_string()),
            4 => style.big_font_file = Some(token.expect_str()?.to_string()),
            70 | 42 | 1071 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_line_type_record(view: &mut SubclassReader<'_, '_>, line_type: &mut LineType) -> Result<()> {
    enter_record(view, "AcDbLinetypeTableRecord")?;
    let mut element_count = None;
    while let Some(token) = view.read_pair()? {
        match token.code {
            2 => line_type.name = token.expect_str()?.to_string(),
            3 => line_type.description = Some(token.expect_str()?.to_string()),
            72 => line_type.alignment = Some(token.expect_i16()?),
            73 => element_count = Some(usize::try_from(token.expect_i16()?).unwrap_or(0)),
            40 => line_type.pattern_length = Some(token.expect_double()?),
            49 => {
                let count = element_count.ok_or(DxfError::UndefinedPattern { line: view.line() })?;
                if count == 0 {
                    warn_unexpected(view, &token);
                    continue;
                }
                view.push_back(token)?;
                line_type.elements = read_pattern(view, count)?;
            }
            70 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// Read `count` dash elements, each a `49` length and its optional
/// complex-shape properties in file order.
fn read_pattern(view: &mut SubclassReader<'_, '_>, count: usize) -> Result<Vec<LineTypeElement>> {
    let mut elements = Vec::new();
    for _ in 0..count {
        let length = DxfToken::new(49, view.read_verify(49)?).expect_double()?;
        let mut element = LineTypeElement::new(length);
        if let Some(token) = read_optional(view, 74)? {
            let bits = token.expect_i16()?;
            if bits != 0 {
                element.flags = Some(LineTypeElementFlags::from_bits_truncate(bits));
            }
        }
        if let Some(token) = read_optional(view, 75)? {
            element.shape_number = Some(token.expect_i16()?);
        }
        if let Some(token) = read_optional(view, 340)? {
            element.style = Some(token.expect_handle()?);
        }
        if let Some(token) = read_optional(view, 46)? {
            element.scale = Some(token.expect_double()?);
        }
        if let Some(token) = read_optional(view, 50)? {
            element.rotation = Some(token.expect_double()?.to_radians());
        }
        let x = read_optional(view, 44)?.map(|t| t.expect_double()).transpose()?;
        let y = read_optional(view, 45)?.map(|t| t.expect_double()).transpose()?;
        if x.is_some() || y.is_some() {
            element.offset = Some(Vector2::new(x.unwrap_or(0.0), y.unwrap_or(0.0)));
        }
        if let Some(token) = read_optional(view, 9)? {
            element.text = Some(token.expect_str()?.to_string());
        }
        elements.push(element);
    }
    Ok(elements)
}

fn read_layer_record(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, layer: &mut Layer) -> Result<()> {
    enter_record(view, "AcDbLayerTableRecord")?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            2 => layer.name = token.expect_str()?.to_string(),
            3 => layer.description = Some(token.expect_str()?.to_string()),
            70 => {
                let flags = LayerFlags::from_bits(token.expect_i16()?);
                layer.flags.disabled = flags.disabled;
                layer.flags.hidden |= flags.hidden;
            }
            62 => {
                let index = token.expect_i16()?;
                layer.flags.hidden |= index < 0;
                layer.color = Some(Color::from_index(index.saturating_abs()));
            }
            420 => layer.color = Some(Color::from_true_color(token.expect_int()?)),
            6 => layer.line_type = symbols.line_type(token.expect_str()?),
            290 => layer.unplottable = token.expect_int()? == 0,
            370 => layer.line_weight = Some(LineWeight::from_value(token.expect_i16()?)),
            347 | 348 | 390 | 430 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_block_record(view: &mut SubclassReader<'_, '_>, record: &mut BlockRecord) -> Result<()> {
    enter_record(view, "AcDbBlockTableRecord")?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            2 => record.name = token.expect_str()?.to_string(),
            340 => record.layout = Some(token.expect_handle()?),
            70 => record.units = Some(token.expect_i16()?),
            280 => record.explodable = Some(token.expect_int()? != 0),
            281 => record.scale_uniformly = Some(token.expect_int()? != 0),
            CONTROL_STRING if token.is(CONTROL_STRING, "{BLKREFS") => skip_group(view)?,
            310 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// Consume an application group up to its closing `102 }`
fn skip_group(view: &mut SubclassReader<'_, '_>) -> Result<()> {
    while let Some(token) = view.read_pair()? {
        if token.is(CONTROL_STRING, "}") {
            break;
        }
    }
    Ok(())
}

/// BLOCK carries the common entity properties before its own subclass
fn read_block_begin(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, block: &mut BlockRecord) -> Result<()> {
    let mut common = EntityCommon::new();
    super::entity_reader::read_common(view, symbols, &mut common)?;
    view.enter_subclass(&["AcDbBlockBegin"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            2 => block.name = token.expect_str()?.to_string(),
            70 => block.flags = BlockFlags::from_bits(token.expect_i16()?),
            10 => block.base_point = Some(token.expect_point()?),
            1 => block.xref_path = Some(token.expect_str()?.to_string()),
            4 => block.description = Some(token.expect_str()?.to_string()),
            3 | 71 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_block_end(view: &mut SubclassReader<'_, '_>, symbols: &Symbols) -> Result<()> {
    let mut common = EntityCommon::new();
    super::entity_reader::read_common(view, symbols, &mut common)?;
    view.enter_subclass(&["AcDbBlockEnd"])?;
    while let Some(token) = view.read_pair()? {
        warn_unexpected(view, &token);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::CadDocument;
    use crate::notification::{NotificationCollection, NotificationType};
    use pretty_assertions::assert_eq;

    fn dxf(pairs: &[(i32, &str)]) -> String {
        pairs.iter().map(|(code, value)| format!("{code}\n{value}\n")).collect()
    }

    fn run<T>(
        data: &str,
        document: &mut CadDocument,
        diagnostics: &mut NotificationCollection,
        read: impl FnOnce(&mut SectionReader<'_, '_>) -> Result<T>,
    ) -> Result<T> {
        let mut reader = DxfTextReader::new(data.as_bytes(), diagnostics);
        let mut sections = SectionReader::new(&mut reader, document, true);
        read(&mut sections)
    }

    #[test]
    fn test_header_switches_version() {
        let data = dxf(&[
            (9, "$ACADVER"),
            (1, "AC1015"),
            (9, "$INSUNITS"),
            (70, "4"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let (version, header) = run(&data, &mut document, &mut diagnostics, |s| {
            s.read_header()?;
            Ok((s.version(), s.header.clone()))
        })
        .unwrap();
        assert_eq!(version, DxfVersion::AC1015);
        assert_eq!(header.get_int("$INSUNITS"), Some(4));
        assert_eq!(header.get_str("$ACADVER"), Some("AC1015"));
    }

    #[test]
    fn test_unknown_version_is_fatal() {
        let data = dxf(&[(9, "$ACADVER"), (1, "AC9999"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_header()).unwrap_err();
        assert!(matches!(err, DxfError::UnsupportedVersion(v) if v == "AC9999"));
    }

    #[test]
    fn test_header_requires_variable_names() {
        let data = dxf(&[(1, "AC1015"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_header()).unwrap_err();
        assert!(matches!(err, DxfError::UnexpectedCode { expected: 9, actual: 1, .. }));
    }

    #[test]
    fn test_unknown_code_page_warns() {
        let data = dxf(&[(9, "$DWGCODEPAGE"), (3, "NOPE"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        run(&data, &mut document, &mut diagnostics, |s| s.read_header()).unwrap();
        assert_eq!(diagnostics.of_type(NotificationType::Warning).len(), 1);
    }

    #[test]
    fn test_class_records() {
        let data = dxf(&[
            (0, "CLASS"),
            (1, "ACDBPLACEHOLDER"),
            (2, "AcDbPlaceHolder"),
            (3, "ObjectDBX Classes"),
            (90, "0"),
            (280, "0"),
            (281, "0"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let classes = run(&data, &mut document, &mut diagnostics, |s| {
            s.read_classes()?;
            Ok(s.classes.clone())
        })
        .unwrap();
        let class = classes.get("ACDBPLACEHOLDER").unwrap();
        assert_eq!(class.cpp_class_name, "AcDbPlaceHolder");
        assert_eq!(class.instance_count, None);
        assert!(!class.is_an_entity);
    }

    #[test]
    fn test_class_missing_field() {
        let data = dxf(&[(0, "CLASS"), (1, "X"), (2, "Y"), (3, "Z"), (90, "0"), (281, "1"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_classes()).unwrap_err();
        assert!(matches!(err, DxfError::MissingClassField { field: "was a proxy", .. }));
    }

    #[test]
    fn test_class_section_rejects_other_records() {
        let data = dxf(&[(0, "LINE"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_classes()).unwrap_err();
        assert!(matches!(err, DxfError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_layer_requires_line_types() {
        let data = dxf(&[(0, "TABLE"), (2, "LAYER"), (70, "1"), (0, "ENDTAB"), (0, "ENDSEC")]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap_err();
        assert!(matches!(err, DxfError::TableOrder { table, .. } if table == "LAYER"));
    }

    #[test]
    fn test_legacy_tables() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "VPORT"),
            (70, "1"),
            (0, "VPORT"),
            (2, "*ACTIVE"),
            (0, "ENDTAB"),
            (0, "TABLE"),
            (2, "LTYPE"),
            (70, "1"),
            (0, "LTYPE"),
            (2, "DASHED"),
            (70, "0"),
            (3, "__ __ __"),
            (72, "65"),
            (73, "2"),
            (40, "0.75"),
            (49, "0.5"),
            (49, "-0.25"),
            (0, "ENDTAB"),
            (0, "TABLE"),
            (2, "LAYER"),
            (70, "2"),
            (0, "LAYER"),
            (2, "0"),
            (70, "0"),
            (62, "7"),
            (6, "CONTINUOUS"),
            (0, "LAYER"),
            (2, "WALLS"),
            (70, "4"),
            (62, "-1"),
            (6, "dashed"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap();

        let dashed = document.line_types.get("DASHED").unwrap();
        assert_eq!(dashed.elements.len(), 2);
        assert_eq!(dashed.pattern_length, Some(0.75));
        assert!(dashed.elements[1].is_space());

        let walls = document.layers.get("WALLS").unwrap();
        assert!(walls.flags.hidden);
        assert!(walls.flags.disabled);
        assert_eq!(walls.color, Some(Color::from_index(1)));
        let dashed_id = document.line_types.index_of("DASHED").map(LinetypeId);
        assert_eq!(walls.line_type, dashed_id);
        assert_eq!(document.layers.len(), 2);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_pattern_without_count() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "LTYPE"),
            (0, "LTYPE"),
            (2, "BROKEN"),
            (49, "0.5"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap_err();
        assert!(matches!(err, DxfError::UndefinedPattern { .. }));
    }

    #[test]
    fn test_oversized_pattern_count_is_fatal() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "LTYPE"),
            (0, "LTYPE"),
            (2, "HUGE"),
            (73, "9223372036854775807"),
            (49, "0.5"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap_err();
        assert!(matches!(err, DxfError::InvalidValue { code: 73, line: 10, .. }));
    }

    #[test]
    fn test_negative_pattern_count_reads_nothing() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "LTYPE"),
            (0, "LTYPE"),
            (2, "ODD"),
            (73, "-4"),
            (49, "0.5"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap();
        assert!(document.line_types.get("ODD").unwrap().elements.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_most_negative_layer_color() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "LTYPE"),
            (0, "ENDTAB"),
            (0, "TABLE"),
            (2, "LAYER"),
            (0, "LAYER"),
            (2, "EDGE"),
            (62, "-32768"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap();
        let edge = document.layers.get("EDGE").unwrap();
        assert!(edge.flags.hidden);
        assert_eq!(edge.color, Some(Color::from_index(7)));
    }

    #[test]
    fn test_duplicate_table() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "STYLE"),
            (0, "ENDTAB"),
            (0, "TABLE"),
            (2, "STYLE"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        let err = run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap_err();
        assert!(matches!(err, DxfError::DuplicateTable { name, .. } if name == "STYLE"));
    }

    #[test]
    fn test_standard_style_maps_to_builtin() {
        let data = dxf(&[
            (0, "TABLE"),
            (2, "STYLE"),
            (0, "STYLE"),
            (2, "STANDARD"),
            (70, "0"),
            (40, "0.0"),
            (41, "1.0"),
            (50, "0.0"),
            (71, "0"),
            (42, "0.2"),
            (3, "txt"),
            (4, ""),
            (0, "STYLE"),
            (2, "NOTES"),
            (50, "15.0"),
            (71, "2"),
            (3, "romans.shx"),
            (0, "ENDTAB"),
            (0, "ENDSEC"),
        ]);
        let mut document = CadDocument::new();
        let mut diagnostics = NotificationCollection::new();
        run(&data, &mut document, &mut diagnostics, |s| s.read_tables()).unwrap();
        assert_eq!(document.text_styles.len(), 2);
        let notes = document.text_styles.get("NOTES").unwrap();
        assert!(notes.flags.backward);
        assert!((notes.oblique_angle.unwrap() - 15f64.to_radians()).abs() < 1e-12);
    }
}
