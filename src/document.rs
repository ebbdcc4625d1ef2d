//! Decoded document and the sink interface the DXF loader writes into
//!
//! The loader never builds a document model of its own. It talks to a
//! [`Drawing`]: built-in records are looked up, new records are created, and
//! entities are delivered either straight into a block or inside one
//! `begin_edit`/`end_edit` bracket per layout. [`CadDocument`] is the
//! in-memory implementation used by [`crate::read_document`].

use crate::classes::DxfClassCollection;
use crate::entities::EntityType;
use crate::error::{DxfError, Result};
use crate::io::dxf::DxfValue;
use crate::notification::NotificationCollection;
use crate::tables::{BlockRecord, Layer, LineType, Table, TextStyle};
use crate::types::{DxfVersion, Vector3};
use indexmap::IndexMap;

/// Text style created by a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(pub usize);

/// Line type created by a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinetypeId(pub usize);

/// Layer created by a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub usize);

/// Block created by a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

/// Layout (model space or a paper space) of a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub usize);

/// Target of a DXF load.
///
/// Calls arrive in dependency order: tables before blocks, blocks before
/// entities. Entities for a layout are only added between `begin_edit` and
/// `end_edit` for that layout, and `end_edit` is called even when adding
/// fails part way.
pub trait Drawing {
    /// The built-in "Standard" text style
    fn standard_style(&self) -> StyleId;
    /// Create a text style
    fn add_text_style(&mut self, style: TextStyle) -> Result<StyleId>;

    /// The built-in "Continuous" line type
    fn continuous_line_type(&self) -> LinetypeId;
    /// The built-in "ByLayer" line type
    fn by_layer_line_type(&self) -> LinetypeId;
    /// The built-in "ByBlock" line type
    fn by_block_line_type(&self) -> LinetypeId;
    /// Create a line type
    fn add_line_type(&mut self, line_type: LineType) -> Result<LinetypeId>;

    /// The built-in layer "0"
    fn layer_0(&self) -> LayerId;
    /// Create a layer
    fn add_layer(&mut self, layer: Layer) -> Result<LayerId>;

    /// Create a block
    fn add_block(&mut self, block: BlockRecord) -> Result<BlockId>;
    /// Append an entity to a block definition
    fn add_block_entity(&mut self, block: BlockId, entity: EntityType) -> Result<()>;

    /// The model space layout
    fn model_layout(&self) -> LayoutId;
    /// Find a layout by name (case-insensitive)
    fn find_layout(&self, name: &str) -> Option<LayoutId>;
    /// Create a paper space layout
    fn add_layout(&mut self, name: &str) -> Result<LayoutId>;

    /// Open an edit bracket on a layout
    fn begin_edit(&mut self, layout: LayoutId) -> Result<()>;
    /// Add an entity to the layout being edited
    fn add_entity(&mut self, layout: LayoutId, entity: EntityType) -> Result<()>;
    /// Close the edit bracket
    fn end_edit(&mut self, layout: LayoutId) -> Result<()>;
}

/// Header variables in file order, keyed by name (`$ACADVER`, ...)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderVariables {
    values: IndexMap<String, DxfValue>,
}

impl HeaderVariables {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable; a repeated name keeps its position and takes the new value
    pub fn set(&mut self, name: impl Into<String>, value: DxfValue) {
        self.values.insert(name.into(), value);
    }

    /// Raw value of a variable
    pub fn get(&self, name: &str) -> Option<&DxfValue> {
        self.values.get(name)
    }

    /// String value of a variable
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            DxfValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of a variable; integers are widened
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match *self.values.get(name)? {
            DxfValue::Real(v) => Some(v),
            DxfValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Integer value of a variable
    pub fn get_int(&self, name: &str) -> Option<i64> {
        match *self.values.get(name)? {
            DxfValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Point value of a variable
    pub fn get_point(&self, name: &str) -> Option<Vector3> {
        match *self.values.get(name)? {
            DxfValue::Point(p) => Some(p),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DxfValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A named drawing space owning a list of entities
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub name: String,
    pub entities: Vec<EntityType>,
}

impl Layout {
    fn new(name: impl Into<String>) -> Self {
        Layout {
            name: name.into(),
            entities: Vec::new(),
        }
    }
}

/// A decoded DXF document
#[derive(Debug, Clone)]
pub struct CadDocument {
    /// Version declared by `$ACADVER`
    pub version: DxfVersion,
    /// Code page declared by `$DWGCODEPAGE`
    pub code_page: Option<String>,
    /// Header variables
    pub header: HeaderVariables,
    /// DXF class definitions (CLASSES section)
    pub classes: DxfClassCollection,
    /// Text style table
    pub text_styles: Table<TextStyle>,
    /// Line type table
    pub line_types: Table<LineType>,
    /// Layer table
    pub layers: Table<Layer>,
    /// Block definitions
    pub blocks: Table<BlockRecord>,
    /// Layouts; index 0 is model space
    pub layouts: Vec<Layout>,
    /// Notifications collected during the last read
    pub notifications: NotificationCollection,

    standard_style: StyleId,
    continuous: LinetypeId,
    by_layer: LinetypeId,
    by_block: LinetypeId,
    layer_0: LayerId,
    editing: Option<LayoutId>,
}

/// Name of the model space layout
pub const MODEL_LAYOUT_NAME: &str = "*Model_Space";

impl CadDocument {
    /// Create a new document holding only the built-in records
    pub fn new() -> Self {
        let mut doc = CadDocument {
            version: DxfVersion::default(),
            code_page: None,
            header: HeaderVariables::new(),
            classes: DxfClassCollection::new(),
            text_styles: Table::new(),
            line_types: Table::new(),
            layers: Table::new(),
            blocks: Table::new(),
            layouts: vec![Layout::new(MODEL_LAYOUT_NAME)],
            notifications: NotificationCollection::new(),
            standard_style: StyleId(0),
            continuous: LinetypeId(0),
            by_layer: LinetypeId(0),
            by_block: LinetypeId(0),
            layer_0: LayerId(0),
            editing: None,
        };
        doc.initialize_defaults();
        doc
    }

    /// Add the built-in records; the tables are empty so adding cannot clash
    fn initialize_defaults(&mut self) {
        if let Ok(index) = self.line_types.add(LineType::continuous()) {
            self.continuous = LinetypeId(index);
        }
        if let Ok(index) = self.line_types.add(LineType::by_layer()) {
            self.by_layer = LinetypeId(index);
        }
        if let Ok(index) = self.line_types.add(LineType::by_block()) {
            self.by_block = LinetypeId(index);
        }
        if let Ok(index) = self.layers.add(Layer::layer_0()) {
            self.layer_0 = LayerId(index);
        }
        if let Ok(index) = self.text_styles.add(TextStyle::standard()) {
            self.standard_style = StyleId(index);
        }
    }

    /// Get a text style
    pub fn text_style(&self, id: StyleId) -> Option<&TextStyle> {
        self.text_styles.get_index(id.0)
    }

    /// Get a line type
    pub fn line_type(&self, id: LinetypeId) -> Option<&LineType> {
        self.line_types.get_index(id.0)
    }

    /// Get a layer
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get_index(id.0)
    }

    /// Get a block
    pub fn block(&self, id: BlockId) -> Option<&BlockRecord> {
        self.blocks.get_index(id.0)
    }

    /// Get a layout
    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(id.0)
    }

    /// Entities of the model space layout
    pub fn model_space_entities(&self) -> &[EntityType] {
        &self.layouts[0].entities
    }

    /// Number of entities across all layouts (block content excluded)
    pub fn entity_count(&self) -> usize {
        self.layouts.iter().map(|l| l.entities.len()).sum()
    }

    /// Iterate over the entities of every layout
    pub fn entities(&self) -> impl Iterator<Item = &EntityType> {
        self.layouts.iter().flat_map(|l| l.entities.iter())
    }

    /// Whether an edit bracket is open
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn layout_mut(&mut self, id: LayoutId) -> Result<&mut Layout> {
        self.layouts
            .get_mut(id.0)
            .ok_or_else(|| DxfError::Custom(format!("Unknown layout {}", id.0)))
    }
}

impl Default for CadDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Drawing for CadDocument {
    fn standard_style(&self) -> StyleId {
        self.standard_style
    }

    fn add_text_style(&mut self, style: TextStyle) -> Result<StyleId> {
        Ok(StyleId(self.text_styles.add(style)?))
    }

    fn continuous_line_type(&self) -> LinetypeId {
        self.continuous
    }

    fn by_layer_line_type(&self) -> LinetypeId {
        self.by_layer
    }

    fn by_block_line_type(&self) -> LinetypeId {
        self.by_block
    }

    fn add_line_type(&mut self, line_type: LineType) -> Result<LinetypeId> {
        Ok(LinetypeId(self.line_types.add(line_type)?))
    }

    fn layer_0(&self) -> LayerId {
        self.layer_0
    }

    fn add_layer(&mut self, layer: Layer) -> Result<LayerId> {
        Ok(LayerId(self.layers.add(layer)?))
    }

    fn add_block(&mut self, block: BlockRecord) -> Result<BlockId> {
        Ok(BlockId(self.blocks.add(block)?))
    }

    fn add_block_entity(&mut self, block: BlockId, entity: EntityType) -> Result<()> {
        let record = self
            .blocks
            .get_index_mut(block.0)
            .ok_or_else(|| DxfError::Custom(format!("Unknown block {}", block.0)))?;
        record.entities.push(entity);
        Ok(())
    }

    fn model_layout(&self) -> LayoutId {
        LayoutId(0)
    }

    fn find_layout(&self, name: &str) -> Option<LayoutId> {
        self.layouts
            .iter()
            .position(|l| l.name.eq_ignore_ascii_case(name))
            .map(LayoutId)
    }

    fn add_layout(&mut self, name: &str) -> Result<LayoutId> {
        if self.find_layout(name).is_some() {
            return Err(DxfError::Custom(format!("Layout '{}' already exists", name)));
        }
        self.layouts.push(Layout::new(name));
        Ok(LayoutId(self.layouts.len() - 1))
    }

    fn begin_edit(&mut self, layout: LayoutId) -> Result<()> {
        if let Some(open) = self.editing {
            return Err(DxfError::Custom(format!(
                "Layout {} is already being edited",
                open.0
            )));
        }
        self.layout_mut(layout)?;
        self.editing = Some(layout);
        Ok(())
    }

    fn add_entity(&mut self, layout: LayoutId, entity: EntityType) -> Result<()> {
        if self.editing != Some(layout) {
            return Err(DxfError::Custom(format!(
                "Layout {} is not being edited",
                layout.0
            )));
        }
        self.layout_mut(layout)?.entities.push(entity);
        Ok(())
    }

    fn end_edit(&mut self, layout: LayoutId) -> Result<()> {
        if self.editing != Some(layout) {
            return Err(DxfError::Custom(format!(
                "Layout {} is not being edited",
                layout.0
            )));
        }
        self.editing = None;
        Ok(())
    }
}
