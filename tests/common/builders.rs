//! DXF text builders
//!
//! [`DxfBuilder`] writes code/value pairs the way AutoCAD lays them out
//! (right-aligned three-column codes). The record helpers produce the
//! modern (AC1015) shape of each record, with handles and subclass markers.

#![allow(dead_code)]

/// Incremental DXF text writer
#[derive(Debug, Default, Clone)]
pub struct DxfBuilder {
    text: String,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one code/value pair
    pub fn pair(mut self, code: i32, value: impl std::fmt::Display) -> Self {
        self.text.push_str(&format!("{code:>3}\n{value}\n"));
        self
    }

    /// Append a point as its x/y/z group codes
    pub fn point(self, code: i32, x: f64, y: f64, z: f64) -> Self {
        self.pair(code, x).pair(code + 10, y).pair(code + 20, z)
    }

    pub fn section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    /// HEADER section declaring `version`
    pub fn header(self, version: &str) -> Self {
        self.section("HEADER")
            .pair(9, "$ACADVER")
            .pair(1, version)
            .pair(9, "$DWGCODEPAGE")
            .pair(3, "ANSI_1252")
            .end_section()
    }

    /// Table header record
    pub fn table(self, name: &str, handle: &str) -> Self {
        self.pair(0, "TABLE")
            .pair(2, name)
            .pair(5, handle)
            .pair(330, "0")
            .pair(100, "AcDbSymbolTable")
            .pair(70, 1)
    }

    pub fn end_table(self) -> Self {
        self.pair(0, "ENDTAB")
    }

    /// Start of a symbol table record, up to its type-specific subclass
    pub fn record(self, kind: &str, handle: &str, owner: &str, subclass: &str) -> Self {
        self.pair(0, kind)
            .pair(5, handle)
            .pair(330, owner)
            .pair(100, "AcDbSymbolTableRecord")
            .pair(100, subclass)
    }

    pub fn line_type(self, handle: &str, name: &str) -> Self {
        self.record("LTYPE", handle, "5", "AcDbLinetypeTableRecord")
            .pair(2, name)
            .pair(70, 0)
            .pair(3, "")
            .pair(72, 65)
            .pair(73, 0)
            .pair(40, 0.0)
    }

    pub fn layer(self, handle: &str, name: &str, color: i16, line_type: &str) -> Self {
        self.record("LAYER", handle, "2", "AcDbLayerTableRecord")
            .pair(2, name)
            .pair(70, 0)
            .pair(62, color)
            .pair(6, line_type)
            .pair(370, -3)
            .pair(390, "F")
    }

    pub fn block_record(self, handle: &str, name: &str) -> Self {
        self.record("BLOCK_RECORD", handle, "1", "AcDbBlockTableRecord")
            .pair(2, name)
            .pair(340, "0")
    }

    /// BLOCK header, up to its name and base point
    pub fn block(self, handle: &str, owner: &str, name: &str) -> Self {
        self.pair(0, "BLOCK")
            .pair(5, handle)
            .pair(330, owner)
            .pair(100, "AcDbEntity")
            .pair(8, "0")
            .pair(100, "AcDbBlockBegin")
            .pair(2, name)
            .pair(70, 0)
            .point(10, 0.0, 0.0, 0.0)
            .pair(3, name)
            .pair(1, "")
    }

    pub fn end_block(self, handle: &str, owner: &str) -> Self {
        self.pair(0, "ENDBLK")
            .pair(5, handle)
            .pair(330, owner)
            .pair(100, "AcDbEntity")
            .pair(8, "0")
            .pair(100, "AcDbBlockEnd")
    }

    /// Entity record up to its `AcDbEntity` subclass
    pub fn entity(self, kind: &str, handle: &str, owner: &str, layer: &str) -> Self {
        self.pair(0, kind)
            .pair(5, handle)
            .pair(330, owner)
            .pair(100, "AcDbEntity")
            .pair(8, layer)
    }

    pub fn line(self, handle: &str, owner: &str, layer: &str, from: (f64, f64), to: (f64, f64)) -> Self {
        self.entity("LINE", handle, owner, layer)
            .pair(100, "AcDbLine")
            .point(10, from.0, from.1, 0.0)
            .point(11, to.0, to.1, 0.0)
    }

    pub fn circle(self, handle: &str, owner: &str, layer: &str, center: (f64, f64), radius: f64) -> Self {
        self.entity("CIRCLE", handle, owner, layer)
            .pair(100, "AcDbCircle")
            .point(10, center.0, center.1, 0.0)
            .pair(40, radius)
    }

    pub fn eof(self) -> Self {
        self.pair(0, "EOF")
    }

    pub fn build(self) -> String {
        self.text
    }
}

/// TABLES section with the usual built-in records plus `extra_layers`
/// (name, color) on CONTINUOUS, and the model and paper space block records
/// with handles `1F` and `1B`.
pub fn modern_tables(builder: DxfBuilder, extra_layers: &[(&str, i16)]) -> DxfBuilder {
    let mut builder = builder
        .section("TABLES")
        .table("LTYPE", "5")
        .line_type("14", "ByBlock")
        .line_type("15", "ByLayer")
        .line_type("16", "Continuous")
        .end_table()
        .table("LAYER", "2")
        .layer("10", "0", 7, "Continuous");
    for (index, (name, color)) in extra_layers.iter().enumerate() {
        builder = builder.layer(&format!("{:X}", 0x40 + index), name, *color, "Continuous");
    }
    builder
        .end_table()
        .table("STYLE", "3")
        .record("STYLE", "11", "3", "AcDbTextStyleTableRecord")
        .pair(2, "Standard")
        .pair(70, 0)
        .pair(40, 0.0)
        .pair(41, 1.0)
        .pair(50, 0.0)
        .pair(71, 0)
        .pair(42, 0.2)
        .pair(3, "txt")
        .pair(4, "")
        .end_table()
        .table("BLOCK_RECORD", "1")
        .block_record("1F", "*Model_Space")
        .block_record("1B", "*Paper_Space")
        .end_table()
        .end_section()
}

/// BLOCKS section with the empty model and paper space definitions
pub fn modern_layout_blocks(builder: DxfBuilder) -> DxfBuilder {
    builder
        .block("20", "1F", "*Model_Space")
        .end_block("21", "1F")
        .block("1C", "1B", "*Paper_Space")
        .end_block("1D", "1B")
}
