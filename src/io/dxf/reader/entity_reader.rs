//! Entity decoders
//!
//! [`read_entity`] reads one `0 <KIND>` record and returns the decoded
//! entity. POLYLINE and INSERT own a sequence of VERTEX or ATTRIB records
//! closed by SEQEND, which is read as part of the owner.

use super::object_data::{read_object, warn_unexpected};
use super::object_reader::SubclassReader;
use super::section_reader::Symbols;
use super::stream_reader::{DxfStreamReader, DxfToken};
use super::text_reader::DxfTextReader;
use crate::entities::{
    Arc, AttributeEntity, AttributeFlags, Circle, Entity, EntityCommon, EntityType, Insert, Line,
    Polyline, Polyline3D, Solid, Text, TextAlignment, Vertex, VertexKind,
};
use crate::error::Result;
use crate::io::dxf::group_code_value::START;
use crate::notification::NotificationType;
use crate::types::{Color, LineWeight, Vector3};

/// Read one entity record.
///
/// Returns `None` for kinds that are skipped: unknown kinds and polyline
/// kinds without a target representation.
pub(crate) fn read_entity(reader: &mut DxfTextReader<'_>, symbols: &Symbols) -> Result<Option<EntityType>> {
    let kind = reader.read_verify(START)?.to_string();
    let entity = match kind.as_str() {
        "LINE" => EntityType::Line(decode(reader, Line::new(), |view, line| read_line(view, symbols, line))?),
        "CIRCLE" => EntityType::Circle(decode(reader, Circle::new(), |view, circle| read_circle(view, symbols, circle))?),
        "ARC" => EntityType::Arc(decode(reader, Arc::new(), |view, arc| read_arc(view, symbols, arc))?),
        "LWPOLYLINE" => EntityType::Polyline(decode(reader, Polyline::new(), |view, polyline| {
            read_lwpolyline(view, symbols, polyline)
        })?),
        "TEXT" => EntityType::Text(decode(reader, Text::new(), |view, text| read_text(view, symbols, text))?),
        "SOLID" => EntityType::Solid(decode(reader, Solid::new(), |view, solid| read_solid(view, symbols, solid))?),
        "INSERT" => EntityType::Insert(read_insert(reader, symbols)?),
        "POLYLINE" => return read_polyline(reader, symbols),
        "VERTEX" => EntityType::Vertex(decode(reader, Vertex::new(), |view, vertex| read_vertex(view, symbols, vertex))?),
        "ATTRIB" => EntityType::Attribute(decode(reader, AttributeEntity::new(), |view, attribute| {
            read_attribute(view, symbols, attribute)
        })?),
        _ => {
            let line = reader.line();
            reader.notify(
                NotificationType::NotImplemented,
                "Entity {0} at line {1} is not implemented",
                &[&kind, &line],
            );
            skip_entity(reader)?;
            return Ok(None);
        }
    };
    Ok(Some(entity))
}

/// Run the object envelope around `body` and store the metadata on `value`
fn decode<'a, T, F>(reader: &mut DxfTextReader<'a>, mut value: T, mut body: F) -> Result<T>
where
    T: Entity,
    F: FnMut(&mut SubclassReader<'_, 'a>, &mut T) -> Result<()>,
{
    let read = read_object(reader, |view| body(view, &mut value))?;
    let common = value.common_mut();
    common.object = read.object;
    common.paper_space = read.paper_space;
    Ok(value)
}

/// Consume the rest of a record
fn skip_entity(reader: &mut DxfTextReader<'_>) -> Result<()> {
    while let Some(token) = reader.read_pair()? {
        if token.code == START {
            reader.push_back(token)?;
            break;
        }
    }
    Ok(())
}

/// Read entity records up to and including SEQEND
fn read_sequence(reader: &mut DxfTextReader<'_>, symbols: &Symbols) -> Result<Vec<EntityType>> {
    let mut sequence = Vec::new();
    loop {
        let kind = reader.read_verify(START)?;
        if kind.to_string() == "SEQEND" {
            skip_entity(reader)?;
            return Ok(sequence);
        }
        reader.push_back(DxfToken::new(START, kind))?;
        if let Some(entity) = read_entity(reader, symbols)? {
            sequence.push(entity);
        }
    }
}

fn is_legacy(view: &SubclassReader<'_, '_>) -> bool {
    view.version().is_legacy()
}

/// Decode the `AcDbEntity` properties shared by every entity.
///
/// Legacy records put everything in one flat list, so there the first
/// code this body does not know ends it.
pub(crate) fn read_common(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, common: &mut EntityCommon) -> Result<()> {
    view.enter_subclass(&["AcDbEntity"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            8 => common.layer = symbols.layer(token.expect_str()?),
            6 => common.line_type = symbols.line_type(token.expect_str()?),
            62 => common.color = Some(Color::from_index(token.expect_i16()?)),
            420 => common.color = Some(Color::from_true_color(token.expect_int()? | 0xFF << 24)),
            370 => common.line_weight = Some(LineWeight::from_value(token.expect_i16()?)),
            48 => common.line_type_scale = Some(token.expect_double()?),
            // paper space is recorded by the view
            67 => {}
            5 | 60 | 92 | 105 | 160 | 284 | 310 | 347 | 348 | 380 | 390 | 410 | 430 | 440 => {}
            _ if is_legacy(view) => {
                view.push_back(token)?;
                break;
            }
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_line(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, line: &mut Line) -> Result<()> {
    read_common(view, symbols, &mut line.common)?;
    view.enter_subclass(&["AcDbLine"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            39 => line.thickness = Some(token.expect_double()?),
            10 => line.start = Some(token.expect_point()?),
            11 => line.end = Some(token.expect_point()?),
            210 => line.normal = Some(token.expect_point()?),
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_circle_fields(
    view: &mut SubclassReader<'_, '_>,
    center: &mut Option<Vector3>,
    radius: &mut Option<f64>,
    thickness: &mut Option<f64>,
    normal: &mut Option<Vector3>,
    stop_on_unknown: bool,
) -> Result<()> {
    while let Some(token) = view.read_pair()? {
        match token.code {
            39 => *thickness = Some(token.expect_double()?),
            10 => *center = Some(token.expect_point()?),
            40 => *radius = Some(token.expect_double()?),
            210 => *normal = Some(token.expect_point()?),
            _ if stop_on_unknown => {
                view.push_back(token)?;
                break;
            }
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_circle(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, circle: &mut Circle) -> Result<()> {
    read_common(view, symbols, &mut circle.common)?;
    view.enter_subclass(&["AcDbCircle"])?;
    read_circle_fields(
        view,
        &mut circle.center,
        &mut circle.radius,
        &mut circle.thickness,
        &mut circle.normal,
        false,
    )
}

/// Angles are stored in degrees and decoded to radians; the sweep runs
/// counter-clockwise from the start angle to the end angle.
fn read_arc(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, arc: &mut Arc) -> Result<()> {
    read_common(view, symbols, &mut arc.common)?;
    view.enter_subclass(&["AcDbCircle"])?;
    let legacy = is_legacy(view);
    read_circle_fields(view, &mut arc.center, &mut arc.radius, &mut arc.thickness, &mut arc.normal, legacy)?;

    view.enter_subclass(&["AcDbArc"])?;
    let mut end_angle = None;
    while let Some(token) = view.read_pair()? {
        match token.code {
            50 => arc.start_angle = Some(token.expect_double()?.to_radians()),
            51 => end_angle = Some(token.expect_double()?.to_radians()),
            _ => warn_unexpected(view, &token),
        }
    }
    arc.sweep = Arc::sweep_between(arc.start_angle.unwrap_or(0.0), end_angle.unwrap_or(0.0));
    Ok(())
}

/// Vertices carry their bulge in `z`
fn read_lwpolyline(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, polyline: &mut Polyline) -> Result<()> {
    read_common(view, symbols, &mut polyline.common)?;
    view.enter_subclass(&["AcDbPolyline"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            70 => polyline.flags = Some(token.expect_i16()?),
            43 => polyline.width = Some(token.expect_double()?),
            38 => polyline.elevation = Some(token.expect_double()?),
            39 => polyline.thickness = Some(token.expect_double()?),
            10 => {
                let point = token.expect_point()?;
                polyline.vertices.push(Vector3::new(point.x, point.y, 0.0));
            }
            42 => {
                let bulge = token.expect_double()?;
                match polyline.vertices.last_mut() {
                    Some(vertex) => vertex.z = bulge,
                    None => warn_unexpected(view, &token),
                }
            }
            210 => polyline.normal = Some(token.expect_point()?),
            // vertex count, identifiers and per-vertex widths
            90 | 91 | 40 | 41 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// Horizontal and vertical alignment codes seen so far
#[derive(Debug, Default, Clone, Copy)]
struct AlignmentCodes {
    horizontal: Option<i16>,
    vertical: Option<i16>,
}

impl AlignmentCodes {
    /// `None` when neither code was seen, so a re-entered legacy body keeps
    /// the alignment already resolved.
    fn resolve(self, view: &mut SubclassReader<'_, '_>) -> Option<TextAlignment> {
        if self.horizontal.is_none() && self.vertical.is_none() {
            return None;
        }
        let horizontal = self.horizontal.unwrap_or(0);
        let vertical = self.vertical.unwrap_or(0);
        match TextAlignment::from_codes(horizontal, vertical) {
            Some(alignment) => Some(alignment),
            None => {
                let line = view.line();
                view.warn(
                    "Text alignment {0}/{1} is undefined at line {2}",
                    &[&horizontal, &vertical, &line],
                );
                Some(TextAlignment::Left)
            }
        }
    }
}

/// Apply a code shared by TEXT and ATTRIB; returns false for other codes
fn read_text_field(
    token: &DxfToken,
    symbols: &Symbols,
    text: &mut Text,
    alignment: &mut AlignmentCodes,
) -> Result<bool> {
    match token.code {
        39 => text.thickness = Some(token.expect_double()?),
        10 => text.position = Some(token.expect_point()?),
        40 => text.height = Some(token.expect_double()?),
        1 => text.value = Some(token.expect_str()?.to_string()),
        50 => text.rotation = Some(token.expect_double()?.to_radians()),
        41 => text.width_factor = Some(token.expect_double()?),
        51 => text.oblique_angle = Some(token.expect_double()?.to_radians()),
        7 => text.style = symbols.style(token.expect_str()?),
        71 => text.generation = Some(token.expect_i16()?),
        72 => alignment.horizontal = Some(token.expect_i16()?),
        11 => text.alignment_point = Some(token.expect_point()?),
        210 => text.normal = Some(token.expect_point()?),
        _ => return Ok(false),
    }
    Ok(true)
}

fn read_text(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, text: &mut Text) -> Result<()> {
    read_common(view, symbols, &mut text.common)?;
    view.enter_subclass(&["AcDbText"])?;
    let mut alignment = AlignmentCodes::default();
    while let Some(token) = view.read_pair()? {
        if read_text_field(&token, symbols, text, &mut alignment)? {
            continue;
        }
        match token.code {
            73 => alignment.vertical = Some(token.expect_i16()?),
            _ if is_legacy(view) => {
                view.push_back(token)?;
                break;
            }
            _ => warn_unexpected(view, &token),
        }
    }
    if let Some(resolved) = alignment.resolve(view) {
        text.alignment = resolved;
    }
    Ok(())
}

/// ATTRIB is a TEXT followed by the `AcDbAttribute` subclass. Its vertical
/// alignment is code 74; code 73 is the field length.
fn read_attribute(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, attribute: &mut AttributeEntity) -> Result<()> {
    read_common(view, symbols, &mut attribute.text.common)?;
    let mut alignment = AlignmentCodes::default();
    view.enter_subclass(&["AcDbText"])?;
    read_attribute_fields(view, symbols, attribute, &mut alignment)?;
    if !is_legacy(view) {
        view.enter_subclass(&["AcDbAttribute"])?;
        read_attribute_fields(view, symbols, attribute, &mut alignment)?;
    }
    if let Some(resolved) = alignment.resolve(view) {
        attribute.text.alignment = resolved;
    }
    Ok(())
}

fn read_attribute_fields(
    view: &mut SubclassReader<'_, '_>,
    symbols: &Symbols,
    attribute: &mut AttributeEntity,
    alignment: &mut AlignmentCodes,
) -> Result<()> {
    while let Some(token) = view.read_pair()? {
        if read_text_field(&token, symbols, &mut attribute.text, alignment)? {
            continue;
        }
        match token.code {
            2 => attribute.tag = Some(token.expect_str()?.to_string()),
            70 => attribute.flags = AttributeFlags::from_bits(token.expect_i16()?),
            73 => attribute.field_length = Some(token.expect_i16()?),
            74 => alignment.vertical = Some(token.expect_i16()?),
            280 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

fn read_solid(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, solid: &mut Solid) -> Result<()> {
    read_common(view, symbols, &mut solid.common)?;
    view.enter_subclass(&["AcDbTrace"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            10 => solid.first_corner = Some(token.expect_point()?),
            11 => solid.second_corner = Some(token.expect_point()?),
            12 => solid.third_corner = Some(token.expect_point()?),
            13 => solid.fourth_corner = Some(token.expect_point()?),
            39 => solid.thickness = Some(token.expect_double()?),
            210 => solid.normal = Some(token.expect_point()?),
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// INSERT and, when `66 1` announces them, its ATTRIB sequence
fn read_insert(reader: &mut DxfTextReader<'_>, symbols: &Symbols) -> Result<Insert> {
    let mut has_attributes = false;
    let mut insert = decode(reader, Insert::new(), |view, insert| {
        read_insert_fields(view, symbols, insert, &mut has_attributes)
    })?;
    if !has_attributes {
        return Ok(insert);
    }

    for entity in read_sequence(reader, symbols)? {
        match entity {
            EntityType::Attribute(attribute) => insert.attributes.push(attribute),
            other => {
                let kind = other.as_entity().entity_type();
                let line = reader.line();
                reader.warn("{0} inside INSERT attributes at line {1}", &[&kind, &line]);
            }
        }
    }
    Ok(insert)
}

fn read_insert_fields(
    view: &mut SubclassReader<'_, '_>,
    symbols: &Symbols,
    insert: &mut Insert,
    has_attributes: &mut bool,
) -> Result<()> {
    read_common(view, symbols, &mut insert.common)?;
    view.enter_subclass(&["AcDbBlockReference"])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            66 => *has_attributes = token.expect_int()? == 1,
            2 => {
                let name = token.expect_str()?;
                insert.block = symbols.block(name);
                insert.block_name = Some(name.to_string());
            }
            10 => insert.position = Some(token.expect_point()?),
            // a lone x scale applies to all axes
            41 => {
                let x = token.expect_double()?;
                match insert.scale.as_mut() {
                    Some(scale) => scale.x = x,
                    None => insert.scale = Some(Vector3::new(x, x, x)),
                }
            }
            42 => insert.scale.get_or_insert(Vector3::ONE).y = token.expect_double()?,
            43 => insert.scale.get_or_insert(Vector3::ONE).z = token.expect_double()?,
            50 => insert.rotation = Some(token.expect_double()?.to_radians()),
            70 => insert.column_count = Some(token.expect_i16()?),
            71 => insert.row_count = Some(token.expect_i16()?),
            44 => insert.column_spacing = Some(token.expect_double()?),
            45 => insert.row_spacing = Some(token.expect_double()?),
            210 => insert.normal = Some(token.expect_point()?),
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// POLYLINE header before its VERTEX sequence
#[derive(Debug, Default)]
struct PolylineHeader {
    common: EntityCommon,
    subclass: String,
    has_vertices: bool,
    position: Option<Vector3>,
    thickness: Option<f64>,
    flags: Option<i16>,
    start_width: Option<f64>,
    normal: Option<Vector3>,
}

crate::entities::impl_entity!(PolylineHeader, "POLYLINE");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolylineKind {
    Flat,
    Spatial,
    PolygonMesh,
    PolyFaceMesh,
}

impl PolylineHeader {
    /// Modern records name the kind in the subclass, legacy ones in the flags
    fn kind(&self) -> PolylineKind {
        match self.subclass.as_str() {
            "AcDb2dPolyline" => PolylineKind::Flat,
            "AcDb3dPolyline" => PolylineKind::Spatial,
            "AcDbPolygonMesh" => PolylineKind::PolygonMesh,
            "AcDbPolyFaceMesh" => PolylineKind::PolyFaceMesh,
            _ => {
                let flags = self.flags.unwrap_or(0);
                if flags & 0x40 != 0 {
                    PolylineKind::PolyFaceMesh
                } else if flags & 0x10 != 0 {
                    PolylineKind::PolygonMesh
                } else if flags & 0x08 != 0 {
                    PolylineKind::Spatial
                } else {
                    PolylineKind::Flat
                }
            }
        }
    }
}

fn read_polyline_fields(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, header: &mut PolylineHeader) -> Result<()> {
    read_common(view, symbols, &mut header.common)?;
    header.subclass = view.enter_subclass(&[
        "AcDb3dPolyline",
        "AcDb2dPolyline",
        "AcDbPolyFaceMesh",
        "AcDbPolygonMesh",
    ])?;
    while let Some(token) = view.read_pair()? {
        match token.code {
            66 => header.has_vertices = true,
            10 => header.position = Some(token.expect_point()?),
            39 => header.thickness = Some(token.expect_double()?),
            70 => header.flags = Some(token.expect_i16()?),
            40 => header.start_width = Some(token.expect_double()?),
            210 => header.normal = Some(token.expect_point()?),
            // end width, mesh counts and smooth surface type
            41 | 71 | 72 | 73 | 74 | 75 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

/// POLYLINE with its VERTEX sequence, collapsed into [`Polyline`] or
/// [`Polyline3D`].
fn read_polyline(reader: &mut DxfTextReader<'_>, symbols: &Symbols) -> Result<Option<EntityType>> {
    let header = decode(reader, PolylineHeader::default(), |view, header| {
        read_polyline_fields(view, symbols, header)
    })?;
    let sequence = if header.has_vertices || next_is_vertex(reader)? {
        read_sequence(reader, symbols)?
    } else {
        Vec::new()
    };
    let vertices = sequence.into_iter().filter_map(|entity| match entity {
        EntityType::Vertex(vertex) => Some(vertex),
        _ => None,
    });

    let entity = match header.kind() {
        PolylineKind::Flat => EntityType::Polyline(Polyline {
            vertices: vertices
                .filter_map(|v| v.position.map(|p| Vector3::new(p.x, p.y, v.bulge.unwrap_or(0.0))))
                .collect(),
            flags: header.flags,
            width: header.start_width,
            elevation: header.position.map(|p| p.z),
            thickness: header.thickness,
            normal: header.normal,
            common: header.common,
        }),
        PolylineKind::Spatial => EntityType::Polyline3D(Polyline3D {
            vertices: vertices.filter_map(|v| v.position).collect(),
            flags: header.flags,
            common: header.common,
        }),
        kind => {
            let line = reader.line();
            let name = match kind {
                PolylineKind::PolygonMesh => "polygon mesh",
                _ => "poly face mesh",
            };
            reader.notify(
                NotificationType::NotSupported,
                "POLYLINE as {0} before line {1} is not supported",
                &[&name, &line],
            );
            return Ok(None);
        }
    };
    Ok(Some(entity))
}

/// Later revisions may omit `66 1`; a following VERTEX or SEQEND still
/// opens the sequence
fn next_is_vertex(reader: &mut DxfTextReader<'_>) -> Result<bool> {
    match reader.read_pair()? {
        Some(token) => {
            let opens = token.is(START, "VERTEX") || token.is(START, "SEQEND");
            reader.push_back(token)?;
            Ok(opens)
        }
        None => Ok(false),
    }
}

fn read_vertex(view: &mut SubclassReader<'_, '_>, symbols: &Symbols, vertex: &mut Vertex) -> Result<()> {
    read_common(view, symbols, &mut vertex.common)?;
    if !is_legacy(view) {
        view.enter_subclass(&["AcDbVertex"])?;
        while let Some(token) = view.read_pair()? {
            warn_unexpected(view, &token);
        }
    }
    let subclass = view.enter_subclass(&[
        "AcDbVertex",
        "AcDb2dVertex",
        "AcDb3dPolylineVertex",
        "AcDbPolygonMeshVertex",
        "AcDbPolyFaceMeshVertex",
        "AcDbFaceRecord",
    ])?;
    vertex.kind = VertexKind::from_subclass(&subclass);
    while let Some(token) = view.read_pair()? {
        match token.code {
            10 => vertex.position = Some(token.expect_point()?),
            40 => vertex.start_width = Some(token.expect_double()?),
            41 => vertex.end_width = Some(token.expect_double()?),
            42 => vertex.bulge = Some(token.expect_double()?),
            70 => vertex.flags = Some(token.expect_i16()?),
            50 => vertex.tangent = Some(token.expect_double()?.to_radians()),
            91 => vertex.identifier = Some(token.expect_i32()?),
            // face record indices
            71 | 72 | 73 | 74 => {}
            _ => warn_unexpected(view, &token),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationCollection;
    use crate::types::{DxfVersion, Handle};
    use std::f64::consts::PI;

    fn dxf(pairs: &[(i32, &str)]) -> String {
        pairs.iter().map(|(code, value)| format!("{code}\n{value}\n")).collect()
    }

    fn decode_one(data: &str, version: DxfVersion, diagnostics: &mut NotificationCollection) -> Option<EntityType> {
        let mut reader = DxfTextReader::new(data.as_bytes(), diagnostics);
        reader.set_version(version);
        read_entity(&mut reader, &Symbols::default()).unwrap()
    }

    #[test]
    fn test_modern_line() {
        let data = dxf(&[
            (0, "LINE"),
            (5, "2F"),
            (330, "1F"),
            (100, "AcDbEntity"),
            (8, "0"),
            (62, "1"),
            (100, "AcDbLine"),
            (10, "1.0"),
            (20, "2.0"),
            (30, "0.0"),
            (11, "4.0"),
            (21, "6.0"),
            (31, "0.0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Line(line)) = decode_one(&data, DxfVersion::AC1015, &mut diagnostics) else {
            panic!("expected a line");
        };
        assert_eq!(line.common.object.handle, Some(Handle::new(0x2F)));
        assert_eq!(line.common.object.owner, Some(Handle::new(0x1F)));
        assert_eq!(line.common.color, Some(Color::from_index(1)));
        assert_eq!(line.length(), 5.0);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_legacy_arc_wraps_sweep() {
        let data = dxf(&[
            (0, "ARC"),
            (8, "0"),
            (10, "0.0"),
            (20, "0.0"),
            (40, "2.0"),
            (50, "350.0"),
            (51, "10.0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Arc(arc)) = decode_one(&data, DxfVersion::AC1009, &mut diagnostics) else {
            panic!("expected an arc");
        };
        assert_eq!(arc.radius, Some(2.0));
        assert!((arc.sweep - 20f64.to_radians()).abs() < 1e-9);
        assert!((arc.start_angle.unwrap() - 350f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_lwpolyline_bulge_in_z() {
        let data = dxf(&[
            (0, "LWPOLYLINE"),
            (100, "AcDbEntity"),
            (8, "0"),
            (100, "AcDbPolyline"),
            (90, "2"),
            (70, "1"),
            (10, "0.0"),
            (20, "0.0"),
            (42, "1.0"),
            (10, "1.0"),
            (20, "0.0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Polyline(polyline)) = decode_one(&data, DxfVersion::AC1015, &mut diagnostics) else {
            panic!("expected a polyline");
        };
        assert_eq!(polyline.vertices, vec![Vector3::new(0.0, 0.0, 1.0), Vector3::new(1.0, 0.0, 0.0)]);
        assert!(polyline.is_closed());
    }

    #[test]
    fn test_text_alignment_from_second_subclass() {
        let data = dxf(&[
            (0, "TEXT"),
            (100, "AcDbEntity"),
            (8, "0"),
            (100, "AcDbText"),
            (10, "1.0"),
            (20, "1.0"),
            (40, "2.5"),
            (1, "Hello"),
            (50, "90.0"),
            (72, "1"),
            (11, "3.0"),
            (21, "1.0"),
            (100, "AcDbText"),
            (73, "2"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Text(text)) = decode_one(&data, DxfVersion::AC1015, &mut diagnostics) else {
            panic!("expected a text");
        };
        assert_eq!(text.value.as_deref(), Some("Hello"));
        assert_eq!(text.alignment, TextAlignment::MiddleCenter);
        assert!((text.rotation.unwrap() - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_undefined_alignment_falls_back_to_left() {
        let data = dxf(&[(0, "TEXT"), (8, "0"), (1, "X"), (72, "4"), (73, "3"), (0, "EOF")]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Text(text)) = decode_one(&data, DxfVersion::AC1009, &mut diagnostics) else {
            panic!("expected a text");
        };
        assert_eq!(text.alignment, TextAlignment::Left);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_legacy_properties_after_the_text_body() {
        let data = dxf(&[
            (0, "TEXT"),
            (8, "0"),
            (10, "0.0"),
            (20, "0.0"),
            (40, "1.0"),
            (1, "Exit"),
            (72, "2"),
            (11, "4.0"),
            (21, "0.0"),
            (62, "1"),
            (6, "CONTINUOUS"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Text(text)) = decode_one(&data, DxfVersion::AC1009, &mut diagnostics) else {
            panic!("expected a text");
        };
        assert_eq!(text.value.as_deref(), Some("Exit"));
        assert_eq!(text.alignment, TextAlignment::Right);
        assert_eq!(text.common.color, Some(Color::Index(1)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_entity_is_skipped() {
        let data = dxf(&[(0, "HATCH"), (8, "0"), (2, "SOLID"), (0, "LINE")]);
        let mut diagnostics = NotificationCollection::new();
        let mut reader = DxfTextReader::new(data.as_bytes(), &mut diagnostics);
        assert!(read_entity(&mut reader, &Symbols::default()).unwrap().is_none());
        let next = reader.read_pair().unwrap().unwrap();
        assert!(next.is(START, "LINE"));
        drop(reader);
        assert!(diagnostics.has_type(NotificationType::NotImplemented));
    }

    #[test]
    fn test_insert_scale_and_attributes() {
        let data = dxf(&[
            (0, "INSERT"),
            (8, "0"),
            (66, "1"),
            (2, "DOOR"),
            (10, "5.0"),
            (20, "5.0"),
            (41, "2.0"),
            (50, "45.0"),
            (0, "ATTRIB"),
            (8, "0"),
            (10, "5.0"),
            (20, "6.0"),
            (40, "1.0"),
            (1, "D-01"),
            (2, "TAG"),
            (70, "0"),
            (73, "8"),
            (0, "SEQEND"),
            (8, "0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Insert(insert)) = decode_one(&data, DxfVersion::AC1009, &mut diagnostics) else {
            panic!("expected an insert");
        };
        assert_eq!(insert.block_name.as_deref(), Some("DOOR"));
        assert_eq!(insert.block, None);
        assert_eq!(insert.scale, Some(Vector3::new(2.0, 2.0, 2.0)));
        assert_eq!(insert.attributes.len(), 1);
        let attribute = &insert.attributes[0];
        assert_eq!(attribute.tag.as_deref(), Some("TAG"));
        assert_eq!(attribute.value(), Some("D-01"));
        assert_eq!(attribute.field_length, Some(8));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_legacy_polyline_collapses_to_2d() {
        let data = dxf(&[
            (0, "POLYLINE"),
            (8, "0"),
            (66, "1"),
            (10, "0.0"),
            (20, "0.0"),
            (30, "3.0"),
            (70, "1"),
            (0, "VERTEX"),
            (8, "0"),
            (10, "1.0"),
            (20, "1.0"),
            (42, "0.5"),
            (0, "VERTEX"),
            (8, "0"),
            (10, "2.0"),
            (20, "1.0"),
            (0, "SEQEND"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Polyline(polyline)) = decode_one(&data, DxfVersion::AC1009, &mut diagnostics) else {
            panic!("expected a polyline");
        };
        assert_eq!(polyline.vertices, vec![Vector3::new(1.0, 1.0, 0.5), Vector3::new(2.0, 1.0, 0.0)]);
        assert_eq!(polyline.elevation, Some(3.0));
        assert_eq!(polyline.flags, Some(1));
    }

    #[test]
    fn test_modern_polyline_3d() {
        let data = dxf(&[
            (0, "POLYLINE"),
            (100, "AcDbEntity"),
            (8, "0"),
            (100, "AcDb3dPolyline"),
            (66, "1"),
            (10, "0.0"),
            (20, "0.0"),
            (30, "0.0"),
            (70, "8"),
            (0, "VERTEX"),
            (100, "AcDbEntity"),
            (8, "0"),
            (100, "AcDbVertex"),
            (100, "AcDb3dPolylineVertex"),
            (10, "1.0"),
            (20, "2.0"),
            (30, "3.0"),
            (70, "32"),
            (0, "SEQEND"),
            (100, "AcDbEntity"),
            (8, "0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let Some(EntityType::Polyline3D(polyline)) = decode_one(&data, DxfVersion::AC1015, &mut diagnostics) else {
            panic!("expected a 3d polyline");
        };
        assert_eq!(polyline.vertices, vec![Vector3::new(1.0, 2.0, 3.0)]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_mesh_polyline_is_not_supported() {
        let data = dxf(&[
            (0, "POLYLINE"),
            (8, "0"),
            (66, "1"),
            (70, "16"),
            (0, "VERTEX"),
            (10, "1.0"),
            (20, "2.0"),
            (0, "SEQEND"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        assert!(decode_one(&data, DxfVersion::AC1009, &mut diagnostics).is_none());
        assert!(diagnostics.has_type(NotificationType::NotSupported));
    }

    #[test]
    fn test_paper_space_flag() {
        let data = dxf(&[
            (0, "CIRCLE"),
            (100, "AcDbEntity"),
            (67, "1"),
            (8, "0"),
            (100, "AcDbCircle"),
            (10, "0.0"),
            (20, "0.0"),
            (40, "1.0"),
            (0, "EOF"),
        ]);
        let mut diagnostics = NotificationCollection::new();
        let entity = decode_one(&data, DxfVersion::AC1015, &mut diagnostics).unwrap();
        assert!(entity.common().paper_space);
    }
}
