//! Extended Data (XDATA) support
//!
//! Extended data is application-specific data attached to any object after a
//! `1001` application-name marker. Only group codes 1000-1071 may appear in it.

use crate::io::dxf::{Brace, DxfToken, DxfValue};
use crate::types::{Handle, Vector3};
use indexmap::IndexMap;

/// Extended data value types
#[derive(Debug, Clone, PartialEq)]
pub enum XDataValue {
    /// String value (group code 1000)
    String(String),
    /// Control string (group code 1002) - "{" or "}"
    ControlString(Brace),
    /// Layer name (group code 1003)
    LayerName(String),
    /// Binary data (group code 1004)
    BinaryData(Vec<u8>),
    /// Database handle (group code 1005)
    Handle(Handle),
    /// 3D point (group codes 1010, 1020, 1030)
    Point3D(Vector3),
    /// 3D position (group codes 1011, 1021, 1031)
    Position3D(Vector3),
    /// 3D displacement (group codes 1012, 1022, 1032)
    Displacement3D(Vector3),
    /// 3D direction (group codes 1013, 1023, 1033)
    Direction3D(Vector3),
    /// Real value (group code 1040)
    Real(f64),
    /// Distance (group code 1041)
    Distance(f64),
    /// Scale factor (group code 1042)
    ScaleFactor(f64),
    /// 16-bit integer (group code 1070)
    Integer16(i16),
    /// 32-bit integer (group code 1071)
    Integer32(i32),
}

impl XDataValue {
    /// Convert a token read inside an XDATA block.
    ///
    /// Returns `None` for codes outside the permitted set. The second and
    /// third coordinate codes (1020..1033) are folded into the vector of
    /// their first code by the token reader and never reach this point on
    /// their own; if they do they are kept as points.
    pub fn from_token(token: &DxfToken) -> Option<Self> {
        let value = match (token.code, &token.value) {
            (1000, DxfValue::Text(s)) => XDataValue::String(s.clone()),
            (1002, DxfValue::Brace(b)) => XDataValue::ControlString(*b),
            (1003, DxfValue::Text(s)) => XDataValue::LayerName(s.clone()),
            (1004, DxfValue::Binary(b)) => XDataValue::BinaryData(b.clone()),
            (1005, DxfValue::Handle(_, h)) => XDataValue::Handle(*h),
            (1010 | 1020 | 1030, v) => XDataValue::Point3D(coordinate(v)?),
            (1011 | 1021 | 1031, v) => XDataValue::Position3D(coordinate(v)?),
            (1012 | 1022 | 1032, v) => XDataValue::Displacement3D(coordinate(v)?),
            (1013 | 1023 | 1033, v) => XDataValue::Direction3D(coordinate(v)?),
            (1040, DxfValue::Real(r)) => XDataValue::Real(*r),
            (1041, DxfValue::Real(r)) => XDataValue::Distance(*r),
            (1042, DxfValue::Real(r)) => XDataValue::ScaleFactor(*r),
            (1070, DxfValue::Int(i)) => XDataValue::Integer16(i16::try_from(*i).ok()?),
            (1071, DxfValue::Int(i)) => XDataValue::Integer32(i32::try_from(*i).ok()?),
            _ => return None,
        };
        Some(value)
    }

    /// The group code this value is written with.
    pub fn code(&self) -> i32 {
        match self {
            XDataValue::String(_) => 1000,
            XDataValue::ControlString(_) => 1002,
            XDataValue::LayerName(_) => 1003,
            XDataValue::BinaryData(_) => 1004,
            XDataValue::Handle(_) => 1005,
            XDataValue::Point3D(_) => 1010,
            XDataValue::Position3D(_) => 1011,
            XDataValue::Displacement3D(_) => 1012,
            XDataValue::Direction3D(_) => 1013,
            XDataValue::Real(_) => 1040,
            XDataValue::Distance(_) => 1041,
            XDataValue::ScaleFactor(_) => 1042,
            XDataValue::Integer16(_) => 1070,
            XDataValue::Integer32(_) => 1071,
        }
    }
}

fn coordinate(value: &DxfValue) -> Option<Vector3> {
    match value {
        DxfValue::Point(p) => Some(*p),
        DxfValue::Real(r) => Some(Vector3::new(*r, 0.0, 0.0)),
        _ => None,
    }
}

/// Extended data of one object, keyed by application name in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedData {
    records: IndexMap<String, Vec<XDataValue>>,
}

impl ExtendedData {
    /// Create a new extended data collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the items of one application, replacing an earlier block of the
    /// same name.
    pub fn insert(&mut self, application_name: impl Into<String>, values: Vec<XDataValue>) {
        self.records.insert(application_name.into(), values);
    }

    /// Get the items of an application
    pub fn get(&self, application_name: &str) -> Option<&[XDataValue]> {
        self.records.get(application_name).map(Vec::as_slice)
    }

    /// Iterate over `(application name, items)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[XDataValue])> {
        self.records.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Get the number of applications
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(code: i32, value: DxfValue) -> DxfToken {
        DxfToken::new(code, value)
    }

    #[test]
    fn test_from_token_permitted_codes() {
        assert_eq!(
            XDataValue::from_token(&token(1000, DxfValue::Text("abc".into()))),
            Some(XDataValue::String("abc".into()))
        );
        assert_eq!(
            XDataValue::from_token(&token(1002, DxfValue::Brace(Brace::Open))),
            Some(XDataValue::ControlString(Brace::Open))
        );
        assert_eq!(
            XDataValue::from_token(&token(1011, DxfValue::Point(Vector3::new(1.0, 2.0, 3.0)))),
            Some(XDataValue::Position3D(Vector3::new(1.0, 2.0, 3.0)))
        );
        assert_eq!(
            XDataValue::from_token(&token(1070, DxfValue::Int(12))),
            Some(XDataValue::Integer16(12))
        );
        assert_eq!(XDataValue::from_token(&token(1001, DxfValue::Text("APP".into()))), None);
        assert_eq!(XDataValue::from_token(&token(8, DxfValue::Text("0".into()))), None);
    }

    #[test]
    fn test_code_matches_source_code() {
        let value = XDataValue::Distance(2.5);
        assert_eq!(value.code(), 1041);
        assert_eq!(XDataValue::from_token(&token(value.code(), DxfValue::Real(2.5))), Some(value));
    }

    #[test]
    fn test_xdata_collection() {
        let mut xdata = ExtendedData::new();
        assert!(xdata.is_empty());

        xdata.insert("APP1", vec![XDataValue::Real(3.5)]);
        xdata.insert("APP2", vec![]);
        xdata.insert("APP1", vec![XDataValue::Integer32(7)]);

        assert_eq!(xdata.len(), 2);
        assert_eq!(xdata.get("APP1"), Some(&[XDataValue::Integer32(7)][..]));
        assert!(xdata.get("APP3").is_none());
        let names: Vec<&str> = xdata.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["APP1", "APP2"]);
    }
}
