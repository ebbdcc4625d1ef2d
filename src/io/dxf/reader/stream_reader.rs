//! DXF stream reader trait and common types

use crate::error::{DxfError, Result};
use crate::io::dxf::ReferenceType;
use crate::notification::NotificationType;
use crate::types::{DxfVersion, Handle, Vector3};
use std::fmt;

/// Brace marker carried by control-string codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brace {
    Open,
    Close,
}

impl fmt::Display for Brace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brace::Open => f.write_str("{"),
            Brace::Close => f.write_str("}"),
        }
    }
}

/// A decoded value line, typed by its group code.
#[derive(Debug, Clone, PartialEq)]
pub enum DxfValue {
    Int(i64),
    Real(f64),
    Point(Vector3),
    Binary(Vec<u8>),
    Text(String),
    Handle(ReferenceType, Handle),
    Brace(Brace),
}

impl fmt::Display for DxfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DxfValue::Int(v) => write!(f, "{}", v),
            DxfValue::Real(v) => write!(f, "{}", v),
            DxfValue::Point(p) => write!(f, "{}", p),
            DxfValue::Binary(b) => write!(f, "{}", hex::encode_upper(b)),
            DxfValue::Text(s) => f.write_str(s),
            DxfValue::Handle(_, h) => write!(f, "{}", h),
            DxfValue::Brace(b) => write!(f, "{}", b),
        }
    }
}

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq)]
pub struct DxfToken {
    /// The DXF group code
    pub code: i32,
    /// The decoded value
    pub value: DxfValue,
}

impl DxfToken {
    /// Create a new code/value pair
    pub fn new(code: i32, value: DxfValue) -> Self {
        Self { code, value }
    }

    /// Whether this token is `code` with the string value `value`.
    pub fn is(&self, code: i32, value: &str) -> bool {
        self.code == code && self.as_str() == Some(value)
    }

    /// Get value as string
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            DxfValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get value as integer
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            DxfValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Get value as double. Integers are widened.
    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            DxfValue::Real(v) => Some(v),
            DxfValue::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    /// Get value as point
    pub fn as_point(&self) -> Option<Vector3> {
        match self.value {
            DxfValue::Point(p) => Some(p),
            _ => None,
        }
    }

    /// Get value as handle
    pub fn as_handle(&self) -> Option<Handle> {
        match self.value {
            DxfValue::Handle(_, h) => Some(h),
            _ => None,
        }
    }

    fn mismatch(&self, expected: &'static str) -> DxfError {
        DxfError::ValueType {
            code: self.code,
            expected,
        }
    }

    /// String value or a typed error
    pub fn expect_str(&self) -> Result<&str> {
        self.as_str().ok_or_else(|| self.mismatch("string"))
    }

    /// Integer value or a typed error
    pub fn expect_int(&self) -> Result<i64> {
        self.as_int().ok_or_else(|| self.mismatch("integer"))
    }

    /// 16-bit integer value or a typed error; out-of-range values fail
    pub fn expect_i16(&self) -> Result<i16> {
        i16::try_from(self.expect_int()?).map_err(|_| self.mismatch("16-bit integer"))
    }

    /// 32-bit integer value or a typed error; out-of-range values fail
    pub fn expect_i32(&self) -> Result<i32> {
        i32::try_from(self.expect_int()?).map_err(|_| self.mismatch("32-bit integer"))
    }

    /// Real value or a typed error
    pub fn expect_double(&self) -> Result<f64> {
        self.as_double().ok_or_else(|| self.mismatch("real"))
    }

    /// Point value or a typed error
    pub fn expect_point(&self) -> Result<Vector3> {
        self.as_point().ok_or_else(|| self.mismatch("point"))
    }

    /// Handle value or a typed error
    pub fn expect_handle(&self) -> Result<Handle> {
        self.as_handle().ok_or_else(|| self.mismatch("handle"))
    }
}

/// Trait for reading DXF code/value pairs from a stream
pub trait DxfStreamReader {
    /// Read the next code/value pair; `None` at the end of the data
    fn read_pair(&mut self) -> Result<Option<DxfToken>>;

    /// Push a pair back to be read again on the next `read_pair` call.
    ///
    /// Only one pair may be pending; a second push back fails.
    fn push_back(&mut self, token: DxfToken) -> Result<()>;

    /// Current line number (1-based line of the last value read)
    fn line(&self) -> usize;

    /// Negotiated document version
    fn version(&self) -> DxfVersion;

    /// Report a recoverable anomaly
    fn notify(&mut self, notification_type: NotificationType, template: &str, args: &[&dyn fmt::Display]);

    /// Report a warning
    fn warn(&mut self, template: &str, args: &[&dyn fmt::Display]) {
        self.notify(NotificationType::Warning, template, args);
    }

    /// Read one pair and require its group code to be `code`.
    fn read_verify(&mut self, code: i32) -> Result<DxfValue> {
        match self.read_pair()? {
            Some(token) if token.code == code => Ok(token.value),
            Some(token) => Err(DxfError::UnexpectedCode {
                expected: code,
                actual: token.code,
                line: self.line(),
            }),
            None => Err(DxfError::UnexpectedEof { line: self.line() }),
        }
    }
}
