//! Error types for the DXF loader

use thiserror::Error;

/// Main error type for DXF decoding.
///
/// Every variant raised by the decoder is fatal: the parse is abandoned and no
/// partial document is returned. Recoverable anomalies are reported through
/// [`crate::notification::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum DxfError {
    /// `read_verify` saw a different group code than required
    #[error("Unexpected code {actual}, expected {expected} at line {line}")]
    UnexpectedCode { expected: i32, actual: i32, line: usize },

    /// A record keyword other than the one the grammar requires
    #[error("Unexpected {actual:?}, expected {expected:?} at line {line}")]
    UnexpectedValue {
        expected: String,
        actual: String,
        line: usize,
    },

    /// The buffer ended in the middle of a record
    #[error("Unexpected end of data at line {line}")]
    UnexpectedEof { line: usize },

    /// A value line that cannot be parsed as the kind its group code requires
    #[error("Invalid value {value:?} for code {code} at line {line}")]
    InvalidValue { code: i32, value: String, line: usize },

    /// A value of the wrong kind was requested from a token
    #[error("Code {code} does not carry a {expected} value")]
    ValueType { code: i32, expected: &'static str },

    /// Unrecognized `$ACADVER` string
    #[error("Unsupported DXF version: {0:?}")]
    UnsupportedVersion(String),

    /// A section appeared twice
    #[error("Section {name} duplicated at line {line}")]
    DuplicateSection { name: String, line: usize },

    /// A section appeared before the one it depends on
    #[error("Section {requires} must precede {section} at line {line}")]
    SectionOrder {
        section: String,
        requires: String,
        line: usize,
    },

    /// A symbol table appeared twice
    #[error("Table {name} duplicated at line {line}")]
    DuplicateTable { name: String, line: usize },

    /// A symbol table appeared before the one it depends on
    #[error("Table {requires} must precede {table} at line {line}")]
    TableOrder {
        table: String,
        requires: String,
        line: usize,
    },

    /// A CLASS record is missing one of its mandatory fields
    #[error("Class field {field} is missing at line {line}")]
    MissingClassField { field: &'static str, line: usize },

    /// XDATA braces did not return to zero
    #[error("Extended data brackets are not balanced at line {line}")]
    UnbalancedXData { line: usize },

    /// A group code that may not appear inside XDATA
    #[error("Invalid extended data code {code} at line {line}")]
    InvalidXDataCode { code: i32, line: usize },

    /// Subclass marker did not match any accepted name
    #[error("Undefined subclass {actual:?}, required {expected:?} at line {line}")]
    UndefinedSubclass {
        actual: String,
        expected: String,
        line: usize,
    },

    /// A second subclass body or a body for an object without a decoder
    #[error("Unexpected class at line {line}")]
    UnexpectedClass { line: usize },

    /// Code 1002 carrying something other than a brace
    #[error("Invalid control string {value:?} at line {line}")]
    InvalidControlString { value: String, line: usize },

    /// A token was pushed back while another one was still pending
    #[error("Token already pushed back at line {line}")]
    PushBackOccupied { line: usize },

    /// A linetype dash element arrived before the element count
    #[error("Pattern size not defined at line {line}")]
    UndefinedPattern { line: usize },

    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing the DXF format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Encoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for DXF operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
