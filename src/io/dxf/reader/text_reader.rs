//! DXF ASCII text reader

use super::stream_reader::{Brace, DxfStreamReader, DxfToken, DxfValue};
use crate::error::{DxfError, Result};
use crate::io::dxf::group_code_value::{self, GroupCodeValueType};
use crate::notification::{format_template, Diagnostics, NotificationType};
use crate::types::{DxfVersion, Handle, Vector3};
use encoding_rs::Encoding;
use std::fmt;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// DXF ASCII text reader over an in-memory buffer.
///
/// Each `read_pair` consumes a group code line and a value line. Coordinate
/// triples and split binary chunks are folded into one token by looking
/// ahead; a lookahead that does not belong to the token is undone by
/// restoring the byte position and line counter.
pub struct DxfTextReader<'a> {
    data: &'a [u8],
    position: usize,
    line_number: usize,
    pushed_back: Option<DxfToken>,
    version: DxfVersion,
    /// Encoding negotiated through `$DWGCODEPAGE` (or the configured default)
    code_page: &'static Encoding,
    /// Encoding in effect, UTF-8 for Unicode revisions
    encoding: &'static Encoding,
    diagnostics: &'a mut dyn Diagnostics,
}

impl<'a> DxfTextReader<'a> {
    /// Create a reader over `data` reporting warnings to `diagnostics`.
    pub fn new(data: &'a [u8], diagnostics: &'a mut dyn Diagnostics) -> Self {
        let position = if data.starts_with(UTF8_BOM) { UTF8_BOM.len() } else { 0 };
        Self {
            data,
            position,
            line_number: 0,
            pushed_back: None,
            version: DxfVersion::default(),
            code_page: encoding_rs::WINDOWS_1252,
            encoding: encoding_rs::WINDOWS_1252,
            diagnostics,
        }
    }

    /// Set the code page used until the document negotiates its own.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.set_code_page(encoding);
        self
    }

    /// Set the negotiated version; Unicode revisions switch text to UTF-8.
    pub fn set_version(&mut self, version: DxfVersion) {
        self.version = version;
        self.encoding = if version.is_unicode() {
            encoding_rs::UTF_8
        } else {
            self.code_page
        };
    }

    /// Set the negotiated code page. Ignored for text while the version
    /// forces UTF-8.
    pub fn set_code_page(&mut self, encoding: &'static Encoding) {
        self.code_page = encoding;
        if !self.version.is_unicode() {
            self.encoding = encoding;
        }
    }

    /// Encoding currently used to decode text values
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Read one physical line. Leading spaces are skipped, tabs are kept;
    /// CR, LF and CRLF all end a line.
    fn read_line(&mut self) -> Option<&'a [u8]> {
        let data = self.data;
        if self.position >= data.len() {
            return None;
        }
        let mut start = self.position;
        while start < data.len() && data[start] == b' ' {
            start += 1;
        }
        let mut end = start;
        while end < data.len() && !matches!(data[end], b'\n' | b'\r') {
            end += 1;
        }
        let mut next = end;
        if next < data.len() {
            if data[next] == b'\r' && data.get(next + 1) == Some(&b'\n') {
                next += 2;
            } else {
                next += 1;
            }
        }
        self.position = next;
        self.line_number += 1;
        Some(&data[start..end])
    }

    fn parse_code(&self, line: &[u8]) -> Option<i32> {
        std::str::from_utf8(line).ok()?.trim().parse().ok()
    }

    /// Read a group code line for lookahead. The caller restores the cursor
    /// when the code is not the one it wants.
    fn peek_code_line(&mut self) -> Option<i32> {
        let line = self.read_line()?;
        self.parse_code(line)
    }

    /// Read the value line belonging to `code`.
    fn read_value_line(&mut self) -> Result<&'a [u8]> {
        self.read_line()
            .ok_or(DxfError::UnexpectedEof { line: self.line_number })
    }

    fn invalid(&self, code: i32, raw: &[u8]) -> DxfError {
        DxfError::InvalidValue {
            code,
            value: String::from_utf8_lossy(raw).into_owned(),
            line: self.line_number,
        }
    }

    fn number_text<'s>(&self, code: i32, raw: &'s [u8]) -> Result<&'s str> {
        std::str::from_utf8(raw)
            .map(str::trim)
            .map_err(|_| self.invalid(code, raw))
    }

    fn parse_real(&self, code: i32, raw: &[u8]) -> Result<f64> {
        self.number_text(code, raw)?
            .parse()
            .map_err(|_| self.invalid(code, raw))
    }

    /// Base-10 integer, range-checked against the width of its code
    fn parse_int(&self, code: i32, kind: GroupCodeValueType, raw: &[u8]) -> Result<i64> {
        let value: i64 = self
            .number_text(code, raw)?
            .parse()
            .map_err(|_| self.invalid(code, raw))?;
        let fits = match kind {
            GroupCodeValueType::Byte | GroupCodeValueType::Int16 => i16::try_from(value).is_ok(),
            GroupCodeValueType::Int32 => i32::try_from(value).is_ok(),
            _ => true,
        };
        if fits {
            Ok(value)
        } else {
            Err(self.invalid(code, raw))
        }
    }

    fn parse_hex(&self, code: i32, raw: &[u8]) -> Result<Vec<u8>> {
        hex::decode(self.number_text(code, raw)?).map_err(|_| self.invalid(code, raw))
    }

    fn decode_text(&self, raw: &[u8]) -> String {
        let (text, _) = self.encoding.decode_without_bom_handling(raw);
        text.into_owned()
    }

    /// `code` holds x; `code + 10` must follow with y; `code + 20` may follow
    /// with z.
    fn read_point(&mut self, code: i32, raw: &[u8]) -> Result<Vector3> {
        let x = self.parse_real(code, raw)?;

        let y_code = code + 10;
        let code_line = self
            .read_line()
            .ok_or(DxfError::UnexpectedEof { line: self.line_number })?;
        match self.parse_code(code_line) {
            Some(c) if c == y_code => {}
            Some(c) => {
                return Err(DxfError::UnexpectedCode {
                    expected: y_code,
                    actual: c,
                    line: self.line_number,
                })
            }
            None => return Err(DxfError::Parse(format!(
                "Invalid DXF code at line {}: '{}'",
                self.line_number,
                String::from_utf8_lossy(code_line)
            ))),
        }
        let y_raw = self.read_value_line()?;
        let y = self.parse_real(y_code, y_raw)?;

        let z_code = code + 20;
        let (position, line) = (self.position, self.line_number);
        if self.peek_code_line() == Some(z_code) {
            let z_raw = self.read_value_line()?;
            let z = self.parse_real(z_code, z_raw)?;
            return Ok(Vector3::new(x, y, z));
        }
        self.position = position;
        self.line_number = line;
        Ok(Vector3::new(x, y, 0.0))
    }

    /// Decode a hex chunk and append every directly following chunk with the
    /// same group code.
    fn read_chunk(&mut self, code: i32, raw: &[u8]) -> Result<Vec<u8>> {
        let mut bytes = self.parse_hex(code, raw)?;
        loop {
            let (position, line) = (self.position, self.line_number);
            if self.peek_code_line() != Some(code) {
                self.position = position;
                self.line_number = line;
                return Ok(bytes);
            }
            let next = self.read_value_line()?;
            bytes.extend(self.parse_hex(code, next)?);
        }
    }

    fn decode_value(&mut self, code: i32, raw: &'a [u8]) -> Result<DxfValue> {
        let kind = if code == group_code_value::CONTROL_STRING {
            GroupCodeValueType::String
        } else {
            GroupCodeValueType::from_code(code)
        };

        let value = match kind {
            _ if code == group_code_value::XDATA_CONTROL_STRING => {
                match self.number_text(code, raw)? {
                    "{" => DxfValue::Brace(Brace::Open),
                    "}" => DxfValue::Brace(Brace::Close),
                    other => {
                        return Err(DxfError::InvalidControlString {
                            value: other.to_string(),
                            line: self.line_number,
                        })
                    }
                }
            }
            k if k.is_integer() => DxfValue::Int(self.parse_int(code, k, raw)?),
            GroupCodeValueType::Double => DxfValue::Real(self.parse_real(code, raw)?),
            GroupCodeValueType::Point3D => DxfValue::Point(self.read_point(code, raw)?),
            GroupCodeValueType::Chunk => DxfValue::Binary(self.read_chunk(code, raw)?),
            k => match k.reference_type() {
                Some(reference) => {
                    let text = self.number_text(code, raw)?;
                    let handle = Handle::from_hex(text).ok_or_else(|| self.invalid(code, raw))?;
                    DxfValue::Handle(reference, handle)
                }
                None => DxfValue::Text(self.decode_text(raw)),
            },
        };
        Ok(value)
    }

    /// Read a code/value pair from the buffer, skipping comments
    fn read_pair_internal(&mut self) -> Result<Option<DxfToken>> {
        loop {
            let code_line = match self.read_line() {
                Some(line) => line,
                None => return Ok(None),
            };
            let code = self.parse_code(code_line).ok_or_else(|| {
                DxfError::Parse(format!(
                    "Invalid DXF code at line {}: '{}'",
                    self.line_number,
                    String::from_utf8_lossy(code_line)
                ))
            })?;
            let value_line = self.read_value_line()?;
            if code == group_code_value::COMMENT {
                continue;
            }
            let value = self.decode_value(code, value_line)?;
            return Ok(Some(DxfToken::new(code, value)));
        }
    }
}

impl DxfStreamReader for DxfTextReader<'_> {
    fn read_pair(&mut self) -> Result<Option<DxfToken>> {
        if let Some(token) = self.pushed_back.take() {
            self.line_number += 2;
            return Ok(Some(token));
        }
        self.read_pair_internal()
    }

    fn push_back(&mut self, token: DxfToken) -> Result<()> {
        if self.pushed_back.is_some() {
            return Err(DxfError::PushBackOccupied {
                line: self.line_number,
            });
        }
        self.pushed_back = Some(token);
        self.line_number = self.line_number.saturating_sub(2);
        Ok(())
    }

    fn line(&self) -> usize {
        self.line_number
    }

    fn version(&self) -> DxfVersion {
        self.version
    }

    fn notify(&mut self, notification_type: NotificationType, template: &str, args: &[&dyn fmt::Display]) {
        if tracing::enabled!(tracing::Level::WARN) {
            let rendered: Vec<String> = args.iter().map(|a| a.to_string()).collect();
            tracing::warn!(kind = %notification_type, "{}", format_template(template, &rendered));
        }
        self.diagnostics.notify(notification_type, template, args);
    }
}
