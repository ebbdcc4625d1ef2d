//! Subclass-scoped view over the token reader
//!
//! Property decoders read one object body through a [`SubclassReader`]. The
//! view ends the body (returns `None`) at the next record start, at an
//! extended data block, or at a subclass marker the decoder did not ask for.
//! The terminating token is pushed back for the enclosing decoder.

use super::stream_reader::{DxfStreamReader, DxfToken, DxfValue};
use super::text_reader::DxfTextReader;
use crate::error::{DxfError, Result};
use crate::io::dxf::group_code_value::{APP_NAME, PAPER_SPACE, START, SUBCLASS};
use crate::notification::NotificationType;
use crate::types::DxfVersion;
use std::fmt;

/// A bounded token stream for one object body.
pub struct SubclassReader<'r, 'a> {
    reader: &'r mut DxfTextReader<'a>,
    subclasses: Option<Vec<&'static str>>,
    is_paper: bool,
}

impl<'r, 'a> SubclassReader<'r, 'a> {
    pub fn new(reader: &'r mut DxfTextReader<'a>) -> Self {
        Self {
            reader,
            subclasses: None,
            is_paper: false,
        }
    }

    /// The unfiltered reader underneath.
    pub fn raw(&mut self) -> &mut DxfTextReader<'a> {
        &mut *self.reader
    }

    /// Whether a `67 1` pair went through this view.
    pub fn is_paper(&self) -> bool {
        self.is_paper
    }

    /// Start decoding one of the subclasses in `names`.
    ///
    /// Legacy documents carry no subclass markers, so there the names are
    /// only recorded and an empty string is returned. Otherwise the next
    /// token must be a `100` marker naming one of them; its name is returned.
    pub fn enter_subclass(&mut self, names: &[&'static str]) -> Result<String> {
        self.subclasses = Some(names.to_vec());
        if self.reader.version().is_legacy() {
            return Ok(String::new());
        }
        let token = self
            .reader
            .read_pair()?
            .ok_or(DxfError::UnexpectedEof { line: self.reader.line() })?;
        let accepted =
            token.code == SUBCLASS && token.as_str().is_some_and(|name| self.accepts(name));
        if accepted {
            return Ok(token.value.to_string());
        }
        let actual = token.value.to_string();
        self.reader.push_back(token)?;
        Err(DxfError::UndefinedSubclass {
            actual,
            expected: names.join(","),
            line: self.reader.line(),
        })
    }

    fn accepts(&self, name: &str) -> bool {
        match &self.subclasses {
            Some(names) => names.iter().any(|n| *n == name),
            None => true,
        }
    }

    fn end_of_body(&mut self, token: DxfToken) -> Result<Option<DxfToken>> {
        self.reader.push_back(token)?;
        Ok(None)
    }
}

impl DxfStreamReader for SubclassReader<'_, '_> {
    fn read_pair(&mut self) -> Result<Option<DxfToken>> {
        loop {
            let token = self
                .reader
                .read_pair()?
                .ok_or(DxfError::UnexpectedEof { line: self.reader.line() })?;
            match token.code {
                START | APP_NAME => return self.end_of_body(token),
                SUBCLASS if self.subclasses.is_some() => {
                    if token.as_str().is_some_and(|name| self.accepts(name)) {
                        continue;
                    }
                    return self.end_of_body(token);
                }
                PAPER_SPACE => {
                    self.is_paper = token.value == DxfValue::Int(1);
                    return Ok(Some(token));
                }
                _ => return Ok(Some(token)),
            }
        }
    }

    fn push_back(&mut self, token: DxfToken) -> Result<()> {
        self.reader.push_back(token)
    }

    fn line(&self) -> usize {
        self.reader.line()
    }

    fn version(&self) -> DxfVersion {
        self.reader.version()
    }

    fn notify(&mut self, notification_type: NotificationType, template: &str, args: &[&dyn fmt::Display]) {
        self.reader.notify(notification_type, template, args);
    }

    fn read_verify(&mut self, code: i32) -> Result<DxfValue> {
        self.reader.read_verify(code)
    }
}
