//! Object envelope decoding
//!
//! Every table record, block and entity starts with the same metadata: a
//! handle, application groups (`102 {NAME` ... `102 }`), an owner, then the
//! subclass body, then optional extended data. [`read_object`] walks that
//! envelope and hands the body to a property decoder through a
//! [`SubclassReader`].

use super::object_reader::SubclassReader;
use super::stream_reader::{DxfStreamReader, DxfToken, DxfValue};
use super::text_reader::DxfTextReader;
use crate::error::{DxfError, Result};
use crate::io::dxf::group_code_value::{APP_NAME, CONTROL_STRING, START, SUBCLASS};
use crate::objects::DxfObject;
use crate::xdata::{ExtendedData, XDataValue};
use crate::io::dxf::Brace;

const XDICTIONARY_GROUP: &str = "{ACAD_XDICTIONARY";
const REACTORS_GROUP: &str = "{ACAD_REACTORS";
const GROUP_END: &str = "}";

/// Metadata and paper-space flag of one decoded object
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ObjectRead {
    pub object: DxfObject,
    pub paper_space: bool,
}

/// Decode one object envelope, running `body` on its subclass data.
///
/// Reading stops before the next `0` record, which is left for the caller.
/// In legacy documents the first unrecognized code starts the body, since
/// those files carry no subclass markers.
pub(crate) fn read_object<'a, F>(reader: &mut DxfTextReader<'a>, mut body: F) -> Result<ObjectRead>
where
    F: FnMut(&mut SubclassReader<'_, 'a>) -> Result<()>,
{
    let mut read = ObjectRead::default();
    let mut handle_seen = false;
    let mut body_read = false;

    while let Some(token) = reader.read_pair()? {
        match token.code {
            START => {
                reader.push_back(token)?;
                break;
            }
            5 | 105 => {
                read.object.handle = Some(token.expect_handle()?);
                handle_seen = true;
            }
            CONTROL_STRING => {
                let name = token.expect_str()?.to_string();
                read_application_group(reader, &name, &mut read.object, handle_seen)?;
            }
            330 => {
                let owner = token.expect_handle()?;
                read.object.owner = (!owner.is_null()).then_some(owner);
            }
            SUBCLASS => {
                if body_read {
                    return Err(DxfError::UnexpectedClass { line: reader.line() });
                }
                reader.push_back(token)?;
                read.paper_space |= run_body(reader, &mut body)?;
                body_read = true;
            }
            APP_NAME => {
                reader.push_back(token)?;
                read_extended_data(reader, &mut read.object.extended_data)?;
            }
            // legacy bodies carry no markers; any other code goes back to the body
            _ if reader.version().is_legacy() => {
                let line = reader.line();
                reader.push_back(token)?;
                read.paper_space |= run_body(reader, &mut body)?;
                body_read = true;
                if reader.line() < line {
                    // the body stopped on the same code again
                    if let Some(token) = reader.read_pair()? {
                        warn_unexpected(reader, &token);
                    }
                }
            }
            _ => warn_unexpected(reader, &token),
        }
    }
    Ok(read)
}

fn run_body<'a, F>(reader: &mut DxfTextReader<'a>, body: &mut F) -> Result<bool>
where
    F: FnMut(&mut SubclassReader<'_, 'a>) -> Result<()>,
{
    let mut view = SubclassReader::new(reader);
    body(&mut view)?;
    Ok(view.is_paper())
}

/// Consume a `102 {NAME` group up to its closing `102 }`.
fn read_application_group(
    reader: &mut DxfTextReader<'_>,
    name: &str,
    object: &mut DxfObject,
    handle_seen: bool,
) -> Result<()> {
    if name == GROUP_END {
        reader.warn("Unmatched application group end at line {0}", &[&reader.line()]);
        return Ok(());
    }
    let is_xdictionary = name == XDICTIONARY_GROUP;
    let is_reactors = name == REACTORS_GROUP;
    if is_xdictionary {
        if let DxfValue::Handle(_, handle) = reader.read_verify(360)? {
            if handle_seen {
                object.xdictionary.push(handle);
            }
        }
    }
    loop {
        let token = reader
            .read_pair()?
            .ok_or(DxfError::UnexpectedEof { line: reader.line() })?;
        match token.code {
            CONTROL_STRING if token.as_str() == Some(GROUP_END) => return Ok(()),
            START => {
                reader.warn("Unterminated application group {0} at line {1}", &[&name, &reader.line()]);
                return reader.push_back(token);
            }
            360 if is_xdictionary && handle_seen => object.xdictionary.push(token.expect_handle()?),
            330 if is_reactors => object.reactors.push(token.expect_handle()?),
            _ => {}
        }
    }
}

/// Read all `1001` application blocks up to the next record.
pub(crate) fn read_extended_data(reader: &mut DxfTextReader<'_>, xdata: &mut ExtendedData) -> Result<()> {
    while let Some(token) = reader.read_pair()? {
        match token.code {
            START => return reader.push_back(token),
            APP_NAME => {
                let name = token.expect_str()?.to_string();
                let values = read_application_data(reader)?;
                xdata.insert(name, values);
            }
            code => {
                return Err(DxfError::InvalidXDataCode {
                    code,
                    line: reader.line(),
                })
            }
        }
    }
    Ok(())
}

/// Read the items of one application up to the next `1001` or record.
/// Control braces must balance by the end.
fn read_application_data(reader: &mut DxfTextReader<'_>) -> Result<Vec<XDataValue>> {
    let mut depth = 0i32;
    let mut values = Vec::new();
    while let Some(token) = reader.read_pair()? {
        if token.code == APP_NAME || token.code == START {
            reader.push_back(token)?;
            break;
        }
        let value = XDataValue::from_token(&token).ok_or(DxfError::InvalidXDataCode {
            code: token.code,
            line: reader.line(),
        })?;
        if let XDataValue::ControlString(brace) = value {
            depth += match brace {
                Brace::Open => 1,
                Brace::Close => -1,
            };
        }
        values.push(value);
    }
    if depth != 0 {
        return Err(DxfError::UnbalancedXData { line: reader.line() });
    }
    Ok(values)
}

/// Report a code a decoder has no use for.
pub(crate) fn warn_unexpected<R: DxfStreamReader + ?Sized>(reader: &mut R, token: &DxfToken) {
    let line = reader.line().saturating_sub(1);
    reader.warn("Unexpected code {0} at line {1}", &[&token.code, &line]);
}

/// Read the next pair if it carries `code`; otherwise leave it unread.
pub(crate) fn read_optional<R: DxfStreamReader + ?Sized>(reader: &mut R, code: i32) -> Result<Option<DxfToken>> {
    match reader.read_pair()? {
        Some(token) if token.code == code => Ok(Some(token)),
        Some(token) => {
            reader.push_back(token)?;
            Ok(None)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{NotificationCollection, NotificationType};
    use crate::types::{DxfVersion, Handle};

    fn modern<'a>(data: &'a str, diagnostics: &'a mut NotificationCollection) -> DxfTextReader<'a> {
        let mut reader = DxfTextReader::new(data.as_bytes(), diagnostics);
        reader.set_version(DxfVersion::AC1015);
        reader
    }

    fn skip_body(view: &mut SubclassReader<'_, '_>) -> Result<()> {
        view.enter_subclass(&["AcDbEntity"])?;
        while view.read_pair()?.is_some() {}
        Ok(())
    }

    #[test]
    fn test_metadata() {
        let data = "5\n2A\n102\n{ACAD_XDICTIONARY\n360\n2B\n102\n}\n102\n{ACAD_REACTORS\n330\n1F\n102\n}\n330\n1F\n100\nAcDbEntity\n8\n0\n0\nLINE\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let read = read_object(&mut reader, skip_body).unwrap();
        assert_eq!(read.object.handle, Some(Handle::new(0x2A)));
        assert_eq!(read.object.owner, Some(Handle::new(0x1F)));
        assert_eq!(read.object.xdictionary, vec![Handle::new(0x2B)]);
        assert_eq!(read.object.reactors, vec![Handle::new(0x1F)]);
        assert!(reader.read_pair().unwrap().unwrap().is(0, "LINE"));
    }

    #[test]
    fn test_xdictionary_before_handle_is_dropped() {
        let data = "102\n{ACAD_XDICTIONARY\n360\n2B\n102\n}\n5\n2A\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let read = read_object(&mut reader, skip_body).unwrap();
        assert!(read.object.xdictionary.is_empty());
        assert_eq!(read.object.handle, Some(Handle::new(0x2A)));
    }

    #[test]
    fn test_null_owner_is_empty() {
        let data = "5\n10\n330\n0\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let read = read_object(&mut reader, skip_body).unwrap();
        assert_eq!(read.object.owner, None);
    }

    #[test]
    fn test_second_subclass_entry_fails() {
        let data = "100\nAcDbEntity\n8\n0\n100\nAcDbLine\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let result = read_object(&mut reader, skip_body);
        assert!(matches!(result, Err(DxfError::UnexpectedClass { .. })));
    }

    #[test]
    fn test_paper_space_flag_reaches_caller() {
        let data = "100\nAcDbEntity\n67\n1\n8\n0\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        assert!(read_object(&mut reader, skip_body).unwrap().paper_space);
    }

    #[test]
    fn test_legacy_body_starts_at_first_field() {
        let data = "8\nWALLS\n10\n1\n20\n2\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = DxfTextReader::new(data.as_bytes(), &mut diagnostics);
        let mut codes = Vec::new();
        read_object(&mut reader, |view| {
            while let Some(token) = view.read_pair()? {
                codes.push(token.code);
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(codes, vec![8, 10]);
    }

    /// Reads `8` codes, then `1` codes, stopping at the first other code
    fn two_phase_body(view: &mut SubclassReader<'_, '_>, codes: &mut Vec<i32>) -> Result<()> {
        for wanted in [8, 1] {
            while let Some(token) = view.read_pair()? {
                if token.code != wanted {
                    view.push_back(token)?;
                    break;
                }
                codes.push(token.code);
            }
        }
        Ok(())
    }

    #[test]
    fn test_legacy_body_is_reentered() {
        let data = "8\nWALLS\n1\nnote\n8\nDOORS\n77\n9\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut runs = 0;
        let mut codes = Vec::new();
        {
            let mut reader = DxfTextReader::new(data.as_bytes(), &mut diagnostics);
            read_object(&mut reader, |view| {
                runs += 1;
                two_phase_body(view, &mut codes)
            })
            .unwrap();
            assert!(reader.read_pair().unwrap().unwrap().is(START, "EOF"));
        }
        // the last run only hands 77 back
        assert_eq!(runs, 3);
        assert_eq!(codes, vec![8, 1, 8]);
        // 77 is refused by the second run as well
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_modern_unknown_code_warns() {
        let data = "77\n1\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        {
            let mut reader = modern(data, &mut diagnostics);
            read_object(&mut reader, skip_body).unwrap();
        }
        assert!(diagnostics.has_type(NotificationType::Warning));
    }

    #[test]
    fn test_xdata_is_kept_in_order() {
        let data = "5\nA\n100\nAcDbEntity\n8\n0\n1001\nACAD\n1000\nnote\n1070\n3\n1001\nOTHER\n1040\n2.5\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let read = read_object(&mut reader, skip_body).unwrap();
        let xdata = &read.object.extended_data;
        assert_eq!(xdata.len(), 2);
        assert_eq!(
            xdata.get("ACAD"),
            Some(&[XDataValue::String("note".into()), XDataValue::Integer16(3)][..])
        );
        assert_eq!(xdata.get("OTHER"), Some(&[XDataValue::Real(2.5)][..]));
    }

    #[test]
    fn test_xdata_unbalanced_brace_fails() {
        let data = "1001\nACAD\n1002\n{\n1000\nx\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let result = read_object(&mut reader, skip_body);
        assert!(matches!(result, Err(DxfError::UnbalancedXData { .. })));
    }

    #[test]
    fn test_xdata_balanced_empty_group() {
        let data = "1001\nACAD\n1002\n{\n1002\n}\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let read = read_object(&mut reader, skip_body).unwrap();
        assert_eq!(
            read.object.extended_data.get("ACAD"),
            Some(&[XDataValue::ControlString(Brace::Open), XDataValue::ControlString(Brace::Close)][..])
        );
    }

    #[test]
    fn test_xdata_rejects_foreign_code() {
        let data = "1001\nACAD\n8\nLAYER\n0\nEOF\n";
        let mut diagnostics = NotificationCollection::new();
        let mut reader = modern(data, &mut diagnostics);
        let result = read_object(&mut reader, skip_body);
        assert!(matches!(result, Err(DxfError::InvalidXDataCode { code: 8, .. })));
    }

    #[test]
    fn test_read_optional() {
        let mut diagnostics = NotificationCollection::new();
        let mut reader = DxfTextReader::new(b"40\n1.5\n41\n2\n", &mut diagnostics);
        assert!(read_optional(&mut reader, 41).unwrap().is_none());
        assert_eq!(read_optional(&mut reader, 40).unwrap().map(|t| t.code), Some(40));
        assert_eq!(read_optional(&mut reader, 41).unwrap().map(|t| t.code), Some(41));
        assert!(read_optional(&mut reader, 41).unwrap().is_none());
    }
}
