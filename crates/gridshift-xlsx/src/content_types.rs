//! Package content types (`[Content_Types].xml`)

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::{XlsxError, XlsxResult};
use crate::table::local_name;

/// Path of the content types part
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Part name of the workbook, as written in `Override@PartName`
pub const WORKBOOK_PART_NAME: &str = "/xl/workbook.xml";

/// Workbook content type for each file extension a workbook can be saved as
const WORKBOOK_CONTENT_TYPES: &[(&str, &str)] = &[
    ("xlam", "application/vnd.ms-excel.addin.macroEnabled.main+xml"),
    ("xlsm", "application/vnd.ms-excel.sheet.macroEnabled.main+xml"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
    ),
    ("xltm", "application/vnd.ms-excel.template.macroEnabled.main+xml"),
    (
        "xltx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.template.main+xml",
    ),
];

/// Content type of the workbook part for a file extension (without the dot)
///
/// Returns `None` for extensions that are not workbook formats.
pub fn workbook_content_type(extension: &str) -> Option<&'static str> {
    let extension = extension.to_lowercase();
    WORKBOOK_CONTENT_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| *content_type)
}

/// Rewrite the content type of the workbook's `Override` entry
///
/// Returns `None` when the part already carries `content_type` or has no
/// override for the workbook.
pub fn set_workbook_content_type(bytes: &[u8], content_type: &str) -> XlsxResult<Option<Vec<u8>>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| XlsxError::MalformedPart(format!("{}: {}", CONTENT_TYPES_PATH, e)))?;
    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::with_capacity(bytes.len() + 16));
    let mut changed = false;

    loop {
        match reader.read_event()? {
            Event::Empty(e) if is_workbook_override(&e)? => {
                let (out, replaced) = replace_content_type(&e, content_type)?;
                changed |= replaced;
                writer.write_event(Event::Empty(out))?;
            }
            Event::Start(e) if is_workbook_override(&e)? => {
                let (out, replaced) = replace_content_type(&e, content_type)?;
                changed |= replaced;
                writer.write_event(Event::Start(out))?;
            }
            Event::Eof => break,
            ev => writer.write_event(ev)?,
        }
    }

    Ok(changed.then(|| writer.into_inner()))
}

fn is_workbook_override(e: &BytesStart) -> XlsxResult<bool> {
    if local_name(e.name().as_ref()) != b"Override" {
        return Ok(false);
    }
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"PartName" {
            return Ok(attr.value.as_ref() == WORKBOOK_PART_NAME.as_bytes());
        }
    }
    Ok(false)
}

fn replace_content_type(
    e: &BytesStart,
    content_type: &str,
) -> XlsxResult<(BytesStart<'static>, bool)> {
    let mut out = BytesStart::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    let mut replaced = false;
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"ContentType" {
            replaced = attr.value.as_ref() != content_type.as_bytes();
            out.push_attribute((attr.key.as_ref(), content_type.as_bytes()));
        } else {
            out.push_attribute(attr);
        }
    }
    Ok((out, replaced))
}
