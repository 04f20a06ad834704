//! Calc chain part (`xl/calcChain.xml`)

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use gridshift_core::{CalcChain, CalcChainEntry};

use crate::error::{XlsxError, XlsxResult};

/// Package path of the calc chain part
pub const CALC_CHAIN_PATH: &str = "xl/calcChain.xml";

/// Read the calc chain from the bytes of its part
pub fn read_calc_chain(bytes: &[u8]) -> XlsxResult<CalcChain> {
    let mut xml_reader = Reader::from_reader(bytes);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut chain = CalcChain::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let mut cell_ref = None;
                let mut sheet_id = None;
                let mut array = false;
                let mut new_level = false;

                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value()?;
                    match attr.key.as_ref() {
                        b"r" => cell_ref = Some(value.into_owned()),
                        b"i" => {
                            let id = value.parse::<u32>().map_err(|_| {
                                XlsxError::MalformedPart(format!("invalid sheet id {:?}", value))
                            })?;
                            sheet_id = Some(id);
                        }
                        b"a" => array = is_true(&value),
                        b"l" => new_level = is_true(&value),
                        _ => {}
                    }
                }

                let cell_ref = cell_ref.ok_or_else(|| {
                    XlsxError::MalformedPart("calc chain entry without r attribute".into())
                })?;
                chain.push(CalcChainEntry {
                    cell_ref,
                    sheet_id,
                    array,
                    new_level,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(chain)
}

/// Serialize a calc chain
///
/// Omitted sheet ids stay omitted, so the output inherits ids exactly the
/// way the input did.
pub fn calc_chain_xml(chain: &CalcChain) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<calcChain xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    for entry in chain.entries() {
        content.push_str(&format!(r#"<c r="{}""#, escape(&entry.cell_ref)));
        if let Some(id) = entry.sheet_id {
            content.push_str(&format!(r#" i="{}""#, id));
        }
        if entry.array {
            content.push_str(r#" a="1""#);
        }
        if entry.new_level {
            content.push_str(r#" l="1""#);
        }
        content.push_str("/>");
    }

    content.push_str("</calcChain>");
    content
}

fn is_true(value: &str) -> bool {
    value == "1" || value == "true"
}
