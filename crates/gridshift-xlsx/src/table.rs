//! Table definition parts (`xl/tables/tableN.xml`)

use encoding_rs::Encoding;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use gridshift_core::RangeRect;

use crate::charset::{decode_part, DecodedPart};
use crate::error::{XlsxError, XlsxResult};

/// Default style for new tables
pub const DEFAULT_TABLE_STYLE: &str = "TableStyleMedium2";

/// A parsed table definition
///
/// Only the attributes the engine needs are extracted. The decoded text is
/// kept so the part can be written back with nothing but its range changed.
#[derive(Debug, Clone)]
pub struct TablePart {
    decoded: DecodedPart,
    reference: String,
    name: Option<String>,
    display_name: Option<String>,
}

impl TablePart {
    /// Decode and parse the bytes of a table part
    ///
    /// Fails with [`XlsxError::UnsupportedCharset`] when the bytes cannot be
    /// decoded, and with [`XlsxError::MalformedPart`] or [`XlsxError::Xml`]
    /// when the XML is not a table definition with a `ref` attribute.
    pub fn parse(bytes: &[u8]) -> XlsxResult<Self> {
        let decoded = decode_part(bytes)?;

        let mut reader = Reader::from_str(&decoded.text);
        let mut root = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) | Event::Empty(e) if root.is_none() => {
                    if local_name(e.name().as_ref()) != b"table" {
                        return Err(XlsxError::MalformedPart(format!(
                            "root element is <{}>, expected <table>",
                            String::from_utf8_lossy(e.name().as_ref())
                        )));
                    }

                    let mut reference = None;
                    let mut name = None;
                    let mut display_name = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"ref" => reference = Some(attr.unescape_value()?.into_owned()),
                            b"name" => name = Some(attr.unescape_value()?.into_owned()),
                            b"displayName" => {
                                display_name = Some(attr.unescape_value()?.into_owned())
                            }
                            _ => {}
                        }
                    }
                    root = Some((reference, name, display_name));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let Some((reference, name, display_name)) = root else {
            return Err(XlsxError::MalformedPart("no <table> element".into()));
        };
        let reference = reference
            .ok_or_else(|| XlsxError::MalformedPart("<table> has no ref attribute".into()))?;

        Ok(Self {
            decoded,
            reference,
            name,
            display_name,
        })
    }

    /// The table range as written, e.g. `"A1:D20"`
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Parse the table range
    pub fn rect(&self) -> XlsxResult<RangeRect> {
        Ok(RangeRect::parse(&self.reference)?)
    }

    /// Table name (`name`)
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Display name (`displayName`)
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Charset the part was stored in
    pub fn encoding(&self) -> &'static Encoding {
        self.decoded.encoding
    }

    /// Serialize the part with its range replaced by `new_ref`
    ///
    /// Both the table's own `ref` and the `ref` of its `autoFilter` child are
    /// rewritten. All other markup is written back as it was read, in the
    /// charset the part came in.
    pub fn with_reference(&self, new_ref: &str) -> XlsxResult<Vec<u8>> {
        let mut reader = Reader::from_str(&self.decoded.text);
        let mut writer = Writer::new(Vec::with_capacity(self.decoded.text.len() + 16));
        let mut depth = 0usize;

        loop {
            match reader.read_event()? {
                Event::Decl(decl) if self.decoded.is_transcoded() => {
                    let standalone = decl
                        .standalone()
                        .transpose()?
                        .map(|s| String::from_utf8_lossy(&s).into_owned());
                    writer.write_event(Event::Decl(BytesDecl::new(
                        "1.0",
                        Some("UTF-8"),
                        standalone.as_deref(),
                    )))?;
                }
                Event::Start(e) => {
                    if is_range_owner(&e, depth) {
                        writer.write_event(Event::Start(replace_ref(&e, new_ref)?))?;
                    } else {
                        writer.write_event(Event::Start(e))?;
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if is_range_owner(&e, depth) {
                        writer.write_event(Event::Empty(replace_ref(&e, new_ref)?))?;
                    } else {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    writer.write_event(Event::End(e))?;
                }
                Event::Eof => break,
                ev => writer.write_event(ev)?,
            }
        }

        let text = String::from_utf8(writer.into_inner())
            .map_err(|e| XlsxError::MalformedPart(e.to_string()))?;
        Ok(self.decoded.encode(&text))
    }
}

/// Options for a new table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Table name; `TableN` when not set
    pub name: Option<String>,
    /// Table style; [`DEFAULT_TABLE_STYLE`] when not set
    pub style_name: Option<String>,
    /// First row holds column headers
    pub show_header_row: bool,
    /// Highlight the first column
    pub show_first_column: bool,
    /// Highlight the last column
    pub show_last_column: bool,
    /// Banded rows
    pub show_row_stripes: bool,
    /// Banded columns
    pub show_column_stripes: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            name: None,
            style_name: None,
            show_header_row: true,
            show_first_column: false,
            show_last_column: false,
            show_row_stripes: true,
            show_column_stripes: false,
        }
    }
}

/// Build the XML of a new table definition covering `range`
///
/// Columns are named `Column1`, `Column2`, ... in range order.
pub fn table_part_xml(id: u32, range: &RangeRect, options: &TableOptions) -> String {
    let default_name = format!("Table{}", id);
    let name = escape(options.name.as_deref().unwrap_or(&default_name)).into_owned();
    let style = escape(options.style_name.as_deref().unwrap_or(DEFAULT_TABLE_STYLE)).into_owned();
    let reference = range.to_a1_string();

    let mut content = String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    content.push('\n');
    content.push_str(&format!(
        r#"<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="{}" name="{}" displayName="{}" ref="{}""#,
        id, name, name, reference
    ));
    if options.show_header_row {
        content.push_str(&format!(r#" totalsRowShown="0"><autoFilter ref="{}"/>"#, reference));
    } else {
        content.push_str(r#" headerRowCount="0" totalsRowShown="0">"#);
    }

    content.push_str(&format!(r#"<tableColumns count="{}">"#, range.col_count()));
    for i in 1..=range.col_count() {
        content.push_str(&format!(r#"<tableColumn id="{}" name="Column{}"/>"#, i, i));
    }
    content.push_str("</tableColumns>");

    content.push_str(&format!(
        r#"<tableStyleInfo name="{}" showFirstColumn="{}" showLastColumn="{}" showRowStripes="{}" showColumnStripes="{}"/>"#,
        style,
        options.show_first_column as u8,
        options.show_last_column as u8,
        options.show_row_stripes as u8,
        options.show_column_stripes as u8,
    ));
    content.push_str("</table>");

    log::debug!("built table {} over {}", name, reference);
    content
}

/// `<table>` at the root, or its `<autoFilter>` child
fn is_range_owner(e: &BytesStart, depth: usize) -> bool {
    match local_name(e.name().as_ref()) {
        b"table" => depth == 0,
        b"autoFilter" => depth == 1,
        _ => false,
    }
}

/// Copy of `e` with its `ref` attribute set to `new_ref`
fn replace_ref(e: &BytesStart, new_ref: &str) -> XlsxResult<BytesStart<'static>> {
    let mut out = BytesStart::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"ref" {
            out.push_attribute((attr.key.as_ref(), new_ref.as_bytes()));
        } else {
            out.push_attribute(attr);
        }
    }
    Ok(out)
}

pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|b| *b == b':') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1251};
    use pretty_assertions::assert_eq;

    const TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<table xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" id="1" name="Sales" displayName="Sales" ref="A1:C5"><autoFilter ref="A1:C5"><sortState ref="A2:C5"/></autoFilter><tableColumns count="3"><tableColumn id="1" name="Q&amp;A"/><tableColumn id="2" name="B"/><tableColumn id="3" name="C"/></tableColumns></table>"#;

    #[test]
    fn test_parse_table() {
        let table = TablePart::parse(TABLE.as_bytes()).unwrap();
        assert_eq!(table.reference(), "A1:C5");
        assert_eq!(table.name(), Some("Sales"));
        assert_eq!(table.display_name(), Some("Sales"));
        assert_eq!(table.encoding(), UTF_8);
        assert_eq!(table.rect().unwrap().to_array(), [1, 1, 3, 5]);
    }

    #[test]
    fn test_parse_rejects_non_table_parts() {
        let err = TablePart::parse(b"<worksheet ref=\"A1\"/>").unwrap_err();
        assert!(matches!(err, XlsxError::MalformedPart(_)));

        let err = TablePart::parse(b"<table name=\"T\"/>").unwrap_err();
        assert!(matches!(err, XlsxError::MalformedPart(_)));

        let err = TablePart::parse(b"").unwrap_err();
        assert!(matches!(err, XlsxError::MalformedPart(_)));
    }

    #[test]
    fn test_unparsable_ref_parses_but_has_no_rect() {
        let table = TablePart::parse(br#"<table ref="-" />"#).unwrap();
        assert_eq!(table.reference(), "-");
        assert!(matches!(table.rect(), Err(XlsxError::Core(_))));
    }

    #[test]
    fn test_with_reference_rewrites_table_and_filter_only() {
        let table = TablePart::parse(TABLE.as_bytes()).unwrap();
        let bytes = table.with_reference("A1:C6").unwrap();
        let expected = TABLE.replace(
            r#"ref="A1:C5"><autoFilter ref="A1:C5">"#,
            r#"ref="A1:C6"><autoFilter ref="A1:C6">"#,
        );
        assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    }

    #[test]
    fn test_with_reference_keeps_legacy_encoding() {
        let mut bytes = br#"<?xml version="1.0" encoding="windows-1251"?><table name=""#.to_vec();
        bytes.extend_from_slice(&[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
        bytes.extend_from_slice(br#"" ref="B2:C3"/>"#);

        let table = TablePart::parse(&bytes).unwrap();
        assert_eq!(table.encoding(), WINDOWS_1251);
        assert_eq!(table.name(), Some("Привет"));

        let rewritten = table.with_reference("B3:C4").unwrap();
        let mut expected = br#"<?xml version="1.0" encoding="windows-1251"?><table name=""#.to_vec();
        expected.extend_from_slice(&[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
        expected.extend_from_slice(br#"" ref="B3:C4"/>"#);
        assert_eq!(rewritten, expected);
    }

    #[test]
    fn test_with_reference_transcodes_utf16_to_utf8() {
        let source = r#"<?xml version="1.0" encoding="UTF-16" standalone="yes"?><table ref="A1"/>"#;
        let mut bytes = vec![0xFF, 0xFE];
        for unit in source.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let table = TablePart::parse(&bytes).unwrap();
        let rewritten = table.with_reference("A2").unwrap();
        assert_eq!(
            String::from_utf8(rewritten).unwrap(),
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><table ref="A2"/>"#
        );
    }

    #[test]
    fn test_new_table_part_round_trips() {
        let range = RangeRect::parse("B2:D10").unwrap();
        let options = TableOptions {
            name: Some("Q&A".into()),
            ..Default::default()
        };
        let xml = table_part_xml(3, &range, &options);
        assert!(xml.contains(r#"name="Q&amp;A""#));
        assert!(xml.contains(r#"<tableColumns count="3">"#));
        assert!(xml.contains(r#"<tableColumn id="3" name="Column3"/>"#));
        assert!(xml.contains(r#"name="TableStyleMedium2""#));

        let table = TablePart::parse(xml.as_bytes()).unwrap();
        assert_eq!(table.reference(), "B2:D10");
        assert_eq!(table.name(), Some("Q&A"));
    }

    #[test]
    fn test_new_table_without_header_has_no_filter() {
        let range = RangeRect::parse("A1:A3").unwrap();
        let options = TableOptions {
            show_header_row: false,
            ..Default::default()
        };
        let xml = table_part_xml(1, &range, &options);
        assert!(xml.contains(r#"headerRowCount="0""#));
        assert!(!xml.contains("autoFilter"));
        assert!(xml.contains(r#"name="Table1""#));
    }
}
