//! Charset detection for XML parts
//!
//! Most parts are UTF-8, but table definitions written by other tools show
//! up with byte order marks or with a legacy 8-bit encoding named in the XML
//! declaration. Parts are decoded once into a `String` and re-encoded in
//! their own charset when written back.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// A part decoded to text, remembering how it was encoded
#[derive(Debug, Clone)]
pub struct DecodedPart {
    /// Decoded text, without any byte order mark
    pub text: String,
    /// Encoding the bytes were in
    pub encoding: &'static Encoding,
    /// The bytes started with a byte order mark
    pub bom: bool,
}

impl DecodedPart {
    /// Encoding used when writing the part back
    ///
    /// Same as [`DecodedPart::encoding`] except for UTF-16, which is written
    /// as UTF-8.
    pub fn output_encoding(&self) -> &'static Encoding {
        self.encoding.output_encoding()
    }

    /// Whether writing back changes the encoding, so the XML declaration
    /// has to be rewritten
    pub fn is_transcoded(&self) -> bool {
        self.output_encoding() != self.encoding
    }

    /// Encode `text` the way this part was encoded
    pub fn encode(&self, text: &str) -> Vec<u8> {
        encode_part(text, self.encoding, self.bom)
    }
}

/// Decode the bytes of an XML part
///
/// The charset is taken from, in order: a byte order mark, the `encoding`
/// pseudo-attribute of the XML declaration, and finally UTF-8. Bytes that
/// are invalid in the chosen charset are an error; nothing is replaced.
pub fn decode_part(bytes: &[u8]) -> XlsxResult<DecodedPart> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let text = decode_strict(encoding, &bytes[bom_len..])?;
        return Ok(DecodedPart {
            text,
            encoding,
            bom: true,
        });
    }

    let encoding = match declared_label(bytes) {
        Some(label) => Encoding::for_label(&label).ok_or_else(|| {
            XlsxError::UnsupportedCharset(format!(
                "unknown encoding {:?}",
                String::from_utf8_lossy(&label)
            ))
        })?,
        None => UTF_8,
    };

    let text = decode_strict(encoding, bytes)?;
    Ok(DecodedPart {
        text,
        encoding,
        bom: false,
    })
}

/// Encode `text` in `encoding`, prefixing a byte order mark if asked
///
/// UTF-16 is written as UTF-8 without a mark. Characters the target
/// charset cannot represent become numeric character references.
pub fn encode_part(text: &str, encoding: &'static Encoding, bom: bool) -> Vec<u8> {
    let output = encoding.output_encoding();
    let (encoded, _, unmappable) = output.encode(text);
    if unmappable {
        log::debug!(
            "characters not representable in {} were written as references",
            output.name()
        );
    }

    let mut bytes = Vec::with_capacity(encoded.len() + 3);
    if bom && encoding == UTF_8 {
        bytes.extend_from_slice(b"\xEF\xBB\xBF");
    }
    bytes.extend_from_slice(&encoded);
    bytes
}

fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> XlsxResult<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| XlsxError::UnsupportedCharset(format!("invalid {} data", encoding.name())))
}

/// The encoding label from the XML declaration, if there is one
fn declared_label(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let label = match reader.read_event_into(&mut buf) {
        Ok(Event::Decl(decl)) => decl
            .encoding()
            .and_then(|label| label.ok())
            .map(Cow::into_owned),
        _ => None,
    };
    label
}
