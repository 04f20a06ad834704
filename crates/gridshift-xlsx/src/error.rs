//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while reading or rewriting package parts
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Part bytes are not valid in any charset we can detect
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Part decoded fine but its content is not what we expected
    #[error("Malformed part: {0}")]
    MalformedPart(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] gridshift_core::Error),
}
