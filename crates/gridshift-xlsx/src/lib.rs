//! # gridshift-xlsx
//!
//! XLSX (Office Open XML) package parts for gridshift: the part store, charset
//! handling, the codecs for table definitions and the calc chain, and the
//! parts of a new workbook.

pub mod calc_chain;
pub mod charset;
pub mod content_types;
pub mod error;
pub mod package;
pub mod table;
pub mod template;

pub use calc_chain::{calc_chain_xml, read_calc_chain, CALC_CHAIN_PATH};
pub use charset::{decode_part, encode_part, DecodedPart};
pub use content_types::{
    set_workbook_content_type, workbook_content_type, CONTENT_TYPES_PATH, WORKBOOK_PART_NAME,
};
pub use error::{XlsxError, XlsxResult};
pub use package::{Package, PartStore};
pub use table::{table_part_xml, TableOptions, TablePart, DEFAULT_TABLE_STYLE};
pub use template::new_workbook_package;
