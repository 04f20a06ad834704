//! # gridshift
//!
//! A Rust library that keeps a spreadsheet document's structure consistent
//! while rows and columns are inserted and deleted.
//!
//! When a row or column edit happens, every range-valued artifact of the
//! sheet follows it:
//!
//! - Row and column properties (heights, widths, hidden flags)
//! - Merged cell regions
//! - The auto-filter range
//! - Table ranges, edited in place inside their package parts
//! - The workbook's calculation chain
//!
//! ## Example
//!
//! ```rust
//! use gridshift::prelude::*;
//!
//! let mut doc = Document::new();
//! let sheet = doc.workbook_mut().worksheet_mut(0).unwrap();
//! sheet.merge_cells(&RangeRect::parse("A2:B3").unwrap()).unwrap();
//! sheet.set_auto_filter(AutoFilter::new(RangeRect::parse("A1:D20").unwrap()));
//!
//! doc.add_table("Sheet1", &RangeRect::parse("F1:G4").unwrap(), &TableOptions::default())
//!     .unwrap();
//!
//! doc.insert_rows("Sheet1", 2, 1).unwrap();
//! doc.remove_col("Sheet1", "A").unwrap();
//!
//! let sheet = doc.workbook().worksheet(0).unwrap();
//! assert_eq!(sheet.merge_regions()[0].reference(), "A3:A4");
//! assert_eq!(sheet.auto_filter().unwrap().reference(), "A1:C21");
//! ```

pub mod adjust;
pub mod document;
pub mod prelude;

pub use adjust::{AdjustDirection, TableOutcome};
pub use document::{Document, MAX_FILE_PATH_LEN};

// Re-export core types
pub use gridshift_core::{
    column_to_letters,
    letters_to_column,
    AutoFilter,
    CalcChain,
    CalcChainEntry,
    // Cell addressing
    CellRef,
    Column,
    // Error types
    Error,
    MergeRegion,
    RangeRect,
    Result,
    Row,
    TablePartRef,
    // Main types
    Workbook,
    Worksheet,

    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export package types
pub use gridshift_xlsx::{Package, PartStore, TableOptions, TablePart, XlsxError};
