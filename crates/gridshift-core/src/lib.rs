//! # gridshift-core
//!
//! Core data structures for the gridshift structural editing library.
//!
//! This crate provides the records that row and column edits have to keep
//! consistent:
//! - [`CellRef`] and [`RangeRect`] - 1-based cell coordinates and rectangles
//! - [`MergeRegion`], [`AutoFilter`] - per-sheet range artifacts
//! - [`CalcChain`] - the workbook's formula calculation order
//! - [`Workbook`], [`Worksheet`] - the main document structures
//!
//! ## Example
//!
//! ```rust
//! use gridshift_core::{RangeRect, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.merge_cells(&RangeRect::parse("A1:B2").unwrap()).unwrap();
//! sheet.set_row_height(3, 24.0).unwrap();
//!
//! assert_eq!(sheet.merge_regions()[0].reference(), "A1:B2");
//! ```

pub mod auto_filter;
pub mod calc_chain;
pub mod cell;
pub mod column;
pub mod error;
pub mod merge;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use auto_filter::AutoFilter;
pub use calc_chain::{CalcChain, CalcChainEntry};
pub use cell::{column_to_letters, letters_to_column, CellRef, RangeRect};
pub use column::Column;
pub use error::{Error, Result};
pub use merge::MergeRegion;
pub use row::Row;
pub use workbook::Workbook;
pub use worksheet::{TablePartRef, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
