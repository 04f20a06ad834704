//! Coordinate model
//!
//! This module contains:
//! - [`CellRef`] - A cell's location (e.g., "B3")
//! - [`RangeRect`] - A normalized rectangle of cells (e.g., "A1:B10")
//! - Column letter conversion helpers

mod address;

pub use address::{column_to_letters, letters_to_column, CellRef, RangeRect};
