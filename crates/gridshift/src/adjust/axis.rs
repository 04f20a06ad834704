//! Single-axis interval adjustment
//!
//! Every structural artifact is moved by the same rule: take its bounds on
//! the axis being edited, compare them against the pivot, and shift one or
//! both bounds by the offset.

use std::cmp::Ordering::{Equal, Greater, Less};

use gridshift_core::{CellRef, RangeRect, MAX_COLS, MAX_ROWS};

/// The axis a row/column edit runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjustDirection {
    /// Rows are inserted or deleted
    Rows,
    /// Columns are inserted or deleted
    Columns,
}

impl AdjustDirection {
    /// Largest valid position on this axis
    pub fn limit(self) -> u32 {
        match self {
            AdjustDirection::Rows => MAX_ROWS,
            AdjustDirection::Columns => MAX_COLS,
        }
    }

    pub(crate) fn noun(self) -> &'static str {
        match self {
            AdjustDirection::Rows => "row",
            AdjustDirection::Columns => "column",
        }
    }

    /// Bounds of `rect` on this axis
    pub(crate) fn span(self, rect: &RangeRect) -> (u32, u32) {
        match self {
            AdjustDirection::Rows => (rect.start_row, rect.end_row),
            AdjustDirection::Columns => (rect.start_col, rect.end_col),
        }
    }

    /// `rect` with its bounds on this axis replaced; `start <= end`
    pub(crate) fn with_span(self, rect: &RangeRect, start: u32, end: u32) -> RangeRect {
        let mut out = *rect;
        match self {
            AdjustDirection::Rows => {
                out.start_row = start;
                out.end_row = end;
            }
            AdjustDirection::Columns => {
                out.start_col = start;
                out.end_col = end;
            }
        }
        out
    }

    /// Position of `cell` on this axis
    pub(crate) fn coord(self, cell: &CellRef) -> u32 {
        match self {
            AdjustDirection::Rows => cell.row,
            AdjustDirection::Columns => cell.col,
        }
    }

    /// `cell` moved to `pos` on this axis
    pub(crate) fn with_coord(self, cell: &CellRef, pos: u32) -> CellRef {
        match self {
            AdjustDirection::Rows => CellRef::new(cell.col, pos),
            AdjustDirection::Columns => CellRef::new(pos, cell.row),
        }
    }
}

/// Bounds after an adjustment, before they are checked against the sheet
///
/// Signed so that a collapsed interval (end before start, or before the
/// first row) can be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBounds {
    pub start: i64,
    pub end: i64,
}

impl AxisBounds {
    /// The interval no longer covers any position
    pub fn is_collapsed(&self) -> bool {
        self.end < self.start || self.end < 1
    }

    /// Convert to 1-based bounds inside `1..=limit`
    ///
    /// `None` when the interval collapsed or was pushed entirely past the
    /// limit. An end past the limit is clamped to it.
    pub fn fit(&self, limit: u32) -> Option<(u32, u32)> {
        let limit = i64::from(limit);
        if self.is_collapsed() || self.start > limit {
            return None;
        }
        let start = self.start.max(1);
        let end = self.end.min(limit);
        Some((start as u32, end as u32))
    }
}

/// Adjust the interval `start..=end` for `offset` rows/columns inserted
/// (positive) or deleted (negative) at `pivot`
///
/// | pivot            | insert         | delete                 |
/// |------------------|----------------|------------------------|
/// | before `start`   | shift both     | shift both             |
/// | at `start`       | shift both     | keep start, move end   |
/// | inside, to `end` | keep start, move end | keep start, move end |
/// | after `end`      | unchanged      | unchanged              |
///
/// ```
/// use gridshift::adjust::adjust;
///
/// // A2:B3, one row inserted at row 2
/// let bounds = adjust(2, 3, 2, 1);
/// assert_eq!((bounds.start, bounds.end), (3, 4));
///
/// // A1:B1, row 1 deleted
/// assert!(adjust(1, 1, 1, -1).is_collapsed());
/// ```
pub fn adjust(start: u32, end: u32, pivot: u32, offset: i32) -> AxisBounds {
    let (s, e, k) = (i64::from(start), i64::from(end), i64::from(offset));
    let insert = offset > 0;

    let (start, end) = match (insert, pivot.cmp(&start), pivot.cmp(&end)) {
        (_, Less, _) => (s + k, e + k),
        (true, Equal, _) => (s + k, e + k),
        (false, Equal, _) => (s, e + k),
        (_, Greater, Less | Equal) => (s, e + k),
        (_, Greater, Greater) => (s, e),
    };
    AxisBounds { start, end }
}
