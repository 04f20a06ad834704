//! Table definition parts
//!
//! Tables live in their own package parts, which may have been written by
//! other tools. A part that is missing, undecodable or not a usable table is
//! skipped and reported; it never fails the edit.

use std::fmt;

use gridshift_core::Worksheet;
use gridshift_xlsx::{PartStore, TablePart, XlsxError};

use super::axis::{adjust, AdjustDirection, AxisBounds};

/// What happened to one table part during an adjustment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    /// The range was updated (or already correct) and written back
    Adjusted {
        /// Part path
        path: String,
        /// Range after the edit
        reference: String,
    },
    /// The sheet links to a part that is not in the package
    SkippedMissing {
        /// Part path
        path: String,
    },
    /// The part is not a table definition with a usable range
    SkippedMalformed {
        /// Part path
        path: String,
        /// What was wrong
        reason: String,
    },
    /// The part's bytes could not be decoded
    SkippedCharset {
        /// Part path
        path: String,
        /// What was wrong
        reason: String,
    },
}

impl TableOutcome {
    /// Part path the outcome is about
    pub fn path(&self) -> &str {
        match self {
            TableOutcome::Adjusted { path, .. }
            | TableOutcome::SkippedMissing { path }
            | TableOutcome::SkippedMalformed { path, .. }
            | TableOutcome::SkippedCharset { path, .. } => path,
        }
    }

    /// Whether the table was skipped
    pub fn is_skipped(&self) -> bool {
        !matches!(self, TableOutcome::Adjusted { .. })
    }
}

impl fmt::Display for TableOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableOutcome::Adjusted { path, reference } => {
                write!(f, "{}: range is now {}", path, reference)
            }
            TableOutcome::SkippedMissing { path } => write!(f, "{}: part not found", path),
            TableOutcome::SkippedMalformed { path, reason } => {
                write!(f, "{}: malformed table ({})", path, reason)
            }
            TableOutcome::SkippedCharset { path, reason } => {
                write!(f, "{}: unsupported charset ({})", path, reason)
            }
        }
    }
}

/// Adjust the range of every table linked from `sheet`
///
/// Returns one outcome per linked table, in link order.
pub(crate) fn adjust_tables<S: PartStore>(
    sheet: &Worksheet,
    store: &mut S,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> Vec<TableOutcome> {
    sheet
        .table_parts()
        .iter()
        .map(|link| adjust_table(&link.part_path(), store, direction, pivot, offset))
        .collect()
}

fn adjust_table<S: PartStore>(
    path: &str,
    store: &mut S,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> TableOutcome {
    let path = path.to_string();
    let Some(bytes) = store.load(&path) else {
        return TableOutcome::SkippedMissing { path };
    };

    let skipped = |path: String, err: XlsxError| match err {
        XlsxError::UnsupportedCharset(reason) => TableOutcome::SkippedCharset { path, reason },
        other => TableOutcome::SkippedMalformed {
            path,
            reason: other.to_string(),
        },
    };

    let table = match TablePart::parse(bytes) {
        Ok(table) => table,
        Err(e) => return skipped(path, e),
    };
    let rect = match table.rect() {
        Ok(rect) => rect,
        Err(e) => return skipped(path, e),
    };

    let (start, end) = direction.span(&rect);
    let (start, end) = clamp(adjust(start, end, pivot, offset), direction.limit());
    let reference = direction.with_span(&rect, start, end).to_a1_string();

    if reference != table.reference() {
        match table.with_reference(&reference) {
            Ok(bytes) => store.store(&path, bytes),
            Err(e) => return skipped(path, e),
        }
    }

    TableOutcome::Adjusted { path, reference }
}

/// Tables are never dropped: a collapsed range shrinks to its first row or
/// column instead
fn clamp(bounds: AxisBounds, limit: u32) -> (u32, u32) {
    bounds.fit(limit).unwrap_or_else(|| {
        let start = bounds.start.clamp(1, i64::from(limit)) as u32;
        (start, start)
    })
}
