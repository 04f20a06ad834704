//! Row and column property records

use std::collections::BTreeMap;

use gridshift_core::Worksheet;

use super::axis::{adjust, AdjustDirection};

/// Re-key the sheet's row or column records for the edit
///
/// Returns the number of records dropped because their row/column was
/// deleted or pushed past the last one.
pub(crate) fn adjust_dimensions(
    sheet: &mut Worksheet,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> usize {
    let limit = direction.limit();
    match direction {
        AdjustDirection::Rows => rekey(sheet.rows_mut(), pivot, offset, limit),
        AdjustDirection::Columns => rekey(sheet.columns_mut(), pivot, offset, limit),
    }
}

fn rekey<T>(records: &mut BTreeMap<u32, T>, pivot: u32, offset: i32, limit: u32) -> usize {
    let deleted = if offset < 0 { offset.unsigned_abs() } else { 0 };
    let mut dropped = 0;

    for (key, record) in std::mem::take(records) {
        // A multi-unit delete covers pivot..pivot+n; everything in it goes
        if deleted > 1 && key >= pivot && key - pivot < deleted {
            dropped += 1;
            continue;
        }
        match adjust(key, key, pivot, offset).fit(limit) {
            Some((new_key, _)) => {
                records.insert(new_key, record);
            }
            None => dropped += 1,
        }
    }
    dropped
}
