//! Worksheet auto-filter

use gridshift_core::{Result, Worksheet};

use super::axis::{adjust, AdjustDirection};

/// Move, grow or shrink the sheet's auto-filter
///
/// Returns `true` if the filter collapsed and was removed. Rows the filter
/// hid keep their hidden flag; they are only relocated with the rest of the
/// row records.
pub(crate) fn adjust_auto_filter(
    sheet: &mut Worksheet,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> Result<bool> {
    let Some(filter) = sheet.auto_filter_mut() else {
        return Ok(false);
    };
    let rect = filter.rect()?;

    let (start, end) = direction.span(&rect);
    match adjust(start, end, pivot, offset).fit(direction.limit()) {
        Some((start, end)) => {
            filter.set_rect(direction.with_span(&rect, start, end));
            Ok(false)
        }
        None => {
            sheet.clear_auto_filter();
            Ok(true)
        }
    }
}
