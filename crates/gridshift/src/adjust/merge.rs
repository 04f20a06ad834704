//! Merged regions

use gridshift_core::{MergeRegion, Result, Worksheet};

use super::axis::{adjust, AdjustDirection};

/// Move, grow or shrink every merged region on the sheet
///
/// All references are resolved before anything changes, so an unparsable
/// region leaves the list untouched. Regions that collapse are removed and
/// their count returned.
pub(crate) fn adjust_merge_regions(
    sheet: &mut Worksheet,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> Result<usize> {
    let rects = sheet
        .merge_regions()
        .iter()
        .map(MergeRegion::rect)
        .collect::<Result<Vec<_>>>()?;

    let limit = direction.limit();
    let regions = std::mem::take(sheet.merge_regions_mut());
    let mut removed = 0;

    for (mut region, rect) in regions.into_iter().zip(rects) {
        let (start, end) = direction.span(&rect);
        match adjust(start, end, pivot, offset).fit(limit) {
            Some((start, end)) => {
                region.set_rect(direction.with_span(&rect, start, end));
                sheet.push_merge_region(region);
            }
            None => removed += 1,
        }
    }

    Ok(removed)
}
