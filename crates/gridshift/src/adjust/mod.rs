//! Structural reference adjustment
//!
//! When rows or columns are inserted into or deleted from a sheet, every
//! range-valued artifact that refers to the sheet has to follow: row and
//! column records, merged regions, the auto-filter, table ranges and the
//! workbook's calc chain. [`Document::adjust_helper`] runs the adjusters for
//! all of them, in that order.
//!
//! There is no rollback. If an artifact kind fails, the kinds handled before
//! it stay adjusted; within one kind nothing changes unless every reference
//! parses.

mod auto_filter;
mod axis;
mod calc_chain;
mod dimensions;
mod merge;
mod table;

pub use axis::{adjust, AdjustDirection, AxisBounds};
pub use table::TableOutcome;

use gridshift_core::{Error, Result};

use crate::document::Document;

impl Document {
    /// Adjust every structural reference on `sheet` for `offset` rows or
    /// columns inserted (positive) or deleted (negative) at `pivot`
    ///
    /// `pivot` is 1-based. Table parts that cannot be read are skipped and
    /// logged; anything else that fails to parse is returned as an error.
    ///
    /// ```
    /// use gridshift::adjust::AdjustDirection;
    /// use gridshift::{Document, RangeRect};
    ///
    /// let mut doc = Document::new();
    /// let sheet = doc.workbook_mut().worksheet_mut(0).unwrap();
    /// sheet.merge_cells(&RangeRect::parse("A2:B3").unwrap()).unwrap();
    ///
    /// doc.adjust_helper("Sheet1", AdjustDirection::Rows, 2, 1).unwrap();
    ///
    /// let sheet = doc.workbook().worksheet(0).unwrap();
    /// assert_eq!(sheet.merge_regions()[0].reference(), "A3:B4");
    /// ```
    pub fn adjust_helper(
        &mut self,
        sheet: &str,
        direction: AdjustDirection,
        pivot: u32,
        offset: i32,
    ) -> Result<()> {
        if pivot == 0 {
            return Err(Error::InvalidAdjustment(format!(
                "{} position must be at least 1",
                direction.noun()
            )));
        }
        if offset == 0 {
            return Err(Error::InvalidAdjustment("offset must not be zero".into()));
        }

        let Document { workbook, package, .. } = self;
        let (worksheet, chain) = workbook
            .worksheet_and_calc_chain_mut(sheet)
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))?;
        let sheet_id = worksheet.sheet_id();

        log::debug!(
            "adjusting {} at {} {} by {}",
            sheet,
            direction.noun(),
            pivot,
            offset
        );

        let dropped = dimensions::adjust_dimensions(worksheet, direction, pivot, offset);
        let merged = merge::adjust_merge_regions(worksheet, direction, pivot, offset)?;
        let filter_removed = auto_filter::adjust_auto_filter(worksheet, direction, pivot, offset)?;

        for outcome in table::adjust_tables(worksheet, package, direction, pivot, offset) {
            if outcome.is_skipped() {
                log::warn!("skipping table on sheet {}: {}", sheet, outcome);
            } else {
                log::debug!("{}", outcome);
            }
        }

        let orphans = calc_chain::adjust_calc_chain(chain, sheet_id, direction, pivot, offset)?;

        log::debug!(
            "{}: dropped {} {} records, {} merged regions, {} calc chain entries{}",
            sheet,
            dropped,
            direction.noun(),
            merged,
            orphans,
            if filter_removed { ", removed auto-filter" } else { "" }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshift_core::{AutoFilter, CalcChain, CalcChainEntry, MergeRegion, RangeRect};

    #[test]
    fn test_unparsable_merge_region_fails() {
        let mut doc = Document::new();
        doc.workbook_mut().add_worksheet_with_name("Sheet2").unwrap();
        doc.workbook_mut()
            .worksheet_mut(0)
            .unwrap()
            .push_merge_region(MergeRegion::from_reference("A:B1"));
        doc.workbook_mut()
            .worksheet_mut(1)
            .unwrap()
            .set_auto_filter(AutoFilter::from_reference("A1:B"));

        let err = doc
            .adjust_helper("Sheet1", AdjustDirection::Rows, 1, 1)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCellReference { ref text, .. } if text == "A"));

        let err = doc
            .adjust_helper("Sheet2", AdjustDirection::Rows, 1, 1)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCellReference { ref text, .. } if text == "B"));
    }

    #[test]
    fn test_missing_sheet() {
        let mut doc = Document::new();
        let err = doc
            .adjust_helper("SheetN", AdjustDirection::Rows, 1, 1)
            .unwrap_err();
        assert_eq!(err.to_string(), "sheet SheetN does not exist");
    }

    #[test]
    fn test_sheet_name_matches_any_case() {
        let mut doc = Document::new();
        doc.workbook_mut()
            .worksheet_mut(0)
            .unwrap()
            .merge_cells(&RangeRect::parse("A2:B3").unwrap())
            .unwrap();

        doc.adjust_helper("sheet1", AdjustDirection::Rows, 2, 1).unwrap();
        doc.adjust_helper("SHEET1", AdjustDirection::Columns, 1, 1).unwrap();

        let sheet = doc.workbook().worksheet(0).unwrap();
        assert_eq!(sheet.merge_regions()[0].reference(), "B3:C4");
    }

    #[test]
    fn test_rejects_zero_pivot_and_offset() {
        let mut doc = Document::new();
        assert!(matches!(
            doc.adjust_helper("Sheet1", AdjustDirection::Rows, 0, 1),
            Err(Error::InvalidAdjustment(_))
        ));
        assert!(matches!(
            doc.adjust_helper("Sheet1", AdjustDirection::Columns, 1, 0),
            Err(Error::InvalidAdjustment(_))
        ));
        // Validation comes before the sheet lookup
        assert!(matches!(
            doc.adjust_helper("SheetN", AdjustDirection::Rows, 0, 0),
            Err(Error::InvalidAdjustment(_))
        ));
    }

    #[test]
    fn test_earlier_kinds_stay_adjusted_when_calc_chain_fails() {
        let mut doc = Document::new();
        let sheet = doc.workbook_mut().worksheet_mut(0).unwrap();
        sheet.push_merge_region(MergeRegion::from_reference("A2:B3"));
        doc.workbook_mut()
            .set_calc_chain(Some(CalcChain::from_entries(vec![CalcChainEntry::new(
                "not a cell",
                1,
            )])));

        assert!(doc
            .adjust_helper("Sheet1", AdjustDirection::Rows, 1, 1)
            .is_err());
        let sheet = doc.workbook().worksheet(0).unwrap();
        assert_eq!(sheet.merge_regions()[0].reference(), "A3:B4");
    }
}
