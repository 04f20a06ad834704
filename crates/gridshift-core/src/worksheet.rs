//! Worksheet type

use std::collections::BTreeMap;

use crate::auto_filter::AutoFilter;
use crate::cell::RangeRect;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::merge::MergeRegion;
use crate::row::Row;
use crate::{MAX_COLS, MAX_ROWS};

/// Directory worksheet parts live in; table relationship targets are relative to it
const WORKSHEET_DIR: &str = "xl/worksheets";

/// A worksheet's link to one of its table definition parts
///
/// Corresponds to a `<tablePart r:id="..."/>` element plus the target of that
/// relationship in the worksheet's `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TablePartRef {
    /// Relationship id, e.g. `"rId1"`
    pub rel_id: String,
    /// Relationship target, e.g. `"../tables/table1.xml"`
    pub target: String,
}

impl TablePartRef {
    /// Create a table part link
    pub fn new<R: Into<String>, T: Into<String>>(rel_id: R, target: T) -> Self {
        Self {
            rel_id: rel_id.into(),
            target: target.into(),
        }
    }

    /// Package path of the table part
    ///
    /// ```
    /// use gridshift_core::TablePartRef;
    ///
    /// let link = TablePartRef::new("rId1", "../tables/table1.xml");
    /// assert_eq!(link.part_path(), "xl/tables/table1.xml");
    /// ```
    pub fn part_path(&self) -> String {
        if let Some(absolute) = self.target.strip_prefix('/') {
            return absolute.to_string();
        }

        let mut segments: Vec<&str> = WORKSHEET_DIR.split('/').collect();
        for segment in self.target.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        segments.join("/")
    }
}

/// A worksheet (single sheet in a workbook)
///
/// Holds the structural artifacts that follow row and column edits: merged
/// regions, the auto-filter, per-row/column properties and the links to the
/// sheet's table parts.
#[derive(Debug, Clone)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Workbook-assigned sheet id, referenced by the calc chain
    sheet_id: u32,
    /// Merged regions, in document order
    merge_regions: Vec<MergeRegion>,
    /// Auto-filter, if any
    auto_filter: Option<AutoFilter>,
    /// Row properties keyed by 1-based row
    rows: BTreeMap<u32, Row>,
    /// Column properties keyed by 1-based column
    columns: BTreeMap<u32, Column>,
    /// Links to table definition parts
    table_parts: Vec<TablePartRef>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            sheet_id: 0,
            merge_regions: Vec::new(),
            auto_filter: None,
            rows: BTreeMap::new(),
            columns: BTreeMap::new(),
            table_parts: Vec::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Get the sheet id (0 until the sheet is added to a workbook)
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    pub(crate) fn set_sheet_id(&mut self, sheet_id: u32) {
        self.sheet_id = sheet_id;
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merge_regions(&self) -> &[MergeRegion] {
        &self.merge_regions
    }

    /// Get mutable access to the merged regions
    pub fn merge_regions_mut(&mut self) -> &mut Vec<MergeRegion> {
        &mut self.merge_regions
    }

    /// Merge cells
    pub fn merge_cells(&mut self, range: &RangeRect) -> Result<()> {
        let conflict = self
            .merge_regions
            .iter()
            .filter_map(MergeRegion::cached_rect)
            .any(|existing| range.overlaps(&existing));
        if conflict {
            return Err(Error::MergedCellConflict(range.to_merge_ref()));
        }
        self.merge_regions.push(MergeRegion::new(*range));
        Ok(())
    }

    /// Append a region as read from a document, without any checks
    pub fn push_merge_region(&mut self, region: MergeRegion) {
        self.merge_regions.push(region);
    }

    /// Unmerge cells
    pub fn unmerge_cells(&mut self, range: &RangeRect) -> bool {
        match self
            .merge_regions
            .iter()
            .position(|region| region.cached_rect() == Some(*range))
        {
            Some(i) => {
                self.merge_regions.remove(i);
                true
            }
            None => false,
        }
    }

    // === Auto Filter ===

    /// Get the auto-filter
    pub fn auto_filter(&self) -> Option<&AutoFilter> {
        self.auto_filter.as_ref()
    }

    /// Get mutable access to the auto-filter
    pub fn auto_filter_mut(&mut self) -> Option<&mut AutoFilter> {
        self.auto_filter.as_mut()
    }

    /// Set the auto-filter, replacing any existing one
    pub fn set_auto_filter(&mut self, filter: AutoFilter) {
        self.auto_filter = Some(filter);
    }

    /// Remove the auto-filter
    pub fn clear_auto_filter(&mut self) -> Option<AutoFilter> {
        self.auto_filter.take()
    }

    // === Row/Column Properties ===

    /// Get row properties (1-based row)
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Get row height (None = default)
    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.rows.get(&row).and_then(|r| r.height)
    }

    /// Set row height
    pub fn set_row_height(&mut self, row: u32, height: f64) -> Result<()> {
        self.update_row(row, |r| r.height = Some(height))
    }

    /// Check if row is hidden
    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.rows.get(&row).map(|r| r.hidden).unwrap_or(false)
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) -> Result<()> {
        self.update_row(row, |r| r.hidden = hidden)
    }

    /// All rows with custom properties
    pub fn rows(&self) -> &BTreeMap<u32, Row> {
        &self.rows
    }

    /// Mutable access to the row properties
    pub fn rows_mut(&mut self) -> &mut BTreeMap<u32, Row> {
        &mut self.rows
    }

    /// Get column width (None = default)
    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.columns.get(&col).and_then(|c| c.width)
    }

    /// Set column width
    pub fn set_column_width(&mut self, col: u32, width: f64) -> Result<()> {
        self.update_column(col, |c| c.width = Some(width))
    }

    /// Check if column is hidden
    pub fn is_column_hidden(&self, col: u32) -> bool {
        self.columns.get(&col).map(|c| c.hidden).unwrap_or(false)
    }

    /// Set column hidden state
    pub fn set_column_hidden(&mut self, col: u32, hidden: bool) -> Result<()> {
        self.update_column(col, |c| c.hidden = hidden)
    }

    /// All columns with custom properties
    pub fn columns(&self) -> &BTreeMap<u32, Column> {
        &self.columns
    }

    /// Mutable access to the column properties
    pub fn columns_mut(&mut self) -> &mut BTreeMap<u32, Column> {
        &mut self.columns
    }

    // === Tables ===

    /// Links to the sheet's table parts
    pub fn table_parts(&self) -> &[TablePartRef] {
        &self.table_parts
    }

    /// Link a table part to this sheet
    pub fn add_table_part(&mut self, link: TablePartRef) {
        self.table_parts.push(link);
    }

    // === Internal ===

    fn update_row(&mut self, row: u32, f: impl FnOnce(&mut Row)) -> Result<()> {
        if row == 0 || row > MAX_ROWS {
            return Err(Error::invalid_reference(row.to_string(), "row out of range"));
        }
        let entry = self.rows.entry(row).or_default();
        f(entry);
        if !entry.has_custom_settings() {
            self.rows.remove(&row);
        }
        Ok(())
    }

    fn update_column(&mut self, col: u32, f: impl FnOnce(&mut Column)) -> Result<()> {
        if col == 0 || col > MAX_COLS {
            return Err(Error::invalid_reference(
                col.to_string(),
                "column out of range",
            ));
        }
        let entry = self.columns.entry(col).or_default();
        f(entry);
        if !entry.has_custom_settings() {
            self.columns.remove(&col);
        }
        Ok(())
    }
}
