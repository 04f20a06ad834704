//! Workbook type - the main document structure

use crate::calc_chain::CalcChain;
use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// A workbook contains one or more worksheets and the calculation chain
/// shared by all of them.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Next sheet id to hand out; ids are never reused
    next_sheet_id: u32,
    /// Calculation chain, if the document has one
    calc_chain: Option<CalcChain>,
}

impl Workbook {
    /// Create a new empty workbook with one worksheet
    pub fn new() -> Self {
        let mut wb = Self::empty();
        wb.worksheets.push(Worksheet::new("Sheet1"));
        wb.worksheets[0].set_sheet_id(1);
        wb.next_sheet_id = 2;
        wb
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            next_sheet_id: 1,
            calc_chain: None,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    ///
    /// Names are matched case-insensitively, the same way duplicates are
    /// detected.
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| same_name(ws.name(), name))
    }

    /// Get a mutable worksheet by name (case-insensitive)
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets.iter_mut().find(|ws| same_name(ws.name(), name))
    }

    /// Get the index of a worksheet by name (case-insensitive)
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets.iter().position(|ws| same_name(ws.name(), name))
    }

    /// Get the sheet id of a worksheet by name
    pub fn sheet_id(&self, name: &str) -> Option<u32> {
        self.worksheet_by_name(name).map(Worksheet::sheet_id)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Iterate over all worksheets mutably
    pub fn worksheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.worksheets.iter_mut()
    }

    /// Add a new worksheet with default name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Add an existing worksheet to the workbook, assigning it a fresh sheet id
    pub fn add_existing_worksheet(&mut self, mut worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        worksheet.set_sheet_id(self.next_sheet_id);
        self.next_sheet_id += 1;

        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Add a new worksheet that keeps the sheet id it has in the package
    ///
    /// Ids in `xl/workbook.xml` have gaps once sheets were deleted, and calc
    /// chain entries refer to sheets by these ids. Sheets added afterwards get
    /// ids past the largest one seen.
    pub fn add_worksheet_with_id(&mut self, name: &str, sheet_id: u32) -> Result<usize> {
        self.validate_sheet_name(name)?;
        if sheet_id == 0 {
            return Err(Error::InvalidSheetId(sheet_id, "ids start at 1".into()));
        }
        if self.worksheets.iter().any(|ws| ws.sheet_id() == sheet_id) {
            return Err(Error::InvalidSheetId(sheet_id, "already in use".into()));
        }

        let mut worksheet = Worksheet::new(name);
        worksheet.set_sheet_id(sheet_id);
        self.next_sheet_id = self.next_sheet_id.max(sheet_id.saturating_add(1));

        let index = self.worksheets.len();
        self.worksheets.push(worksheet);
        Ok(index)
    }

    /// Remove a worksheet by index
    ///
    /// Calc chain entries that belong to the removed sheet are dropped.
    pub fn remove_worksheet(&mut self, index: usize) -> Result<Worksheet> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }

        let worksheet = self.worksheets.remove(index);
        if let Some(chain) = self.calc_chain.as_mut() {
            let sheet_id = worksheet.sheet_id();
            chain.retain_resolved(|_, id| id != sheet_id);
        }

        Ok(worksheet)
    }

    /// Rename a worksheet
    pub fn rename_worksheet(&mut self, index: usize, new_name: &str) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }

        self.validate_sheet_name_excluding(new_name, Some(index))?;

        self.worksheets[index].set_name(new_name);
        Ok(())
    }

    // ==================== Calc Chain ====================

    /// Get the calculation chain
    pub fn calc_chain(&self) -> Option<&CalcChain> {
        self.calc_chain.as_ref()
    }

    /// Get the calculation chain mutably
    pub fn calc_chain_mut(&mut self) -> Option<&mut CalcChain> {
        self.calc_chain.as_mut()
    }

    /// Replace (or drop) the calculation chain
    pub fn set_calc_chain(&mut self, chain: Option<CalcChain>) {
        self.calc_chain = chain;
    }

    /// Split borrow: one worksheet by name plus the calc chain
    pub fn worksheet_and_calc_chain_mut(
        &mut self,
        name: &str,
    ) -> Option<(&mut Worksheet, Option<&mut CalcChain>)> {
        let worksheet = self
            .worksheets
            .iter_mut()
            .find(|ws| same_name(ws.name(), name))?;
        Some((worksheet, self.calc_chain.as_mut()))
    }

    /// Validate a sheet name
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        self.validate_sheet_name_excluding(name, None)
    }

    /// Validate a sheet name, optionally excluding a sheet from duplicate check
    fn validate_sheet_name_excluding(
        &self,
        name: &str,
        exclude_index: Option<usize>,
    ) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "Sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        for (i, ws) in self.worksheets.iter().enumerate() {
            if Some(i) != exclude_index && same_name(ws.name(), name) {
                return Err(Error::DuplicateSheetName(name.into()));
            }
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

/// Sheet names compare without regard to case
fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
