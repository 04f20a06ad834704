//! The document aggregate: workbook records plus the package they came from

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use gridshift_core::{letters_to_column, Error, RangeRect, Result, TablePartRef, Workbook, MAX_ROWS};
use gridshift_xlsx::{
    calc_chain_xml, new_workbook_package, read_calc_chain, set_workbook_content_type,
    table_part_xml, workbook_content_type, Package, PartStore, TableOptions, CALC_CHAIN_PATH,
    CONTENT_TYPES_PATH,
};

use crate::adjust::AdjustDirection;

/// Maximum length of a path a document can be saved to
pub const MAX_FILE_PATH_LEN: usize = 207;

/// A spreadsheet document
///
/// The workbook holds the records the engine edits in memory; the package
/// holds every part as bytes, including the table definitions that are
/// edited in place.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) workbook: Workbook,
    pub(crate) package: Package,
    path: Option<PathBuf>,
}

impl Document {
    /// Create a document with one empty sheet
    ///
    /// The package starts with the parts of an empty workbook, so saving it
    /// right away produces a file spreadsheet applications can open.
    pub fn new() -> Self {
        Self {
            workbook: Workbook::new(),
            package: new_workbook_package(),
            path: None,
        }
    }

    /// Combine a workbook with the package it was read from
    ///
    /// The calc chain is loaded from `xl/calcChain.xml` when the package has
    /// one. Sheet ids in `workbook` must match the package's (see
    /// [`Workbook::add_worksheet_with_id`]).
    pub fn from_package(mut workbook: Workbook, package: Package) -> Result<Self> {
        if let Some(bytes) = package.load(CALC_CHAIN_PATH) {
            let chain = read_calc_chain(bytes).map_err(|e| Error::other(e.to_string()))?;
            workbook.set_calc_chain(Some(chain));
        }
        Ok(Self {
            workbook,
            package,
            path: None,
        })
    }

    /// Read the package at `path` and combine it with `workbook`
    ///
    /// The path is remembered for [`Document::save`].
    pub fn open<P: AsRef<Path>>(workbook: Workbook, path: P) -> Result<Self> {
        let path = path.as_ref();
        let package = Package::read_file(path).map_err(|e| Error::other(e.to_string()))?;
        let mut doc = Self::from_package(workbook, package)?;
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Path the document was opened from or last saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The workbook records
    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    /// Mutable access to the workbook records
    pub fn workbook_mut(&mut self) -> &mut Workbook {
        &mut self.workbook
    }

    /// The package parts
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Mutable access to the package parts
    pub fn package_mut(&mut self) -> &mut Package {
        &mut self.package
    }

    /// Split the document into its workbook and package
    pub fn into_parts(self) -> (Workbook, Package) {
        (self.workbook, self.package)
    }

    /// Write the calc chain back to its part
    ///
    /// The part is deleted when the workbook has no chain or an empty one.
    pub fn flush_calc_chain(&mut self) -> Result<()> {
        match self.workbook.calc_chain() {
            Some(chain) if !chain.is_empty() => {
                let xml = calc_chain_xml(chain);
                self.package.store(CALC_CHAIN_PATH, xml.into_bytes());
            }
            _ => {
                self.package.delete(CALC_CHAIN_PATH);
            }
        }
        Ok(())
    }

    /// Set the workbook part's content type from the extension of the
    /// document's path
    fn flush_content_type(&mut self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let content_type = content_type_for(path)?;
        let Some(bytes) = self.package.load(CONTENT_TYPES_PATH) else {
            return Ok(());
        };
        let updated = set_workbook_content_type(bytes, content_type)
            .map_err(|e| Error::other(e.to_string()))?;
        if let Some(updated) = updated {
            self.package.store(CONTENT_TYPES_PATH, updated);
        }
        Ok(())
    }

    /// Flush pending records and write the package as a zip archive
    pub fn write<W: Write + Seek>(&mut self, writer: W) -> Result<()> {
        self.flush_calc_chain()?;
        self.flush_content_type()?;
        self.package
            .write(writer)
            .map_err(|e| Error::other(e.to_string()))
    }

    /// Flush pending records and return the zip archive as bytes
    pub fn write_to_buffer(&mut self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.write(&mut buf)?;
        Ok(buf.into_inner())
    }

    /// Save the document to the path it was opened from or last saved to
    pub fn save(&mut self) -> Result<()> {
        match self.path.clone() {
            Some(path) => self.save_as(path),
            None => Err(Error::NoSavePath),
        }
    }

    /// Save the document to `path` and remember it
    ///
    /// The extension must be one of `xlsx`, `xlsm`, `xltx`, `xltm` or `xlam`;
    /// the workbook part's content type is set to match it.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().len() > MAX_FILE_PATH_LEN {
            return Err(Error::PathTooLong(MAX_FILE_PATH_LEN));
        }
        content_type_for(path)?;

        self.path = Some(path.to_path_buf());
        let file = File::create(path).map_err(|e| Error::other(e.to_string()))?;
        self.write(file)?;
        log::debug!("saved document to {}", path.display());
        Ok(())
    }

    // === Tables ===

    /// Add a table covering `range` to `sheet`
    ///
    /// Stores a new `xl/tables/tableN.xml` part, links it from the sheet and
    /// returns the part path.
    pub fn add_table(
        &mut self,
        sheet: &str,
        range: &RangeRect,
        options: &TableOptions,
    ) -> Result<String> {
        let worksheet = self
            .workbook
            .worksheet_by_name_mut(sheet)
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))?;

        let mut id = 1;
        while self.package.contains(&format!("xl/tables/table{}.xml", id)) {
            id += 1;
        }
        let mut rel = worksheet.table_parts().len() + 1;
        while worksheet
            .table_parts()
            .iter()
            .any(|link| link.rel_id == format!("rId{}", rel))
        {
            rel += 1;
        }

        let path = format!("xl/tables/table{}.xml", id);
        self.package
            .store(&path, table_part_xml(id, range, options).into_bytes());
        worksheet.add_table_part(TablePartRef::new(
            format!("rId{}", rel),
            format!("../tables/table{}.xml", id),
        ));

        log::debug!("added table {} on sheet {} over {}", path, sheet, range);
        Ok(path)
    }

    // === Row/Column Commands ===

    /// Insert `count` rows before `row` (1-based)
    pub fn insert_rows(&mut self, sheet: &str, row: u32, count: u32) -> Result<()> {
        check_row(row)?;
        let offset = check_count(count)?;
        self.adjust_helper(sheet, AdjustDirection::Rows, row, offset)
    }

    /// Delete row `row` (1-based)
    pub fn remove_row(&mut self, sheet: &str, row: u32) -> Result<()> {
        check_row(row)?;
        self.adjust_helper(sheet, AdjustDirection::Rows, row, -1)
    }

    /// Insert `count` columns before column `col` (letters, e.g. `"C"`)
    pub fn insert_cols(&mut self, sheet: &str, col: &str, count: u32) -> Result<()> {
        let col = letters_to_column(col)?;
        let offset = check_count(count)?;
        self.adjust_helper(sheet, AdjustDirection::Columns, col, offset)
    }

    /// Delete column `col` (letters, e.g. `"C"`)
    pub fn remove_col(&mut self, sheet: &str, col: &str) -> Result<()> {
        let col = letters_to_column(col)?;
        self.adjust_helper(sheet, AdjustDirection::Columns, col, -1)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn content_type_for(path: &Path) -> Result<&'static str> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(workbook_content_type)
        .ok_or_else(|| Error::UnsupportedFileFormat(path.display().to_string()))
}

fn check_row(row: u32) -> Result<()> {
    if row == 0 || row > MAX_ROWS {
        return Err(Error::invalid_reference(row.to_string(), "row out of range"));
    }
    Ok(())
}

fn check_count(count: u32) -> Result<i32> {
    match i32::try_from(count) {
        Ok(offset) if offset > 0 => Ok(offset),
        _ => Err(Error::InvalidAdjustment(format!(
            "cannot insert {} rows or columns",
            count
        ))),
    }
}
