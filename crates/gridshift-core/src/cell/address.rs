//! Cell reference and range rectangle types

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell reference (e.g., "A1", "$B$2")
///
/// Both coordinates are 1-based, matching the way references are written in
/// the document: column `A` is 1 and the first row is 1. Absolute markers
/// (`$`) are accepted on input and dropped; the structural parts this crate
/// deals with never carry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Column index (1-based, A=1, XFD=16384)
    pub col: u32,
    /// Row index (1-based)
    pub row: u32,
}

impl CellRef {
    /// Create a new cell reference from 1-based coordinates
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse a cell reference from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridshift_core::CellRef;
    ///
    /// let cell = CellRef::parse("B3").unwrap();
    /// assert_eq!((cell.col, cell.row), (2, 3));
    ///
    /// let cell = CellRef::parse("$AA$10").unwrap();
    /// assert_eq!((cell.col, cell.row), (27, 10));
    ///
    /// assert!(CellRef::parse("A0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(Error::invalid_reference(s, "empty reference"));
        }

        let bytes = text.as_bytes();
        let mut pos = 0;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::invalid_reference(s, "no column letters"));
        }
        let col = letters_to_column(&text[col_start..pos])
            .map_err(|_| Error::invalid_reference(s, "column exceeds XFD"))?;

        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &text[pos..];
        if row_str.is_empty() {
            return Err(Error::invalid_reference(s, "no row number"));
        }
        if !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_reference(s, "invalid row number"));
        }

        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::invalid_reference(s, "row number out of range"))?;
        if row == 0 {
            return Err(Error::invalid_reference(s, "row number must be >= 1"));
        }
        if row > MAX_ROWS {
            return Err(Error::invalid_reference(
                s,
                format!("row number exceeds {}", MAX_ROWS),
            ));
        }

        Ok(Self { col, row })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_to_letters(self.col), self.row)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
pub fn column_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut n = col;

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
///
/// Letters are case-insensitive. Columns past `XFD` are rejected.
pub fn letters_to_column(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        return Err(Error::invalid_reference(letters, "empty column letters"));
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::invalid_reference(
                letters,
                format!("invalid column letter '{}'", c),
            ));
        }
        col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        if col > MAX_COLS {
            return Err(Error::invalid_reference(letters, "column exceeds XFD"));
        }
    }

    Ok(col)
}

/// A rectangular range of cells (e.g., "A1:B10")
///
/// All bounds are 1-based and inclusive. A `RangeRect` is always normalized:
/// `start_col <= end_col` and `start_row <= end_row`. Shifted bounds that no
/// longer satisfy this are represented by the adjusters before they are turned
/// back into a rect, never by a `RangeRect` itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeRect {
    pub start_col: u32,
    pub start_row: u32,
    pub end_col: u32,
    pub end_row: u32,
}

impl RangeRect {
    /// Create a range spanning two corner cells, in any order
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start_col: a.col.min(b.col),
            start_row: a.row.min(b.row),
            end_col: a.col.max(b.col),
            end_row: a.row.max(b.row),
        }
    }

    /// Create a range from raw 1-based coordinates, normalizing the corners
    pub fn from_coords(start_col: u32, start_row: u32, end_col: u32, end_row: u32) -> Self {
        Self::new(
            CellRef::new(start_col, start_row),
            CellRef::new(end_col, end_row),
        )
    }

    /// Create a single-cell range
    pub fn single(cell: CellRef) -> Self {
        Self::new(cell, cell)
    }

    /// Parse a range from `A1:B10` notation
    ///
    /// The two corners may be given in any order; `"B3:A1"` is the same range
    /// as `"A1:B3"`. A lone reference is a 1x1 range.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        match s.split_once(':') {
            Some((first, second)) => {
                let a = CellRef::parse(first)?;
                let b = CellRef::parse(second)?;
                Ok(Self::new(a, b))
            }
            None => Ok(Self::single(CellRef::parse(s)?)),
        }
    }

    /// Top-left corner
    pub fn start(&self) -> CellRef {
        CellRef::new(self.start_col, self.start_row)
    }

    /// Bottom-right corner
    pub fn end(&self) -> CellRef {
        CellRef::new(self.end_col, self.end_row)
    }

    /// Bounds as `[start_col, start_row, end_col, end_row]`
    pub fn to_array(&self) -> [u32; 4] {
        [self.start_col, self.start_row, self.end_col, self.end_row]
    }

    /// Whether both corners are the same cell
    pub fn is_single_cell(&self) -> bool {
        self.start_col == self.end_col && self.start_row == self.end_row
    }

    /// Check if a cell is within this range
    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row >= self.start_row
            && cell.row <= self.end_row
            && cell.col >= self.start_col
            && cell.col <= self.end_col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end_col - self.start_col + 1
    }

    /// Check if this range overlaps with another
    pub fn overlaps(&self, other: &RangeRect) -> bool {
        self.start_row <= other.end_row
            && self.end_row >= other.start_row
            && self.start_col <= other.end_col
            && self.end_col >= other.start_col
    }

    /// Format as `A1:B10`, or a lone `A1` when both corners coincide
    pub fn to_a1_string(&self) -> String {
        if self.is_single_cell() {
            self.start().to_a1_string()
        } else {
            self.to_merge_ref()
        }
    }

    /// Format as `A1:B10`, always writing both corners
    ///
    /// Merge regions need this form even when they cover a single cell.
    pub fn to_merge_ref(&self) -> String {
        format!("{}:{}", self.start().to_a1_string(), self.end().to_a1_string())
    }
}

impl fmt::Display for RangeRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for RangeRect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(1), "A");
        assert_eq!(column_to_letters(2), "B");
        assert_eq!(column_to_letters(26), "Z");
        assert_eq!(column_to_letters(27), "AA");
        assert_eq!(column_to_letters(28), "AB");
        assert_eq!(column_to_letters(702), "ZZ");
        assert_eq!(column_to_letters(703), "AAA");
        assert_eq!(column_to_letters(16384), "XFD");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(letters_to_column("A").unwrap(), 1);
        assert_eq!(letters_to_column("Z").unwrap(), 26);
        assert_eq!(letters_to_column("AA").unwrap(), 27);
        assert_eq!(letters_to_column("ZZ").unwrap(), 702);
        assert_eq!(letters_to_column("XFD").unwrap(), 16384);

        // Case insensitive
        assert_eq!(letters_to_column("a").unwrap(), 1);
        assert_eq!(letters_to_column("xfd").unwrap(), 16384);

        assert!(letters_to_column("XFE").is_err());
        assert!(letters_to_column("AAAAAAAAAAAAAAAA").is_err());
        assert!(letters_to_column("A1").is_err());
    }

    #[test]
    fn test_cell_ref_parse() {
        assert_eq!(CellRef::parse("A1").unwrap(), CellRef::new(1, 1));
        assert_eq!(CellRef::parse("B3").unwrap(), CellRef::new(2, 3));
        assert_eq!(CellRef::parse("$C$7").unwrap(), CellRef::new(3, 7));
        assert_eq!(CellRef::parse("c7").unwrap(), CellRef::new(3, 7));
        assert_eq!(
            CellRef::parse("XFD1048576").unwrap(),
            CellRef::new(16384, 1_048_576)
        );
    }

    #[test]
    fn test_cell_ref_parse_errors() {
        for text in ["", "A", "1", "A0", "A-1", "A+1", "A1B", "A1048577", "XFE1", "invalid coordinates"] {
            let err = CellRef::parse(text).unwrap_err();
            assert!(err.is_invalid_reference(), "{text:?} gave {err:?}");
        }
    }

    #[test]
    fn test_cell_ref_display() {
        assert_eq!(CellRef::new(1, 1).to_string(), "A1");
        assert_eq!(CellRef::new(3, 100).to_string(), "C100");
    }

    #[test]
    fn test_range_parse_normalizes_corners() {
        let range = RangeRect::parse("B3:A1").unwrap();
        assert_eq!(range.to_array(), [1, 1, 2, 3]);
        assert_eq!(range.to_string(), "A1:B3");

        let range = RangeRect::parse("C3").unwrap();
        assert_eq!(range.to_array(), [3, 3, 3, 3]);
        assert!(range.is_single_cell());
    }

    #[test]
    fn test_range_parse_errors() {
        let err = RangeRect::parse("A:B1").unwrap_err();
        assert!(matches!(err, Error::InvalidCellReference { ref text, .. } if text == "A"));

        let err = RangeRect::parse("A1:B").unwrap_err();
        assert!(matches!(err, Error::InvalidCellReference { ref text, .. } if text == "B"));

        assert!(RangeRect::parse("-").is_err());
    }

    #[test]
    fn test_range_formatting() {
        let single = RangeRect::parse("B2:B2").unwrap();
        assert_eq!(single.to_a1_string(), "B2");
        assert_eq!(single.to_merge_ref(), "B2:B2");

        let wide = RangeRect::from_coords(2, 4, 1, 2);
        assert_eq!(wide.to_a1_string(), "A2:B4");
    }

    #[test]
    fn test_range_contains_and_overlaps() {
        let range = RangeRect::parse("B2:D4").unwrap();
        assert!(range.contains(&CellRef::new(2, 2)));
        assert!(range.contains(&CellRef::new(4, 4)));
        assert!(!range.contains(&CellRef::new(1, 1)));
        assert!(!range.contains(&CellRef::new(2, 5)));

        assert!(range.overlaps(&RangeRect::parse("D4:E5").unwrap()));
        assert!(!range.overlaps(&RangeRect::parse("E1:F9").unwrap()));
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 3);
    }
}
