//! Worksheet auto-filter range

use crate::cell::RangeRect;
use crate::error::Result;

/// The auto-filter applied to a worksheet (`<autoFilter ref="A1:D20"/>`)
///
/// Only the range is modelled here. Which rows the filter hides is stored on
/// the worksheet's row records.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoFilter {
    reference: String,
}

impl AutoFilter {
    /// Create a filter covering `rect`
    pub fn new(rect: RangeRect) -> Self {
        Self {
            reference: rect.to_a1_string(),
        }
    }

    /// Create a filter from raw reference text, without validating it
    pub fn from_reference<S: Into<String>>(reference: S) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// The reference text
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Parse the reference text
    pub fn rect(&self) -> Result<RangeRect> {
        RangeRect::parse(&self.reference)
    }

    /// Move the filter to `rect`
    pub fn set_rect(&mut self, rect: RangeRect) {
        self.reference = rect.to_a1_string();
    }
}
