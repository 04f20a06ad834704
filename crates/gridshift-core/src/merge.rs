//! Merged cell regions

use crate::cell::RangeRect;
use crate::error::Result;

/// A merged-cell region
///
/// The region keeps the reference text as it appears in the worksheet
/// (`<mergeCell ref="A2:B3"/>`) together with the parsed rectangle. Regions
/// created through [`MergeRegion::new`] always have both; regions read from a
/// document through [`MergeRegion::from_reference`] may carry text that does
/// not parse, in which case the rect is absent until the text is fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MergeRegion {
    reference: String,
    rect: Option<RangeRect>,
}

impl MergeRegion {
    /// Create a region covering `rect`
    pub fn new(rect: RangeRect) -> Self {
        Self {
            reference: rect.to_merge_ref(),
            rect: Some(rect),
        }
    }

    /// Create a region from raw reference text
    ///
    /// The rect is cached when the text parses; otherwise it is left empty and
    /// [`MergeRegion::rect`] reports the parse failure.
    pub fn from_reference<S: Into<String>>(reference: S) -> Self {
        let reference = reference.into();
        let rect = RangeRect::parse(&reference).ok();
        Self { reference, rect }
    }

    /// The reference text, e.g. `"A2:B3"`
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The cached rectangle, if the reference parsed
    pub fn cached_rect(&self) -> Option<RangeRect> {
        self.rect
    }

    /// The region's rectangle, parsing the reference text when nothing is cached
    pub fn rect(&self) -> Result<RangeRect> {
        match self.rect {
            Some(rect) => Ok(rect),
            None => RangeRect::parse(&self.reference),
        }
    }

    /// Move the region to `rect`, rewriting the reference text to match
    pub fn set_rect(&mut self, rect: RangeRect) {
        self.reference = rect.to_merge_ref();
        self.rect = Some(rect);
    }
}
