//! Error types for gridshift-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridshift-core
#[derive(Debug, Error)]
pub enum Error {
    /// A cell or range reference could not be parsed
    #[error("cannot convert {text:?} to coordinates: {reason}")]
    InvalidCellReference {
        /// The offending reference text
        text: String,
        /// What was wrong with it
        reason: String,
    },

    /// Sheet not found by name
    #[error("sheet {0} does not exist")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Sheet id is zero or already taken
    #[error("Invalid sheet id {0}: {1}")]
    InvalidSheetId(u32, String),

    /// A row/column adjustment was requested with an unusable pivot or offset
    #[error("invalid adjustment: {0}")]
    InvalidAdjustment(String),

    /// Merged cell conflict
    #[error("Cell range {0} overlaps an existing merged region")]
    MergedCellConflict(String),

    /// Save target has an extension that is not a workbook format
    #[error("unsupported workbook file format: {0}")]
    UnsupportedFileFormat(String),

    /// Save target path is too long
    #[error("file path length exceeds maximum limit of {0} characters")]
    PathTooLong(usize),

    /// `save` was called on a document that was never opened from or saved to a file
    #[error("no path defined for file, consider save as")]
    NoSavePath,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create an [`Error::InvalidCellReference`] for `text`
    pub fn invalid_reference<T: Into<String>, R: Into<String>>(text: T, reason: R) -> Self {
        Error::InvalidCellReference {
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from an unparsable cell or range reference
    pub fn is_invalid_reference(&self) -> bool {
        matches!(self, Error::InvalidCellReference { .. })
    }
}
