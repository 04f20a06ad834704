//! Row types

/// Row metadata
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Custom height (None = default)
    pub height: Option<f64>,
    /// Row is hidden, typically by an auto-filter
    pub hidden: bool,
}

impl Row {
    /// Create a row with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.hidden
    }
}
