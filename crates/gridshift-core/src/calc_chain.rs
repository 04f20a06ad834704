//! Calculation chain records
//!
//! The calc chain (`xl/calcChain.xml`) lists every formula cell of the
//! workbook in the order the application last calculated them. Each entry
//! names a cell and, optionally, the id of the sheet it lives on; an entry
//! without a sheet id belongs to the same sheet as the entry before it.

/// One `<c>` element of the calc chain
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalcChainEntry {
    /// Cell reference (`r`), e.g. `"B2"`
    pub cell_ref: String,
    /// Sheet id (`i`); `None` inherits the previous entry's sheet
    pub sheet_id: Option<u32>,
    /// Cell holds an array formula (`a`)
    pub array: bool,
    /// Entry starts a new dependency level (`l`)
    pub new_level: bool,
}

impl CalcChainEntry {
    /// Create an entry for `cell_ref` on sheet `sheet_id`
    pub fn new<S: Into<String>>(cell_ref: S, sheet_id: u32) -> Self {
        Self {
            cell_ref: cell_ref.into(),
            sheet_id: Some(sheet_id),
            array: false,
            new_level: false,
        }
    }

    /// Create an entry that inherits the sheet of the entry before it
    pub fn inherited<S: Into<String>>(cell_ref: S) -> Self {
        Self {
            cell_ref: cell_ref.into(),
            sheet_id: None,
            array: false,
            new_level: false,
        }
    }
}

/// The workbook's calculation chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalcChain {
    entries: Vec<CalcChainEntry>,
}

impl CalcChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from existing entries
    pub fn from_entries(entries: Vec<CalcChainEntry>) -> Self {
        Self { entries }
    }

    /// Append an entry
    pub fn push(&mut self, entry: CalcChainEntry) {
        self.entries.push(entry);
    }

    /// All entries, in chain order
    pub fn entries(&self) -> &[CalcChainEntry] {
        &self.entries
    }

    /// Mutable access to the entries
    pub fn entries_mut(&mut self) -> &mut Vec<CalcChainEntry> {
        &mut self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the chain has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sheet id every entry belongs to, resolving omitted ids
    ///
    /// Leading entries without an id resolve to 0, which matches no sheet.
    pub fn resolved_sheet_ids(&self) -> Vec<u32> {
        let mut prev = 0;
        self.entries
            .iter()
            .map(|entry| {
                prev = entry.sheet_id.unwrap_or(prev);
                prev
            })
            .collect()
    }

    /// Keep only the entries for which `keep` returns `true`
    ///
    /// `keep` sees every entry in order, together with its resolved sheet id,
    /// and may modify the entry. A survivor that inherited its sheet id from
    /// a dropped entry is given the id explicitly, so every survivor still
    /// resolves to the sheet it resolved to before.
    pub fn retain_resolved<F>(&mut self, mut keep: F)
    where
        F: FnMut(&mut CalcChainEntry, u32) -> bool,
    {
        let resolved = self.resolved_sheet_ids();
        let entries = std::mem::take(&mut self.entries);
        let mut prev_kept = 0;

        for (mut entry, id) in entries.into_iter().zip(resolved) {
            if !keep(&mut entry, id) {
                continue;
            }
            if entry.sheet_id.is_none() && id != prev_kept {
                entry.sheet_id = Some(id);
            }
            prev_kept = id;
            self.entries.push(entry);
        }
    }

    /// Remove the entry for one formula cell
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_cell(&mut self, sheet_id: u32, cell_ref: &str) -> bool {
        let mut removed = false;
        self.retain_resolved(|entry, id| {
            if !removed && id == sheet_id && entry.cell_ref == cell_ref {
                removed = true;
                return false;
            }
            true
        });
        removed
    }
}
