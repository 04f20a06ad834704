//! Prelude module - common imports for gridshift users
//!
//! ```rust
//! use gridshift::prelude::*;
//! ```

pub use crate::{
    // Adjustment types
    AdjustDirection,
    AutoFilter,
    CalcChain,
    CalcChainEntry,
    CellRef,
    // Main types
    Document,
    // Error types
    Error,
    MergeRegion,

    // I/O types
    Package,
    PartStore,
    RangeRect,
    Result,

    TableOptions,
    TableOutcome,
    Workbook,
    Worksheet,
};
