//! Calculation chain

use std::collections::HashSet;

use gridshift_core::{CalcChain, CellRef, Result};

use super::axis::{adjust, AdjustDirection};

enum Plan {
    Keep,
    Move(String),
    Drop,
}

/// Rewrite the chain entries that belong to sheet `sheet_id`
///
/// Entries whose cell was deleted or pushed off the sheet are removed, as
/// are entries that end up duplicating an earlier one. Entries of other
/// sheets are left alone. Returns the number of entries removed.
pub(crate) fn adjust_calc_chain(
    chain: Option<&mut CalcChain>,
    sheet_id: u32,
    direction: AdjustDirection,
    pivot: u32,
    offset: i32,
) -> Result<usize> {
    let Some(chain) = chain else {
        return Ok(0);
    };

    let resolved = chain.resolved_sheet_ids();
    let limit = direction.limit();
    let mut seen = HashSet::new();
    let mut plans = Vec::with_capacity(chain.len());

    for (entry, &id) in chain.entries().iter().zip(&resolved) {
        if id != sheet_id {
            plans.push(Plan::Keep);
            continue;
        }

        let cell = CellRef::parse(&entry.cell_ref)?;
        let pos = direction.coord(&cell);
        let plan = match adjust(pos, pos, pivot, offset).fit(limit) {
            Some((pos, _)) => {
                let moved = direction.with_coord(&cell, pos).to_a1_string();
                if !seen.insert(moved.clone()) {
                    Plan::Drop
                } else if moved == entry.cell_ref {
                    Plan::Keep
                } else {
                    Plan::Move(moved)
                }
            }
            None => Plan::Drop,
        };
        plans.push(plan);
    }

    let before = chain.len();
    let mut plans = plans.into_iter();
    chain.retain_resolved(|entry, _| match plans.next() {
        Some(Plan::Keep) => true,
        Some(Plan::Move(cell_ref)) => {
            entry.cell_ref = cell_ref;
            true
        }
        Some(Plan::Drop) | None => false,
    });

    Ok(before - chain.len())
}
