//! Label splicing.
//!
//! Reference labels are inserted between grid cells rather than written over
//! them, so rows grow instead of losing content. Labels on a row are inserted
//! right to left so each insertion leaves smaller columns untouched.

use std::collections::BTreeMap;

use crate::grid::{Grid, GridPoint};
use crate::snapshot::RefId;

/// A label waiting to be inserted on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLabel {
    pub col: i64,
    pub ref_id: RefId,
}

/// A growable row of characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBuffer {
    cells: Vec<char>,
}

impl RowBuffer {
    pub fn new(cells: Vec<char>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Insert `label` at `col`, clamped to the row. A column inside an
    /// existing `[...]` span moves to just before its `[`.
    ///
    /// Returns the position the label was inserted at.
    pub fn insert_label(&mut self, col: i64, label: &str) -> usize {
        let mut at = col.clamp(0, self.cells.len() as i64) as usize;
        if let Some(open) = self.enclosing_bracket(at) {
            at = open;
        }
        self.cells.splice(at..at, label.chars());
        at
    }

    /// Start of the `[...]` span that `at` falls inside, if any.
    fn enclosing_bracket(&self, at: usize) -> Option<usize> {
        let search_end = at.min(self.cells.len().saturating_sub(1));
        if self.cells.is_empty() {
            return None;
        }
        let open = self.cells[..=search_end].iter().rposition(|&c| c == '[')?;
        let close = self.cells[open..].iter().position(|&c| c == ']')? + open;
        (close >= at).then_some(open)
    }

    /// Insert every label, right to left. Equal columns keep ascending id
    /// order in the output.
    pub fn splice(&mut self, labels: &mut [PendingLabel]) {
        labels.sort_by(|a, b| b.col.cmp(&a.col).then(b.ref_id.cmp(&a.ref_id)));
        for label in labels.iter() {
            self.insert_label(label.col, &label.ref_id.label());
        }
    }
}

impl From<&str> for RowBuffer {
    fn from(row: &str) -> Self {
        Self::new(row.chars().collect())
    }
}

impl std::fmt::Display for RowBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.cells.iter().try_for_each(|c| std::fmt::Write::write_char(f, *c))
    }
}

/// Splice a label for every anchor into the grid rows.
///
/// Anchors above or below the grid are pulled onto its first or last row,
/// so every tagged node keeps a visible label.
pub fn splice_labels(grid: Grid, anchors: &BTreeMap<RefId, GridPoint>) -> Vec<RowBuffer> {
    let mut by_row: BTreeMap<usize, Vec<PendingLabel>> = BTreeMap::new();
    if let Some(last_row) = grid.rows().checked_sub(1) {
        for (ref_id, point) in anchors {
            let row = point.row.clamp(0, last_row as i64) as usize;
            by_row.entry(row).or_default().push(PendingLabel {
                col: point.col,
                ref_id: *ref_id,
            });
        }
    }

    let mut rows: Vec<RowBuffer> = grid.into_rows().into_iter().map(RowBuffer::new).collect();
    for (row, mut labels) in by_row {
        if let Some(buffer) = rows.get_mut(row) {
            buffer.splice(&mut labels);
        }
    }
    rows
}

#[cfg(test)]
#[path = "splice_tests.rs"]
mod tests;
