//! The two-list cell library.

use crate::cell::{CellKind, CellSpec};
use crate::ids::CellId;
use crate::select;
use serde::{Deserialize, Serialize};

/// A standard-cell library of inverters and two-input NAND gates.
///
/// Each list is sorted by ascending area at construction and never mutated
/// afterwards, so a [`CellId`] stays valid for the library's lifetime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Library {
    inverters: Vec<CellSpec>,
    nand_gates: Vec<CellSpec>,
}

impl Library {
    /// Builds a library from cells of either kind, sorting each list by area.
    pub fn new(cells: impl IntoIterator<Item = CellSpec>) -> Self {
        let (mut inverters, mut nand_gates): (Vec<_>, Vec<_>) = cells
            .into_iter()
            .partition(|cell| cell.kind == CellKind::Inverter);
        inverters.sort_by(|a, b| a.area.total_cmp(&b.area));
        nand_gates.sort_by(|a, b| a.area.total_cmp(&b.area));
        Self {
            inverters,
            nand_gates,
        }
    }

    /// Returns the area-sorted cells of one kind.
    pub fn cells(&self, kind: CellKind) -> &[CellSpec] {
        match kind {
            CellKind::Inverter => &self.inverters,
            CellKind::Nand => &self.nand_gates,
        }
    }

    /// Returns the area-sorted inverters.
    pub fn inverters(&self) -> &[CellSpec] {
        &self.inverters
    }

    /// Returns the area-sorted NAND gates.
    pub fn nand_gates(&self) -> &[CellSpec] {
        &self.nand_gates
    }

    /// Returns the cell with the given ID from the list of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the ID was not produced by this library for `kind`.
    pub fn cell(&self, kind: CellKind, id: CellId) -> &CellSpec {
        &self.cells(kind)[id.index()]
    }

    /// Returns the minimum-delay cell of `kind` driving `fanout` loads.
    pub fn fastest(&self, kind: CellKind, fanout: usize) -> Option<CellId> {
        select::fastest(self.cells(kind), fanout)
    }

    /// Returns the smallest-area cell of `kind` whose delay fits `budget`.
    pub fn cheapest_within(&self, kind: CellKind, budget: f64, fanout: usize) -> Option<CellId> {
        select::cheapest_within(self.cells(kind), budget, fanout)
    }

    /// Returns the total number of cells across both kinds.
    pub fn len(&self) -> usize {
        self.inverters.len() + self.nand_gates.len()
    }

    /// Returns `true` if the library has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
