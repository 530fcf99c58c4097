//! Cell selection queries over a single cell list.
//!
//! Both functions return a [`CellId`] indexing into the slice they were given.

use crate::cell::CellSpec;
use crate::ids::CellId;

/// Returns the cell with the smallest total delay at `fanout`.
///
/// Ties go to the earliest cell in `cells`. Returns `None` when `cells` is
/// empty; callers must treat that as a missing cell kind, never as zero delay.
pub fn fastest(cells: &[CellSpec], fanout: usize) -> Option<CellId> {
    let mut best: Option<(usize, f64)> = None;
    for (index, cell) in cells.iter().enumerate() {
        let delay = cell.delay(fanout);
        if best.map_or(true, |(_, best_delay)| delay < best_delay) {
            best = Some((index, delay));
        }
    }
    best.map(|(index, _)| CellId::from_raw(index as u32))
}

/// Returns the first cell, in slice order, whose delay at `fanout` fits `budget`.
///
/// `cells` is expected to be sorted by ascending area, which makes this the
/// smallest-area cell that fits. The search is first-fit: a later, larger
/// cell is never considered once an earlier one qualifies.
pub fn cheapest_within(cells: &[CellSpec], budget: f64, fanout: usize) -> Option<CellId> {
    cells
        .iter()
        .position(|cell| cell.delay(fanout) <= budget)
        .map(|index| CellId::from_raw(index as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellKind;

    fn nand(name: &str, fixed: f64, load: f64, area: f64) -> CellSpec {
        CellSpec::new(name, CellKind::Nand, fixed, load, area)
    }

    #[test]
    fn fastest_empty_is_none() {
        assert_eq!(fastest(&[], 1), None);
    }

    #[test]
    fn fastest_picks_min_delay() {
        let cells = [nand("A", 5.0, 0.0, 1.0), nand("B", 1.0, 0.0, 5.0), nand("C", 3.0, 0.0, 2.0)];
        assert_eq!(fastest(&cells, 1), Some(CellId::from_raw(1)));
    }

    #[test]
    fn fastest_tie_goes_to_first() {
        let cells = [nand("A", 2.0, 0.0, 1.0), nand("B", 2.0, 0.0, 3.0)];
        assert_eq!(fastest(&cells, 1), Some(CellId::from_raw(0)));
    }

    #[test]
    fn fastest_depends_on_fanout() {
        // A: 1 + 2f, B: 3 + 0.5f. A wins at f=1, B wins at f=4.
        let cells = [nand("A", 1.0, 2.0, 1.0), nand("B", 3.0, 0.5, 1.0)];
        assert_eq!(fastest(&cells, 1), Some(CellId::from_raw(0)));
        assert_eq!(fastest(&cells, 4), Some(CellId::from_raw(1)));
    }

    #[test]
    fn cheapest_is_first_fit() {
        let cells = [nand("A", 5.0, 0.0, 1.0), nand("B", 3.0, 0.0, 2.0), nand("C", 1.0, 0.0, 5.0)];
        assert_eq!(cheapest_within(&cells, 4.0, 1), Some(CellId::from_raw(1)));
        assert_eq!(cheapest_within(&cells, 5.0, 1), Some(CellId::from_raw(0)));
        assert_eq!(cheapest_within(&cells, 1.0, 1), Some(CellId::from_raw(2)));
    }

    #[test]
    fn cheapest_none_when_nothing_fits() {
        let cells = [nand("A", 5.0, 0.0, 1.0)];
        assert_eq!(cheapest_within(&cells, 4.9, 1), None);
        assert_eq!(cheapest_within(&[], 100.0, 1), None);
    }

    #[test]
    fn cheapest_budget_is_inclusive() {
        let cells = [nand("A", 2.0, 1.0, 1.0)];
        assert_eq!(cheapest_within(&cells, 3.0, 1), Some(CellId::from_raw(0)));
    }
}
