//! Cell selection rules of the library model.

use nandmap_library::{cheapest_within, fastest, CellKind, CellSpec, Library};

/// Inverters from `(area, delay)` pairs; the delay is all fixed.
fn cells(specs: &[(f64, f64)]) -> Vec<CellSpec> {
    specs
        .iter()
        .enumerate()
        .map(|(i, &(area, delay))| {
            CellSpec::new(format!("C{i}"), CellKind::Inverter, delay, 0.0, area)
        })
        .collect()
}

#[test]
fn first_fit_picks_smallest_area_that_fits() {
    let lib = Library::new(cells(&[(5.0, 1.0), (1.0, 5.0), (2.0, 3.0)]));
    let inverters = lib.inverters();
    let chosen = cheapest_within(inverters, 4.0, 1).unwrap();
    assert_eq!(inverters[chosen.index()].area, 2.0);
    assert_eq!(inverters[chosen.index()].delay(1), 3.0);
}

#[test]
fn first_fit_on_exact_budget() {
    let list = cells(&[(1.0, 5.0), (2.0, 3.0), (5.0, 1.0)]);
    assert_eq!(cheapest_within(&list, 5.0, 1).map(|c| c.index()), Some(0));
    assert_eq!(cheapest_within(&list, 0.5, 1), None);
}

#[test]
fn fastest_prefers_first_on_ties() {
    let list = cells(&[(1.0, 2.0), (2.0, 1.0), (3.0, 1.0)]);
    assert_eq!(fastest(&list, 1).map(|c| c.index()), Some(1));
    assert_eq!(fastest(&[], 1), None);
}

#[test]
fn nand_delay_scales_with_fanout() {
    let lib = Library::new(vec![
        CellSpec::new("NAND_LOW_FIXED", CellKind::Nand, 0.5, 1.5, 1.0),
        CellSpec::new("NAND_LOW_LOAD", CellKind::Nand, 2.0, 0.5, 2.0),
    ]);
    let at_one = lib.fastest(CellKind::Nand, 1).unwrap();
    let at_four = lib.fastest(CellKind::Nand, 4).unwrap();
    assert_eq!(lib.cell(CellKind::Nand, at_one).name, "NAND_LOW_FIXED");
    assert_eq!(lib.cell(CellKind::Nand, at_four).name, "NAND_LOW_LOAD");
    assert!(lib.cheapest_within(CellKind::Nand, 3.0, 4).is_none());
}
