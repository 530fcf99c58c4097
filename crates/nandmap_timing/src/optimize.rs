//! Greedy slack-driven area recovery.
//!
//! A second forward pass over the network replaces each cell by the
//! smallest-area library cell whose delay fits the local slack. Required
//! times come from the backward pass and are not recomputed as cells get
//! slower, so the result is a single greedy sweep rather than a re-timed
//! fixed point.

use crate::error::TimingError;
use crate::state::{assigned, TimingState};
use nandmap_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use nandmap_library::{CellKind, Library};
use nandmap_network::{Network, Node, NodeKind};

/// Relative tolerance for the critical-path bound check.
const BOUND_TOLERANCE: f64 = 1e-9;

/// Totals produced by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OptimizeOutcome {
    /// Total area of the cells in place after optimization.
    pub area: f64,
    /// Nodes whose final delay exceeded the critical-path delay.
    pub violations: usize,
}

/// Substitutes smaller cells wherever slack allows.
///
/// For a gate the NAND is tried first against
/// `required - max(adjusted arrivals)`. The adopted NAND delay is then
/// charged to each fanin's inverter budget (`required - raw arrival`), and
/// each inverter is tried independently. A primary output only has its
/// inverter to try. A cell is kept when its budget is not positive or no
/// cell fits.
///
/// Every node's final delay is checked against `critical_path_delay`; a
/// node that exceeds it is reported as a `T001` error diagnostic and the
/// pass carries on.
pub fn optimize_area(
    network: &Network,
    library: &Library,
    state: &mut TimingState,
    critical_path_delay: f64,
    sink: &DiagnosticSink,
) -> Result<OptimizeOutcome, TimingError> {
    let mut outcome = OptimizeOutcome::default();
    let limit = critical_path_delay + BOUND_TOLERANCE * critical_path_delay.abs().max(1.0);

    for node in network.nodes() {
        let delay = match node.kind {
            NodeKind::PrimaryInput => {
                state.node_mut(node.id).delay = 0.0;
                continue;
            }
            NodeKind::PrimaryOutput { fanin } => {
                let arrival = state.node(fanin.node).delay;
                let timing = state.node_mut(node.id);
                timing.arrival[0] = arrival;
                timing.delay = if fanin.inverted {
                    let mut inv = assigned(timing.chosen_inv[0], node)?;
                    let mut inv_delay = library.cell(CellKind::Inverter, inv).delay(1);
                    let mut slack = timing.required_time - arrival;
                    if slack > 0.0 {
                        if let Some(smaller) = library.cheapest_within(CellKind::Inverter, slack, 1) {
                            inv = smaller;
                            inv_delay = library.cell(CellKind::Inverter, inv).delay(1);
                            slack -= inv_delay;
                        }
                    }
                    timing.chosen_inv[0] = Some(inv);
                    timing.inv_slack[0] = slack;
                    outcome.area += library.cell(CellKind::Inverter, inv).area;
                    arrival + inv_delay
                } else {
                    arrival
                };
                timing.delay
            }
            NodeKind::Gate { fanins } => {
                let arrival = [state.node(fanins[0].node).delay, state.node(fanins[1].node).delay];
                let timing = state.node_mut(node.id);
                timing.arrival = arrival;

                let mut inv = timing.chosen_inv;
                let mut input_delay = arrival;
                for k in 0..2 {
                    if fanins[k].inverted {
                        let cell = assigned(inv[k], node)?;
                        input_delay[k] += library.cell(CellKind::Inverter, cell).delay(1);
                    }
                }

                let required = timing.required_time;
                let nand_budget = required - input_delay[0].max(input_delay[1]);
                let mut inv_budget = [required - arrival[0], required - arrival[1]];

                let mut nand = assigned(timing.chosen_nand, node)?;
                let mut nand_delay = library.cell(CellKind::Nand, nand).delay(node.fanout_count);
                if nand_budget > 0.0 {
                    if let Some(smaller) =
                        library.cheapest_within(CellKind::Nand, nand_budget, node.fanout_count)
                    {
                        nand = smaller;
                        nand_delay = library.cell(CellKind::Nand, nand).delay(node.fanout_count);
                    }
                }
                timing.chosen_nand = Some(nand);
                timing.slack = nand_budget - nand_delay;
                outcome.area += library.cell(CellKind::Nand, nand).area;

                for k in 0..2 {
                    if !fanins[k].inverted {
                        continue;
                    }
                    let mut cell = assigned(inv[k], node)?;
                    inv_budget[k] -= nand_delay;
                    if inv_budget[k] > 0.0 {
                        if let Some(smaller) =
                            library.cheapest_within(CellKind::Inverter, inv_budget[k], 1)
                        {
                            cell = smaller;
                            let inv_delay = library.cell(CellKind::Inverter, cell).delay(1);
                            inv_budget[k] -= inv_delay;
                            input_delay[k] = arrival[k] + inv_delay;
                        }
                    }
                    inv[k] = Some(cell);
                    timing.inv_slack[k] = inv_budget[k];
                    outcome.area += library.cell(CellKind::Inverter, cell).area;
                }
                timing.chosen_inv = inv;
                timing.delay = input_delay[0].max(input_delay[1]) + nand_delay;
                tracing::debug!(
                    node = %node.name,
                    nand = %library.cell(CellKind::Nand, nand).name,
                    delay = timing.delay,
                    slack = timing.slack,
                    "gate optimized"
                );
                timing.delay
            }
        };

        if delay > limit {
            outcome.violations += 1;
            report_violation(node, delay, critical_path_delay, sink);
        }
    }

    tracing::info!(
        area = outcome.area,
        violations = outcome.violations,
        "area optimization complete"
    );
    Ok(outcome)
}

fn report_violation(node: &Node, delay: f64, critical_path_delay: f64, sink: &DiagnosticSink) {
    tracing::error!(
        node = %node.name,
        delay,
        critical_path_delay,
        "optimized delay exceeds the critical path"
    );
    sink.emit(
        Diagnostic::error(
            DiagnosticCode::CRITICAL_PATH_VIOLATION,
            format!(
                "node `{}` settles at {delay:.6} after optimization, past the critical path delay {critical_path_delay:.6}",
                node.name
            ),
        )
        .with_note("the slack computation produced a cell choice that lengthens the circuit"),
    );
}
