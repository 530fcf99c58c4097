//! Forward delay propagation under the fastest available cells.

use crate::error::TimingError;
use crate::state::TimingState;
use nandmap_library::{CellId, CellKind, Library};
use nandmap_network::{Network, Node, NodeKind};

/// Totals accumulated by the forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Baseline {
    /// Maximum delay over all primary outputs.
    pub critical_path_delay: f64,
    /// Total area of every chosen cell.
    pub area: f64,
    /// Number of inverters placed.
    pub inverters_used: usize,
    /// Number of NAND gates placed.
    pub nand_gates_used: usize,
}

impl Baseline {
    fn place(&mut self, library: &Library, kind: CellKind, id: CellId) {
        self.area += library.cell(kind, id).area;
        match kind {
            CellKind::Inverter => self.inverters_used += 1,
            CellKind::Nand => self.nand_gates_used += 1,
        }
    }
}

/// Assigns the fastest cells to every node and computes node delays.
///
/// Nodes are visited in table order, so each fanin's delay is final before
/// it is read. Primary inputs have delay 0. An inverted edge costs the
/// fastest inverter; a gate costs the fastest NAND at its fanout count.
///
/// Fails with [`TimingError::LibraryExhausted`] as soon as a node needs a
/// cell kind the library lacks.
pub fn propagate_forward(
    network: &Network,
    library: &Library,
    state: &mut TimingState,
) -> Result<Baseline, TimingError> {
    let mut baseline = Baseline::default();

    for node in network.nodes() {
        match node.kind {
            NodeKind::PrimaryInput => state.node_mut(node.id).delay = 0.0,
            NodeKind::PrimaryOutput { fanin } => {
                let arrival = state.node(fanin.node).delay;
                let mut chosen = None;
                let mut delay = arrival;
                if fanin.inverted {
                    let inv = fastest(library, CellKind::Inverter, 1, node)?;
                    delay += library.cell(CellKind::Inverter, inv).delay(1);
                    baseline.place(library, CellKind::Inverter, inv);
                    chosen = Some(inv);
                }
                let timing = state.node_mut(node.id);
                timing.arrival[0] = arrival;
                timing.chosen_inv[0] = chosen;
                timing.delay = delay;
                baseline.critical_path_delay = baseline.critical_path_delay.max(delay);
            }
            NodeKind::Gate { fanins } => {
                let arrival = [state.node(fanins[0].node).delay, state.node(fanins[1].node).delay];
                let mut input_delay = arrival;
                let mut chosen_inv = [None; 2];
                for (k, fanin) in fanins.iter().enumerate() {
                    if fanin.inverted {
                        let inv = fastest(library, CellKind::Inverter, 1, node)?;
                        input_delay[k] += library.cell(CellKind::Inverter, inv).delay(1);
                        baseline.place(library, CellKind::Inverter, inv);
                        chosen_inv[k] = Some(inv);
                    }
                }
                let nand = fastest(library, CellKind::Nand, node.fanout_count, node)?;
                let nand_delay = library.cell(CellKind::Nand, nand).delay(node.fanout_count);
                baseline.place(library, CellKind::Nand, nand);

                let timing = state.node_mut(node.id);
                timing.arrival = arrival;
                timing.chosen_inv = chosen_inv;
                timing.chosen_nand = Some(nand);
                timing.delay = input_delay[0].max(input_delay[1]) + nand_delay;
            }
        }
    }

    tracing::info!(
        critical_path_delay = baseline.critical_path_delay,
        area = baseline.area,
        inverters = baseline.inverters_used,
        nand_gates = baseline.nand_gates_used,
        "forward propagation complete"
    );
    Ok(baseline)
}

fn fastest(
    library: &Library,
    kind: CellKind,
    fanout: usize,
    node: &Node,
) -> Result<CellId, TimingError> {
    library
        .fastest(kind, fanout)
        .ok_or_else(|| TimingError::LibraryExhausted {
            kind,
            node: node.name.clone(),
        })
}
