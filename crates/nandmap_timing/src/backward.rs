//! Backward required-time propagation.

use crate::error::TimingError;
use crate::state::{assigned, TimingState};
use nandmap_library::{CellKind, Library};
use nandmap_network::{Fanin, Network, Node, NodeKind};

/// Tightens required times from the primary outputs back to the inputs.
///
/// Nodes are visited in reverse table order, so every reader of a node has
/// been processed before the node itself. Each output is bounded by
/// `critical_path_delay`; each edge subtracts the delay of the cells chosen
/// by forward propagation. Required times only ever decrease, and primary
/// inputs keep their initial 0.
pub fn propagate_backward(
    network: &Network,
    library: &Library,
    state: &mut TimingState,
    critical_path_delay: f64,
) -> Result<(), TimingError> {
    for node in network.nodes().iter().rev() {
        match node.kind {
            NodeKind::PrimaryInput => {}
            NodeKind::PrimaryOutput { fanin } => {
                let timing = state.node_mut(node.id);
                timing.required_time = timing.required_time.min(critical_path_delay);
                let required = timing.required_time;
                let inv_delay = inverter_delay(library, state, node, fanin, 0)?;
                tighten(network, state, fanin, required - inv_delay);
            }
            NodeKind::Gate { fanins } => {
                let timing = state.node(node.id);
                let nand = assigned(timing.chosen_nand, node)?;
                let nand_delay = library.cell(CellKind::Nand, nand).delay(node.fanout_count);
                let required = timing.required_time;
                for (k, &fanin) in fanins.iter().enumerate() {
                    let inv_delay = inverter_delay(library, state, node, fanin, k)?;
                    tighten(network, state, fanin, required - nand_delay - inv_delay);
                }
            }
        }
    }
    tracing::info!(critical_path_delay, "backward propagation complete");
    Ok(())
}

/// Records the margin each fastest-cell choice leaves against its node's
/// required time.
///
/// A NAND's slack is `required - delay`; an inverter's slack is what is
/// left on its edge once the NAND delay is also charged. Run after
/// [`propagate_backward`]; the optimizer overwrites these values with the
/// margins that remain after substitution.
pub fn annotate_slack(
    network: &Network,
    library: &Library,
    state: &mut TimingState,
) -> Result<(), TimingError> {
    for node in network.nodes() {
        match node.kind {
            NodeKind::PrimaryInput => {}
            NodeKind::PrimaryOutput { fanin } => {
                let timing = state.node_mut(node.id);
                if fanin.inverted {
                    timing.inv_slack[0] = timing.required_time - timing.delay;
                }
            }
            NodeKind::Gate { fanins } => {
                let nand = assigned(state.node(node.id).chosen_nand, node)?;
                let nand_delay = library.cell(CellKind::Nand, nand).delay(node.fanout_count);
                let mut inv_slack = [0.0; 2];
                for (k, &fanin) in fanins.iter().enumerate() {
                    if fanin.inverted {
                        let inv_delay = inverter_delay(library, state, node, fanin, k)?;
                        let timing = state.node(node.id);
                        inv_slack[k] =
                            timing.required_time - nand_delay - timing.arrival[k] - inv_delay;
                    }
                }
                let timing = state.node_mut(node.id);
                timing.slack = timing.required_time - timing.delay;
                timing.inv_slack = inv_slack;
            }
        }
    }
    Ok(())
}

/// Delay of the inverter on fanin `k` of `node`, or 0 for a direct edge.
fn inverter_delay(
    library: &Library,
    state: &TimingState,
    node: &Node,
    fanin: Fanin,
    k: usize,
) -> Result<f64, TimingError> {
    if !fanin.inverted {
        return Ok(0.0);
    }
    let inv = assigned(state.node(node.id).chosen_inv[k], node)?;
    Ok(library.cell(CellKind::Inverter, inv).delay(1))
}

fn tighten(network: &Network, state: &mut TimingState, fanin: Fanin, bound: f64) {
    if network.node(fanin.node).is_input() {
        return;
    }
    let driver = state.node_mut(fanin.node);
    driver.required_time = driver.required_time.min(bound);
}
