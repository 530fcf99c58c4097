//! Per-node timing state, stored parallel to the network's node table.

use crate::error::TimingError;
use nandmap_library::CellId;
use nandmap_network::{Network, Node, NodeId};

/// Timing annotations and cell choices for one node.
///
/// Index `k` of the two-element arrays refers to fanin `k`. Primary
/// outputs only use index 0; primary inputs use none of them.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTiming {
    /// Output delay of each fanin's driver, as seen by this node.
    pub arrival: [f64; 2],
    /// Time at which this node's output is stable.
    pub delay: f64,
    /// Latest time the output may settle without lengthening the critical path.
    pub required_time: f64,
    /// Margin left on the NAND cell.
    pub slack: f64,
    /// Margin left on the inverter of each fanin.
    pub inv_slack: [f64; 2],
    /// Inverter placed on each inverted fanin.
    pub chosen_inv: [Option<CellId>; 2],
    /// NAND cell implementing a gate.
    pub chosen_nand: Option<CellId>,
}

impl NodeTiming {
    fn unmapped(required_time: f64) -> Self {
        Self {
            arrival: [0.0; 2],
            delay: 0.0,
            required_time,
            slack: 0.0,
            inv_slack: [0.0; 2],
            chosen_inv: [None; 2],
            chosen_nand: None,
        }
    }
}

/// Timing state for every node of a network, indexed by [`NodeId`].
#[derive(Debug, Clone, PartialEq)]
pub struct TimingState {
    nodes: Vec<NodeTiming>,
}

impl TimingState {
    /// Creates the initial state: required time 0 for primary inputs and
    /// positive infinity for gates and outputs, no cells chosen.
    pub fn new(network: &Network) -> Self {
        let nodes = network
            .nodes()
            .iter()
            .map(|node| {
                let required = if node.is_input() { 0.0 } else { f64::INFINITY };
                NodeTiming::unmapped(required)
            })
            .collect();
        Self { nodes }
    }

    /// Returns the timing of one node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is outside the network this state was created for.
    pub fn node(&self, id: NodeId) -> &NodeTiming {
        &self.nodes[id.index()]
    }

    /// Returns the timing of one node for update.
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeTiming {
        &mut self.nodes[id.index()]
    }

    /// Returns every node's timing in node order.
    pub fn nodes(&self) -> &[NodeTiming] {
        &self.nodes
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for a state with no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Returns the cell recorded for `node`, or [`TimingError::Unmapped`].
pub(crate) fn assigned(cell: Option<CellId>, node: &Node) -> Result<CellId, TimingError> {
    cell.ok_or_else(|| TimingError::Unmapped {
        node: node.name.clone(),
    })
}
