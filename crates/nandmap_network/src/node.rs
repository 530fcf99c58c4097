//! Nodes of the logic network.

use crate::ids::NodeId;
use serde::{Deserialize, Serialize};

/// One input edge of a gate or primary output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fanin {
    /// The driving node.
    pub node: NodeId,
    /// Whether an inverter cell sits on this edge.
    pub inverted: bool,
}

impl Fanin {
    /// A non-inverted edge from `node`.
    pub fn direct(node: NodeId) -> Self {
        Self {
            node,
            inverted: false,
        }
    }

    /// An inverted edge from `node`.
    pub fn inverted(node: NodeId) -> Self {
        Self {
            node,
            inverted: true,
        }
    }
}

/// The role of a node, with the fanins that role requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// A primary input. Always ready at time zero.
    PrimaryInput,
    /// A two-input NAND gate.
    Gate {
        /// Fanin 0 and fanin 1, in that order.
        fanins: [Fanin; 2],
    },
    /// A primary output with a single driver.
    PrimaryOutput {
        /// The driving edge.
        fanin: Fanin,
    },
}

/// A node in the network's topologically ordered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Position of this node in the table.
    pub id: NodeId,
    /// Port name for inputs and outputs; a generated name for gates.
    pub name: String,
    /// Role and fanins.
    pub kind: NodeKind,
    /// Number of gate and primary-output edges reading this node.
    pub fanout_count: usize,
}

impl Node {
    /// Returns `true` for primary inputs.
    pub fn is_input(&self) -> bool {
        matches!(self.kind, NodeKind::PrimaryInput)
    }

    /// Returns `true` for gates.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, NodeKind::Gate { .. })
    }

    /// Returns `true` for primary outputs.
    pub fn is_output(&self) -> bool {
        matches!(self.kind, NodeKind::PrimaryOutput { .. })
    }

    /// Returns the fanins in order: none, one, or two.
    pub fn fanins(&self) -> &[Fanin] {
        match &self.kind {
            NodeKind::PrimaryInput => &[],
            NodeKind::Gate { fanins } => fanins,
            NodeKind::PrimaryOutput { fanin } => std::slice::from_ref(fanin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(kind: NodeKind) -> Node {
        Node {
            id: NodeId::from_raw(5),
            name: "n".into(),
            kind,
            fanout_count: 0,
        }
    }

    #[test]
    fn fanin_slices() {
        let a = NodeId::from_raw(0);
        let b = NodeId::from_raw(1);
        assert!(node(NodeKind::PrimaryInput).fanins().is_empty());
        let gate = node(NodeKind::Gate {
            fanins: [Fanin::direct(a), Fanin::inverted(b)],
        });
        assert_eq!(gate.fanins().len(), 2);
        assert!(gate.fanins()[1].inverted);
        let po = node(NodeKind::PrimaryOutput {
            fanin: Fanin::inverted(a),
        });
        assert_eq!(po.fanins(), &[Fanin::inverted(a)]);
    }

    #[test]
    fn kind_predicates() {
        let pi = node(NodeKind::PrimaryInput);
        assert!(pi.is_input() && !pi.is_gate() && !pi.is_output());
        let po = node(NodeKind::PrimaryOutput {
            fanin: Fanin::direct(NodeId::from_raw(0)),
        });
        assert!(po.is_output());
    }
}
