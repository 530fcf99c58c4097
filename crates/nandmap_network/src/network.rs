//! The topologically ordered node table and its builder.

use crate::error::NetworkError;
use crate::ids::NodeId;
use crate::node::{Fanin, Node, NodeKind};
use serde::{Deserialize, Serialize};

/// A combinational NAND/INV network in topological order.
///
/// Nodes are stored in three consecutive blocks: primary inputs, gates,
/// primary outputs. Every fanin points to an earlier node, so a forward scan
/// over [`nodes`](Self::nodes) sees every driver before its readers and a
/// reverse scan sees every reader before its driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Network {
    nodes: Vec<Node>,
    input_count: usize,
    gate_count: usize,
}

impl Network {
    /// Returns the node with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to this network.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns every node in topological order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the primary-input block.
    pub fn inputs(&self) -> &[Node] {
        &self.nodes[..self.input_count]
    }

    /// Returns the gate block.
    pub fn gates(&self) -> &[Node] {
        &self.nodes[self.input_count..self.input_count + self.gate_count]
    }

    /// Returns the primary-output block.
    pub fn outputs(&self) -> &[Node] {
        &self.nodes[self.input_count + self.gate_count..]
    }

    /// Returns the total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Which block the builder is currently filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Block {
    Inputs,
    Gates,
    Outputs,
}

impl Block {
    fn label(self) -> &'static str {
        match self {
            Block::Inputs => "primary input",
            Block::Gates => "gate",
            Block::Outputs => "primary output",
        }
    }
}

/// Incrementally builds a [`Network`] while checking its invariants.
///
/// Inputs must all be added before any gate and gates before any output.
/// Fanins must name nodes that already exist and are not outputs. Fanout
/// counts are derived when [`build`](Self::build) is called.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    input_count: usize,
    gate_count: usize,
}

impl NetworkBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primary input.
    pub fn add_input(&mut self, name: impl Into<String>) -> Result<NodeId, NetworkError> {
        let name = name.into();
        self.enter(Block::Inputs, &name)?;
        self.input_count += 1;
        Ok(self.push(name, NodeKind::PrimaryInput))
    }

    /// Appends a NAND gate reading `fanin0` and `fanin1`.
    pub fn add_gate(
        &mut self,
        name: impl Into<String>,
        fanin0: Fanin,
        fanin1: Fanin,
    ) -> Result<NodeId, NetworkError> {
        let name = name.into();
        self.enter(Block::Gates, &name)?;
        self.check_fanin(&name, fanin0)?;
        self.check_fanin(&name, fanin1)?;
        self.gate_count += 1;
        Ok(self.push(
            name,
            NodeKind::Gate {
                fanins: [fanin0, fanin1],
            },
        ))
    }

    /// Appends a primary output driven by `fanin`.
    pub fn add_output(
        &mut self,
        name: impl Into<String>,
        fanin: Fanin,
    ) -> Result<NodeId, NetworkError> {
        let name = name.into();
        self.enter(Block::Outputs, &name)?;
        self.check_fanin(&name, fanin)?;
        Ok(self.push(name, NodeKind::PrimaryOutput { fanin }))
    }

    /// Finishes the network, filling in every node's fanout count.
    pub fn build(mut self) -> Network {
        let mut fanout = vec![0usize; self.nodes.len()];
        for node in &self.nodes {
            for fanin in node.fanins() {
                fanout[fanin.node.index()] += 1;
            }
        }
        for (node, count) in self.nodes.iter_mut().zip(fanout) {
            node.fanout_count = count;
        }
        Network {
            nodes: self.nodes,
            input_count: self.input_count,
            gate_count: self.gate_count,
        }
    }

    fn current_block(&self) -> Block {
        if self.nodes.len() > self.input_count + self.gate_count {
            Block::Outputs
        } else if self.gate_count > 0 {
            Block::Gates
        } else {
            Block::Inputs
        }
    }

    fn enter(&self, block: Block, name: &str) -> Result<(), NetworkError> {
        let current = self.current_block();
        if block < current {
            return Err(NetworkError::OutOfOrder {
                name: name.to_string(),
                kind: block.label(),
                later: current.label(),
            });
        }
        Ok(())
    }

    fn check_fanin(&self, name: &str, fanin: Fanin) -> Result<(), NetworkError> {
        let driver = self
            .nodes
            .get(fanin.node.index())
            .ok_or_else(|| NetworkError::UnknownFanin {
                name: name.to_string(),
                fanin: fanin.node.as_raw(),
            })?;
        if driver.is_output() {
            return Err(NetworkError::FaninIsOutput {
                name: name.to_string(),
                output: driver.name.clone(),
            });
        }
        Ok(())
    }

    fn push(&mut self, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name,
            kind,
            fanout_count: 0,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `a`, `b` -> g1 = NAND(a, b) -> out = INV(g1)
    fn two_gate() -> Network {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        let bb = b.add_input("b").unwrap();
        let g1 = b.add_gate("g1", Fanin::direct(a), Fanin::direct(bb)).unwrap();
        b.add_output("out", Fanin::inverted(g1)).unwrap();
        b.build()
    }

    #[test]
    fn empty_network() {
        let net = NetworkBuilder::new().build();
        assert!(net.is_empty());
        assert!(net.inputs().is_empty());
        assert!(net.gates().is_empty());
        assert!(net.outputs().is_empty());
    }

    #[test]
    fn blocks_and_fanout() {
        let net = two_gate();
        assert_eq!(net.len(), 4);
        assert_eq!(net.inputs().len(), 2);
        assert_eq!(net.gates().len(), 1);
        assert_eq!(net.outputs().len(), 1);
        assert_eq!(net.gates()[0].name, "g1");
        assert_eq!(net.node(NodeId::from_raw(0)).fanout_count, 1);
        assert_eq!(net.gates()[0].fanout_count, 1);
        assert_eq!(net.outputs()[0].fanout_count, 0);
    }

    #[test]
    fn fanout_counts_gates_and_outputs() {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        let g1 = b.add_gate("g1", Fanin::direct(a), Fanin::direct(a)).unwrap();
        let g2 = b.add_gate("g2", Fanin::inverted(g1), Fanin::direct(a)).unwrap();
        b.add_output("o1", Fanin::direct(g1)).unwrap();
        b.add_output("o2", Fanin::direct(g2)).unwrap();
        let net = b.build();
        assert_eq!(net.node(a).fanout_count, 3);
        assert_eq!(net.node(g1).fanout_count, 2);
        assert_eq!(net.node(g2).fanout_count, 1);
    }

    #[test]
    fn input_after_gate_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        b.add_gate("g", Fanin::direct(a), Fanin::direct(a)).unwrap();
        let err = b.add_input("late").unwrap_err();
        assert!(matches!(err, NetworkError::OutOfOrder { kind: "primary input", later: "gate", .. }));
    }

    #[test]
    fn gate_after_output_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        b.add_output("o", Fanin::direct(a)).unwrap();
        let err = b.add_gate("g", Fanin::direct(a), Fanin::direct(a)).unwrap_err();
        assert!(matches!(err, NetworkError::OutOfOrder { kind: "gate", .. }));
    }

    #[test]
    fn forward_reference_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        let err = b
            .add_gate("g", Fanin::direct(a), Fanin::direct(NodeId::from_raw(5)))
            .unwrap_err();
        assert!(matches!(err, NetworkError::UnknownFanin { fanin: 5, .. }));
    }

    #[test]
    fn reading_output_rejected() {
        let mut b = NetworkBuilder::new();
        let a = b.add_input("a").unwrap();
        let o = b.add_output("o", Fanin::direct(a)).unwrap();
        let err = b.add_output("o2", Fanin::direct(o)).unwrap_err();
        assert!(matches!(err, NetworkError::FaninIsOutput { .. }));
    }

    #[test]
    fn serde_roundtrip() {
        let net = two_gate();
        let json = serde_json::to_string(&net).unwrap();
        let restored: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.nodes(), net.nodes());
        assert_eq!(restored.gates().len(), 1);
    }
}
