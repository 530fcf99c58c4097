//! Logic network model for NAND/INV technology mapping.
//!
//! A [`Network`] is a flat, topologically ordered table of nodes: every
//! primary input first, then every two-input gate, then every primary
//! output. Fanins are [`NodeId`] indices into the same table, each with an
//! inversion flag saying whether an inverter cell sits on that edge.
//!
//! Networks are built through [`NetworkBuilder`], which enforces the block
//! ordering and fanin invariants. [`aiger`] reads ASCII AIGER files and
//! [`mapping`] converts the AND-inverter graph into NAND+INV form.

#![warn(missing_docs)]

pub mod aiger;
pub mod error;
pub mod ids;
pub mod mapping;
pub mod network;
pub mod node;

pub use aiger::{load_aiger, parse_aiger, Aig};
pub use error::NetworkError;
pub use ids::NodeId;
pub use mapping::map_aig;
pub use network::{Network, NetworkBuilder};
pub use node::{Fanin, Node, NodeKind};

use nandmap_diagnostics::DiagnosticSink;
use std::path::Path;

/// Reads an ASCII AIGER file and maps it into a NAND+INV [`Network`].
pub fn load_network(path: &Path, sink: &DiagnosticSink) -> Result<Network, NetworkError> {
    let aig = load_aiger(path)?;
    map_aig(&aig, &path.display().to_string(), sink)
}
