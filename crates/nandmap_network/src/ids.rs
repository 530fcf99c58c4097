//! Opaque ID newtype for network nodes.
//!
//! [`NodeId`] is a thin `u32` wrapper used as an index into the network's
//! node table. Because the table is topologically ordered, comparing two
//! IDs compares their positions in that order.

use serde::{Deserialize, Serialize};

/// Opaque, copyable ID of a node in a [`Network`](crate::Network).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns the index as a `usize` for slice access.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
