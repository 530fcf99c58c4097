//! Opaque ID newtype for library cells.
//!
//! A [`CellId`] is a position in one of the library's area-sorted cell lists.
//! Which list it indexes is implied by where the ID is stored.

use serde::{Deserialize, Serialize};

/// Opaque, copyable index of a cell within its kind's area-sorted list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CellId(u32);

impl CellId {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let id = CellId::from_raw(3);
        assert_eq!(id.as_raw(), 3);
        assert_eq!(id.index(), 3);
    }

    #[test]
    fn serde_roundtrip() {
        let id = CellId::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        let restored: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
