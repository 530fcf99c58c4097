//! Cell characterization records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The logic function of a library cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// A single-input inverter.
    Inverter,
    /// A two-input NAND gate.
    Nand,
}

impl CellKind {
    /// Classifies a cell by name: `INV` anywhere in the name wins over `NAND`.
    pub fn from_cell_name(name: &str) -> Option<Self> {
        if name.contains("INV") {
            Some(CellKind::Inverter)
        } else if name.contains("NAND") {
            Some(CellKind::Nand)
        } else {
            None
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Inverter => write!(f, "inverter"),
            CellKind::Nand => write!(f, "NAND gate"),
        }
    }
}

/// Delay and area characterization of one library cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSpec {
    /// Cell name as written in the mapped netlist (e.g. `NAND2X1`).
    pub name: String,
    /// Logic function of the cell.
    pub kind: CellKind,
    /// Load-independent part of the delay.
    pub fixed_delay: f64,
    /// Delay added per driven fanout.
    pub load_delay: f64,
    /// Cell area.
    pub area: f64,
}

impl CellSpec {
    /// Creates a cell characterization.
    pub fn new(
        name: impl Into<String>,
        kind: CellKind,
        fixed_delay: f64,
        load_delay: f64,
        area: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            fixed_delay,
            load_delay,
            area,
        }
    }

    /// Total delay of this cell when its output drives `fanout` consumers.
    ///
    /// Inverters are characterized against a single load regardless of
    /// `fanout`; NAND gates scale the load term with the fanout count.
    pub fn delay(&self, fanout: usize) -> f64 {
        match self.kind {
            CellKind::Inverter => self.fixed_delay + self.load_delay,
            CellKind::Nand => self.fixed_delay + self.load_delay * fanout as f64,
        }
    }
}
