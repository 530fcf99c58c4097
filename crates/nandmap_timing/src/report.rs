//! Text report of the mapped netlist.
//!
//! ```text
//! Initial delay : 5.000
//! Original area : 5.000
//! Optimized area : 5.000
//! INPUT(a)
//! INPUT(b)
//! OUTPUT(out)
//! X1 = NAND1(a, b)                              slack : 0.00
//! X2 = INV1(X1)                                 slack : 0.00
//! ```
//!
//! Instances are numbered from 1 in emission order. For a gate, the
//! inverters on fanin 0 and fanin 1 come first, then the NAND. An operand
//! is either a primary-input name or the `X<id>` of the instance driving
//! it.

use crate::error::TimingError;
use crate::state::{assigned, TimingState};
use crate::TimingAnalysis;
use nandmap_library::{CellKind, Library};
use nandmap_network::{Fanin, Network, NodeKind};
use std::io::Write;

/// Default padded width of the instance column.
pub const DEFAULT_COLUMN_WIDTH: usize = 45;

/// Layout options for [`write_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Width the `X<id> = CELL(...)` text is padded to before the slack.
    pub column_width: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

/// Writes the mapped netlist with per-instance slack to `out`.
pub fn write_report<W: Write>(
    out: &mut W,
    network: &Network,
    library: &Library,
    result: &TimingAnalysis,
    options: &ReportOptions,
) -> Result<(), TimingError> {
    let summary = &result.summary;
    writeln!(out, "Initial delay : {:.3}", summary.critical_path_delay)?;
    writeln!(out, "Original area : {:.3}", summary.original_area)?;
    writeln!(out, "Optimized area : {:.3}", summary.optimized_area)?;
    for input in network.inputs() {
        writeln!(out, "INPUT({})", input.name)?;
    }
    for output in network.outputs() {
        writeln!(out, "OUTPUT({})", output.name)?;
    }

    let mut writer = InstanceWriter {
        out,
        network,
        width: options.column_width,
        next_id: 1,
        nand_instance: vec![0; network.len()],
    };
    for node in network.nodes() {
        let timing = result.state.node(node.id);
        match node.kind {
            NodeKind::PrimaryInput => {}
            NodeKind::PrimaryOutput { fanin } => {
                if fanin.inverted {
                    let inv = assigned(timing.chosen_inv[0], node)?;
                    let name = &library.cell(CellKind::Inverter, inv).name;
                    writer.inverter(name, fanin, timing.inv_slack[0])?;
                }
            }
            NodeKind::Gate { fanins } => {
                let mut operands = [String::new(), String::new()];
                for (k, &fanin) in fanins.iter().enumerate() {
                    operands[k] = if fanin.inverted {
                        let inv = assigned(timing.chosen_inv[k], node)?;
                        let name = &library.cell(CellKind::Inverter, inv).name;
                        let id = writer.inverter(name, fanin, timing.inv_slack[k])?;
                        format!("X{id}")
                    } else {
                        writer.operand(fanin)
                    };
                }
                let nand = assigned(timing.chosen_nand, node)?;
                let text = format!(
                    "X{} = {}({}, {})",
                    writer.next_id,
                    library.cell(CellKind::Nand, nand).name,
                    operands[0],
                    operands[1]
                );
                writer.nand_instance[node.id.index()] = writer.next_id;
                writer.line(&text, timing.slack)?;
            }
        }
    }
    Ok(())
}

struct InstanceWriter<'a, W> {
    out: &'a mut W,
    network: &'a Network,
    width: usize,
    next_id: u32,
    /// Instance number of each gate's NAND, indexed by node.
    nand_instance: Vec<u32>,
}

impl<W: Write> InstanceWriter<'_, W> {
    /// The signal a fanin delivers before any inverter on the edge.
    fn operand(&self, fanin: Fanin) -> String {
        let driver = self.network.node(fanin.node);
        if driver.is_input() {
            driver.name.clone()
        } else {
            format!("X{}", self.nand_instance[fanin.node.index()])
        }
    }

    fn inverter(&mut self, cell: &str, fanin: Fanin, slack: f64) -> Result<u32, TimingError> {
        let id = self.next_id;
        let text = format!("X{id} = {cell}({})", self.operand(fanin));
        self.line(&text, slack)?;
        Ok(id)
    }

    fn line(&mut self, text: &str, slack: f64) -> Result<(), TimingError> {
        let pad = self.width.abs_diff(text.len());
        writeln!(self.out, "{text}{:pad$} slack : {}", "", format_slack(slack))?;
        self.next_id += 1;
        Ok(())
    }
}

/// Formats a slack to two decimals, printing values that round to zero
/// from below as `0.00`.
pub fn format_slack(slack: f64) -> String {
    let text = format!("{slack:.2}");
    if text == "-0.00" {
        "0.00".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_zero_is_normalized() {
        assert_eq!(format_slack(-0.0), "0.00");
        assert_eq!(format_slack(-0.004), "0.00");
        assert_eq!(format_slack(-0.006), "-0.01");
        assert_eq!(format_slack(1.5), "1.50");
        assert_eq!(format_slack(0.0), "0.00");
    }

    #[test]
    fn default_width() {
        assert_eq!(ReportOptions::default().column_width, 45);
    }
}
