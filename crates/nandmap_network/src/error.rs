//! Error types for netlist loading and network construction.

use std::path::PathBuf;

/// Errors raised while reading a netlist or building a [`Network`](crate::Network).
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The netlist file could not be read.
    #[error("cannot read netlist {}: {source}", path.display())]
    Io {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the netlist is malformed.
    #[error("netlist line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: u32,
        /// What was wrong with the line.
        message: String,
    },

    /// The netlist uses a feature outside combinational NAND/INV mapping.
    #[error("netlist line {line}: {feature} are not supported")]
    Unsupported {
        /// 1-based line number.
        line: u32,
        /// The offending feature, in plural form.
        feature: &'static str,
    },

    /// A literal refers to a variable that is never defined.
    #[error("netlist line {line}: variable {var} is used but never defined")]
    UndefinedVariable {
        /// 1-based line number of the use.
        line: u32,
        /// The AIGER variable index.
        var: u32,
    },

    /// A gate or output is driven by constant 0 or 1.
    #[error("netlist line {line}: constant fanins cannot be mapped to NAND/INV cells")]
    ConstantFanin {
        /// 1-based line number.
        line: u32,
    },

    /// The AND gates form a combinational loop.
    #[error("combinational cycle through AND variable {var}")]
    Cycle {
        /// A variable on the cycle.
        var: u32,
    },

    /// A node was added after the block it belongs to was closed.
    #[error("{kind} `{name}` added after the first {later}")]
    OutOfOrder {
        /// Name of the misplaced node.
        name: String,
        /// Kind of the misplaced node.
        kind: &'static str,
        /// Kind of the block that had already started.
        later: &'static str,
    },

    /// A fanin refers to a node that does not exist yet.
    #[error("`{name}` reads node {fanin}, which is not defined before it")]
    UnknownFanin {
        /// Name of the reading node.
        name: String,
        /// Raw index of the missing fanin.
        fanin: u32,
    },

    /// A fanin refers to a primary output.
    #[error("`{name}` reads primary output `{output}`")]
    FaninIsOutput {
        /// Name of the reading node.
        name: String,
        /// Name of the output being read.
        output: String,
    },
}
