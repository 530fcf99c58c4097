//! Error types for the timing passes.

use nandmap_library::CellKind;

/// Fatal problems that stop timing analysis or optimization.
///
/// A node whose optimized delay exceeds the critical path is not an error
/// here; it is reported as a `T001` diagnostic and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum TimingError {
    /// A node needs a cell of a kind the library does not provide.
    #[error("no {kind} in the library for node `{node}`")]
    LibraryExhausted {
        /// The missing cell kind.
        kind: CellKind,
        /// Name of the node that needed it.
        node: String,
    },

    /// A pass that relies on forward propagation found a node without cells.
    #[error("node `{node}` has no cell assigned; forward propagation has not run")]
    Unmapped {
        /// Name of the node.
        node: String,
    },

    /// The report could not be written.
    #[error("cannot write report: {0}")]
    Write(#[from] std::io::Error),
}
