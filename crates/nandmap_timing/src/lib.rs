//! Static timing analysis and slack-driven area recovery for NAND/INV
//! networks.
//!
//! The pipeline has three passes over a [`Network`], all sharing one
//! [`TimingState`]:
//!
//! 1. [`forward::propagate_forward`] maps every node to the fastest cells
//!    and computes delays and the critical-path delay.
//! 2. [`backward::propagate_backward`] derives required times from the
//!    critical-path delay.
//! 3. [`optimize::optimize_area`] swaps in smaller cells wherever the
//!    local slack allows, without lengthening the critical path.
//!
//! [`analyze`] runs the first two, [`map_network`] runs all three, and
//! [`report::write_report`] prints the result.

#![warn(missing_docs)]

pub mod backward;
pub mod error;
pub mod forward;
pub mod optimize;
pub mod report;
pub mod state;
pub mod summary;

pub use error::TimingError;
pub use report::{write_report, ReportOptions};
pub use state::{NodeTiming, TimingState};
pub use summary::CircuitTimingSummary;

use nandmap_diagnostics::DiagnosticSink;
use nandmap_library::Library;
use nandmap_network::Network;

/// Per-node timing together with the circuit totals.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingAnalysis {
    /// Timing and cell choices for every node.
    pub state: TimingState,
    /// Circuit-level totals.
    pub summary: CircuitTimingSummary,
}

/// Maps `network` to the fastest cells and computes required times and
/// baseline slack. `optimized_area` in the summary equals `original_area`.
pub fn analyze(network: &Network, library: &Library) -> Result<TimingAnalysis, TimingError> {
    let mut state = TimingState::new(network);
    let baseline = forward::propagate_forward(network, library, &mut state)?;
    backward::propagate_backward(network, library, &mut state, baseline.critical_path_delay)?;
    backward::annotate_slack(network, library, &mut state)?;
    Ok(TimingAnalysis {
        state,
        summary: CircuitTimingSummary {
            critical_path_delay: baseline.critical_path_delay,
            original_area: baseline.area,
            optimized_area: baseline.area,
            inverters_used: baseline.inverters_used,
            nand_gates_used: baseline.nand_gates_used,
            violations: 0,
        },
    })
}

/// Runs the full mapping pipeline: fastest-cell mapping, required times,
/// then greedy area recovery.
///
/// Critical-path violations found by the optimizer are emitted into `sink`
/// and counted in the summary; they do not fail the run.
pub fn map_network(
    network: &Network,
    library: &Library,
    sink: &DiagnosticSink,
) -> Result<TimingAnalysis, TimingError> {
    let mut analysis = analyze(network, library)?;
    let outcome = optimize::optimize_area(
        network,
        library,
        &mut analysis.state,
        analysis.summary.critical_path_delay,
        sink,
    )?;
    analysis.summary.optimized_area = outcome.area;
    analysis.summary.violations = outcome.violations;
    Ok(analysis)
}
