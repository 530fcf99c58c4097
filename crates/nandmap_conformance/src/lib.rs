//! Conformance test helpers for nandmap.
//!
//! Provides shared fixtures (small networks, cell libraries, random network
//! and library generators) and a pipeline function that runs library
//! parsing, AIGER mapping and all timing passes on in-memory text.

#![warn(missing_docs)]

use nandmap_diagnostics::{Diagnostic, DiagnosticSink};
use nandmap_library::{parse_library, CellKind, CellSpec, Library};
use nandmap_network::{map_aig, parse_aiger, Fanin, Network, NetworkBuilder, NodeId};
use nandmap_timing::{map_network, write_report, ReportOptions, TimingAnalysis};
use rand::rngs::StdRng;
use rand::Rng;

/// A library with one cell of each kind: `INV1` (1 + 1, area 2) and
/// `NAND1` (2 + 1 per fanout, area 3).
pub const SINGLE_CELL_LIBRARY: &str = "\
INV1
Timing 1.0 1.0
Area 2.0
NAND1
Timing 2.0 1.0
Area 3.0
";

/// A library with several sizes of each kind, listed out of area order.
pub const SAMPLE_LIBRARY: &str = "\
NAND2X4
Timing 0.6 0.2
Area 8.0

INVX1
Timing 1.2 0.8
Area 1.0
INVX4
Timing 0.4 0.2
Area 4.0
NAND2X1
Timing 1.8 0.9
Area 2.0
INVX2
Timing 0.7 0.5
Area 2.0
NAND2X2
Timing 1.0 0.5
Area 4.0
";

/// `a, b -> g1 = NAND(a, b) -> out = INV(g1)` as ASCII AIGER: the output
/// is the plain AND, so it carries an inverter after bubble mapping.
pub const TWO_GATE_AAG: &str = "aag 3 2 0 1 1\n2\n4\n6\n6 2 4\ni0 a\ni1 b\no0 out\n";

/// Result of running the full library + netlist + timing pipeline.
pub struct PipelineResult {
    /// The mapped network.
    pub network: Network,
    /// The parsed library.
    pub library: Library,
    /// Timing state and totals after optimization.
    pub analysis: TimingAnalysis,
    /// All diagnostics emitted during the run.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

/// Runs the whole pipeline on in-memory AIGER and library text.
///
/// # Panics
///
/// Panics if either input fails to parse or the library lacks a needed cell.
pub fn run_pipeline(aag: &str, library: &str) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let library = parse_library(library, "test.lib", &sink).unwrap();
    let aig = parse_aiger(aag).unwrap();
    let network = map_aig(&aig, "test.aag", &sink).unwrap();
    let analysis = map_network(&network, &library, &sink).unwrap();
    PipelineResult {
        network,
        library,
        analysis,
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
        diagnostics: sink.take_all(),
    }
}

/// Renders the mapped-netlist report of a pipeline result to a string.
pub fn report_text(result: &PipelineResult, options: &ReportOptions) -> String {
    let mut out = Vec::new();
    write_report(&mut out, &result.network, &result.library, &result.analysis, options).unwrap();
    String::from_utf8(out).unwrap()
}

/// Builds `a, b -> g1 = NAND(a, b) -> out = INV(g1)` directly.
pub fn two_gate_network() -> Network {
    let mut b = NetworkBuilder::new();
    let a = b.add_input("a").unwrap();
    let bb = b.add_input("b").unwrap();
    let g1 = b.add_gate("g1", Fanin::direct(a), Fanin::direct(bb)).unwrap();
    b.add_output("out", Fanin::inverted(g1)).unwrap();
    b.build()
}

/// The cells of [`SINGLE_CELL_LIBRARY`], built without parsing.
pub fn single_cell_library() -> Library {
    Library::new(vec![
        CellSpec::new("INV1", CellKind::Inverter, 1.0, 1.0, 2.0),
        CellSpec::new("NAND1", CellKind::Nand, 2.0, 1.0, 3.0),
    ])
}

/// Generates a random network in which every gate reaches an output.
///
/// Each gate reads two earlier inputs or gates with random inversions.
/// Every gate nobody reads drives its own output, and `extra_outputs`
/// more outputs tap random inputs or gates.
pub fn random_network(
    rng: &mut StdRng,
    inputs: usize,
    gates: usize,
    extra_outputs: usize,
) -> Network {
    let inputs = inputs.max(1);
    let mut b = NetworkBuilder::new();
    let mut drivers: Vec<NodeId> = (0..inputs)
        .map(|i| b.add_input(format!("i{i}")).unwrap())
        .collect();
    let mut readers = vec![0usize; inputs + gates];

    for g in 0..gates {
        let f0 = random_fanin(rng, &drivers, &mut readers);
        let f1 = random_fanin(rng, &drivers, &mut readers);
        drivers.push(b.add_gate(format!("g{g}"), f0, f1).unwrap());
    }

    let mut outputs = 0;
    for &gate in &drivers[inputs..] {
        if readers[gate.index()] == 0 {
            let inverted = rng.gen_bool(0.5);
            b.add_output(format!("o{outputs}"), Fanin { node: gate, inverted })
                .unwrap();
            outputs += 1;
        }
    }
    for _ in 0..extra_outputs {
        let fanin = random_fanin(rng, &drivers, &mut readers);
        b.add_output(format!("o{outputs}"), fanin).unwrap();
        outputs += 1;
    }
    if outputs == 0 {
        b.add_output("o0", Fanin::inverted(drivers[0])).unwrap();
    }
    b.build()
}

fn random_fanin(rng: &mut StdRng, drivers: &[NodeId], readers: &mut [usize]) -> Fanin {
    let node = drivers[rng.gen_range(0..drivers.len())];
    readers[node.index()] += 1;
    Fanin {
        node,
        inverted: rng.gen_bool(0.5),
    }
}

/// Generates a random library with `per_kind` cells of each kind.
///
/// Delays and areas are positive; there is no correlation between area
/// and speed.
pub fn random_library(rng: &mut StdRng, per_kind: usize) -> Library {
    let mut cells = Vec::new();
    for i in 0..per_kind.max(1) {
        cells.push(CellSpec::new(
            format!("INV{i}"),
            CellKind::Inverter,
            rng.gen_range(0.1..3.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.5..6.0),
        ));
        cells.push(CellSpec::new(
            format!("NAND{i}"),
            CellKind::Nand,
            rng.gen_range(0.1..3.0),
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.5..6.0),
        ));
    }
    Library::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn random_network_has_no_dangling_gates() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let net = random_network(&mut rng, 4, 30, 2);
            assert!(net.gates().iter().all(|g| g.fanout_count > 0));
            assert!(!net.outputs().is_empty());
        }
    }

    #[test]
    fn sample_library_parses() {
        let sink = DiagnosticSink::new();
        let lib = parse_library(SAMPLE_LIBRARY, "sample.lib", &sink).unwrap();
        assert_eq!(lib.inverters().len(), 3);
        assert_eq!(lib.nand_gates().len(), 3);
        assert_eq!(lib.inverters()[0].name, "INVX1");
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn fixtures_agree() {
        let parsed = parse_library(SINGLE_CELL_LIBRARY, "one.lib", &DiagnosticSink::new()).unwrap();
        assert_eq!(parsed.inverters(), single_cell_library().inverters());
        assert_eq!(parsed.nand_gates(), single_cell_library().nand_gates());
        assert_eq!(two_gate_network().len(), 4);
    }
}
