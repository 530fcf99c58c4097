//! Conversion of an AND-inverter graph into NAND+INV form.
//!
//! Every AND gate becomes a NAND gate whose output carries the complement
//! of the AND value. An edge reading a converted gate therefore flips its
//! inversion flag; edges reading primary inputs keep theirs. After this
//! pass, an `inverted` fanin is exactly an edge that needs an inverter cell.

use crate::aiger::{is_complemented, var_of, Aig, AigAnd};
use crate::error::NetworkError;
use crate::ids::NodeId;
use crate::network::{Network, NetworkBuilder};
use crate::node::Fanin;
use nandmap_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Maps `aig` into a topologically ordered NAND+INV [`Network`].
///
/// Gates that reach no primary output are swept with a `W001` warning.
/// Outputs wired straight to an input without inversion produce no cell
/// and are reported with `W003`. `file` is only used for diagnostic
/// locations.
pub fn map_aig(aig: &Aig, file: &str, sink: &DiagnosticSink) -> Result<Network, NetworkError> {
    let and_by_var: HashMap<u32, usize> = aig
        .ands
        .iter()
        .enumerate()
        .map(|(index, gate)| (var_of(gate.lhs), index))
        .collect();

    for output in &aig.outputs {
        if var_of(output.lit) == 0 {
            return Err(NetworkError::ConstantFanin { line: output.line });
        }
    }

    let live = live_gates(aig, &and_by_var);
    for (gate, _) in aig.ands.iter().zip(&live).filter(|(_, live)| !**live) {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::DANGLING_GATE,
                format!("gate `n{}` does not reach any primary output", var_of(gate.lhs)),
            )
            .with_location(Location::new(file, gate.line))
            .with_note("the gate was removed before timing analysis"),
        );
    }

    let order = gate_order(aig, &and_by_var, &live)?;

    let mut builder = NetworkBuilder::new();
    let mut driver: HashMap<u32, (NodeId, bool)> = HashMap::new();

    for (index, input) in aig.inputs.iter().enumerate() {
        let name = input.name.clone().unwrap_or_else(|| format!("pi{index}"));
        let id = builder.add_input(name)?;
        driver.insert(var_of(input.lit), (id, false));
    }

    for &index in &order {
        let gate = &aig.ands[index];
        let fanin0 = bubble(gate.rhs0, gate.line, &driver)?;
        let fanin1 = bubble(gate.rhs1, gate.line, &driver)?;
        let id = builder.add_gate(format!("n{}", var_of(gate.lhs)), fanin0, fanin1)?;
        driver.insert(var_of(gate.lhs), (id, true));
    }

    for (index, output) in aig.outputs.iter().enumerate() {
        let name = output.name.clone().unwrap_or_else(|| format!("po{index}"));
        let fanin = bubble(output.lit, output.line, &driver)?;
        let from_input = matches!(driver.get(&var_of(output.lit)), Some((_, false)));
        if from_input && !fanin.inverted {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::PASSTHROUGH_OUTPUT,
                    format!("output `{name}` is wired directly to a primary input"),
                )
                .with_location(Location::new(file, output.line))
                .with_note("no cell is generated for this output"),
            );
        }
        builder.add_output(name, fanin)?;
    }

    let network = builder.build();
    tracing::info!(
        inputs = network.inputs().len(),
        gates = network.gates().len(),
        outputs = network.outputs().len(),
        swept = aig.ands.len() - order.len(),
        "mapped AND-inverter graph to NAND/INV form"
    );
    Ok(network)
}

/// Resolves a literal into a fanin, flipping the inversion for gate drivers.
fn bubble(lit: u32, line: u32, driver: &HashMap<u32, (NodeId, bool)>) -> Result<Fanin, NetworkError> {
    let var = var_of(lit);
    if var == 0 {
        return Err(NetworkError::ConstantFanin { line });
    }
    let &(node, is_gate) = driver
        .get(&var)
        .ok_or(NetworkError::UndefinedVariable { line, var })?;
    Ok(Fanin {
        node,
        inverted: is_complemented(lit) ^ is_gate,
    })
}

/// Marks the AND gates in the transitive fanin of some primary output.
fn live_gates(aig: &Aig, and_by_var: &HashMap<u32, usize>) -> Vec<bool> {
    let mut live = vec![false; aig.ands.len()];
    let mut stack: Vec<u32> = aig.outputs.iter().map(|o| var_of(o.lit)).collect();
    while let Some(var) = stack.pop() {
        let Some(&index) = and_by_var.get(&var) else {
            continue;
        };
        if live[index] {
            continue;
        }
        live[index] = true;
        let gate = &aig.ands[index];
        stack.push(var_of(gate.rhs0));
        stack.push(var_of(gate.rhs1));
    }
    live
}

/// Orders the live gates so that every gate follows the gates it reads.
///
/// File order is kept when it already satisfies this; otherwise the gates
/// are sorted topologically.
fn gate_order(
    aig: &Aig,
    and_by_var: &HashMap<u32, usize>,
    live: &[bool],
) -> Result<Vec<usize>, NetworkError> {
    let file_order: Vec<usize> = (0..aig.ands.len()).filter(|&i| live[i]).collect();
    let reads_earlier = |index: usize, gate: &AigAnd| {
        [gate.rhs0, gate.rhs1].iter().all(|&lit| {
            and_by_var
                .get(&var_of(lit))
                .map_or(true, |&source| source < index)
        })
    };
    if file_order
        .iter()
        .all(|&index| reads_earlier(index, &aig.ands[index]))
    {
        return Ok(file_order);
    }

    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let mut vertex: HashMap<usize, NodeIndex> = HashMap::new();
    for &index in &file_order {
        vertex.insert(index, graph.add_node(index));
    }
    for &index in &file_order {
        let gate = &aig.ands[index];
        for lit in [gate.rhs0, gate.rhs1] {
            if let Some(source) = and_by_var.get(&var_of(lit)) {
                if let (Some(&from), Some(&to)) = (vertex.get(source), vertex.get(&index)) {
                    graph.add_edge(from, to, ());
                }
            }
        }
    }

    let sorted = petgraph::algo::toposort(&graph, None).map_err(|cycle| NetworkError::Cycle {
        var: var_of(aig.ands[graph[cycle.node_id()]].lhs),
    })?;
    tracing::debug!(gates = sorted.len(), "AND gates reordered topologically");
    Ok(sorted.into_iter().map(|v| graph[v]).collect())
}
