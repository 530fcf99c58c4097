//! `nandmap sta`: timing analysis without area recovery.

use std::path::PathBuf;

use nandmap_diagnostics::DiagnosticSink;
use nandmap_timing::analyze;
use serde_json::json;

use crate::pipeline;
use crate::{GlobalArgs, ReportFormat, StaArgs};

/// Runs the `nandmap sta` command.
///
/// Prints the critical-path delay, the fastest-cell area and cell counts,
/// and the arrival time and slack of every primary output.
pub fn run(args: &StaArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let resolved = pipeline::resolve_config(global)?;
    let netlist = PathBuf::from(&args.netlist);
    let library_path = pipeline::library_path(args.library.as_deref(), &resolved);

    let sink = DiagnosticSink::new();
    let loaded = pipeline::load_inputs(&netlist, &library_path, &sink, global);
    pipeline::render_diagnostics(&sink, args.format, global);
    let (network, library) = loaded?;

    let result = analyze(&network, &library)?;
    let summary = &result.summary;
    let outputs: Vec<(&str, f64, f64)> = network
        .outputs()
        .iter()
        .map(|node| {
            let timing = result.state.node(node.id);
            (node.name.as_str(), timing.delay, timing.required_time - timing.delay)
        })
        .collect();

    match args.format {
        ReportFormat::Text => {
            println!("Critical path delay : {:.3}", summary.critical_path_delay);
            println!("Area                : {:.3}", summary.original_area);
            println!(
                "Cells               : {} inverter(s), {} NAND gate(s)",
                summary.inverters_used, summary.nand_gates_used
            );
            for (name, arrival, slack) in &outputs {
                println!("OUTPUT({name}) arrival {arrival:.3} slack {slack:.3}");
            }
        }
        ReportFormat::Json => {
            let outputs: Vec<_> = outputs
                .iter()
                .map(|(name, arrival, slack)| {
                    json!({ "name": name, "arrival": arrival, "slack": slack })
                })
                .collect();
            let value = json!({ "summary": summary, "outputs": outputs });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    if !global.quiet {
        let critical = network
            .outputs()
            .iter()
            .filter(|node| result.state.node(node.id).delay >= summary.critical_path_delay)
            .count();
        eprintln!("   {critical} output(s) on the critical path");
    }
    Ok(0)
}
