//! `nandmap map`: full mapping and area recovery.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use nandmap_diagnostics::DiagnosticSink;
use nandmap_timing::{analyze, map_network, write_report, ReportOptions};

use crate::pipeline;
use crate::{GlobalArgs, MapArgs, ReportFormat};

/// Runs the `nandmap map` command.
///
/// Returns exit code 0 once the report is written, even when the optimizer
/// reported critical-path violations; those are rendered as diagnostics.
pub fn run(args: &MapArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let resolved = pipeline::resolve_config(global)?;
    let config = &resolved.config;
    let netlist = PathBuf::from(&args.netlist);
    let library_path = pipeline::library_path(args.library.as_deref(), &resolved);

    if !global.quiet {
        eprintln!("   Mapping {}", netlist.display());
    }

    let sink = DiagnosticSink::new();
    let (network, library) = match pipeline::load_inputs(&netlist, &library_path, &sink, global) {
        Ok(inputs) => inputs,
        Err(e) => {
            pipeline::render_diagnostics(&sink, args.format, global);
            return Err(e);
        }
    };

    let optimize = config.optimize.enabled && !args.no_optimize;
    let result = if optimize {
        map_network(&network, &library, &sink)?
    } else {
        analyze(&network, &library)?
    };
    let summary = &result.summary;

    if !global.quiet {
        eprintln!(
            "   NODE: {} INV: {} NAND: {}",
            network.len(),
            summary.inverters_used,
            summary.nand_gates_used
        );
        eprintln!("   Initial delay {:.3}", summary.critical_path_delay);
        eprintln!("   Original area {:.3}", summary.original_area);
        if optimize {
            eprintln!("   Optimized area {:.3}", summary.optimized_area);
        }
    }

    let output = match args.output {
        Some(ref path) => PathBuf::from(path),
        None => pipeline::default_output_path(&netlist, &config.report.extension),
    };
    let file = File::create(&output)
        .map_err(|e| format!("cannot create {}: {e}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let options = ReportOptions {
        column_width: config.report.column_width,
    };
    write_report(&mut writer, &network, &library, &result, &options)?;
    writer.flush()?;

    pipeline::render_diagnostics(&sink, args.format, global);

    if args.format == ReportFormat::Json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    }
    if !global.quiet {
        eprintln!("   Wrote {}", output.display());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const LIBRARY: &str = "INV1\nTiming 1 1\nArea 2\nNAND1\nTiming 2 1\nArea 3\n";

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    fn args(dir: &Path, output: Option<&str>) -> MapArgs {
        MapArgs {
            netlist: dir.join("c.aag").display().to_string(),
            library: Some(dir.join("cells.lib").display().to_string()),
            output: output.map(|o| dir.join(o).display().to_string()),
            no_optimize: false,
            format: ReportFormat::Text,
        }
    }

    fn write_inputs(dir: &Path) {
        std::fs::write(dir.join("cells.lib"), LIBRARY).unwrap();
        std::fs::write(dir.join("c.aag"), "aag 3 2 0 1 1\n2\n4\n6\n6 2 4\ni0 a\ni1 b\no0 out\n")
            .unwrap();
    }

    fn config_file(dir: &Path, content: &str) -> Option<String> {
        let path = dir.join("nandmap.toml");
        std::fs::write(&path, content).unwrap();
        Some(path.display().to_string())
    }

    #[test]
    fn writes_report_next_to_netlist() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let config = config_file(dir.path(), "");
        let code = run(&args(dir.path(), None), &global(config)).unwrap();
        assert_eq!(code, 0);
        let text = std::fs::read_to_string(dir.path().join("c.mbench")).unwrap();
        assert!(text.starts_with("Initial delay : 5.000\n"));
        assert!(text.contains("OUTPUT(out)\n"));
        assert!(text.contains("X2 = INV1(X1)"));
    }

    #[test]
    fn explicit_output_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let config = config_file(dir.path(), "[report]\nextension = \"net\"\n");
        run(&args(dir.path(), Some("mapped.txt")), &global(config.clone())).unwrap();
        assert!(dir.path().join("mapped.txt").exists());
        run(&args(dir.path(), None), &global(config)).unwrap();
        assert!(dir.path().join("c.net").exists());
    }

    #[test]
    fn missing_netlist_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cells.lib"), LIBRARY).unwrap();
        let config = config_file(dir.path(), "");
        assert!(run(&args(dir.path(), None), &global(config)).is_err());
    }

    #[test]
    fn exhausted_library_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        std::fs::write(dir.path().join("cells.lib"), "NAND1\nTiming 2 1\nArea 3\n").unwrap();
        let config = config_file(dir.path(), "");
        let err = run(&args(dir.path(), None), &global(config)).unwrap_err();
        assert!(err.to_string().contains("inverter"));
    }
}
