//! Shared pipeline helpers for CLI commands.
//!
//! Configuration resolution, input loading, and diagnostic rendering used
//! by both `map` and `sta`.

use std::path::{Path, PathBuf};

use nandmap_config::{load_config, load_config_file, MapperConfig};
use nandmap_diagnostics::{DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use nandmap_library::{load_library, Library};
use nandmap_network::{load_network, Network};

use crate::{GlobalArgs, ReportFormat};

/// A loaded configuration and the directory its relative paths resolve from.
pub struct ResolvedConfig {
    /// The parsed configuration.
    pub config: MapperConfig,
    /// Directory of the config file, or the current directory.
    pub base_dir: PathBuf,
}

/// Loads the run configuration.
///
/// An explicit `--config` file must exist. Without it, `nandmap.toml` in the
/// current directory is used when present, and defaults otherwise.
pub fn resolve_config(global: &GlobalArgs) -> Result<ResolvedConfig, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref path) => {
            let path = PathBuf::from(path);
            let config = load_config_file(&path)
                .map_err(|e| format!("cannot load config {}: {e}", path.display()))?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(ResolvedConfig { config, base_dir })
        }
        None => {
            let cwd = std::env::current_dir()?;
            let config = load_config(&cwd)?;
            Ok(ResolvedConfig {
                config,
                base_dir: cwd,
            })
        }
    }
}

/// Picks the library file: the `--library` flag, else the configured path.
pub fn library_path(flag: Option<&str>, resolved: &ResolvedConfig) -> PathBuf {
    match flag {
        Some(path) => PathBuf::from(path),
        None => resolved.base_dir.join(&resolved.config.library.path),
    }
}

/// Default report path: the netlist path with its extension replaced.
pub fn default_output_path(netlist: &Path, extension: &str) -> PathBuf {
    netlist.with_extension(extension)
}

/// Reads the cell library and the netlist, emitting warnings into `sink`.
pub fn load_inputs(
    netlist: &Path,
    library: &Path,
    sink: &DiagnosticSink,
    global: &GlobalArgs,
) -> Result<(Network, Library), Box<dyn std::error::Error>> {
    let library = load_library(library, sink)?;
    if !global.quiet {
        eprintln!(
            "   Library {} inverter(s), {} NAND gate(s)",
            library.inverters().len(),
            library.nand_gates().len()
        );
    }
    let network = load_network(netlist, sink)?;
    if !global.quiet {
        eprintln!(
            "   Netlist {} input(s), {} gate(s), {} output(s)",
            network.inputs().len(),
            network.gates().len(),
            network.outputs().len()
        );
    }
    Ok((network, library))
}

/// Prints collected diagnostics to stderr.
///
/// Text format renders each diagnostic rustc-style followed by a count
/// line; JSON format prints the diagnostics array on stderr so stdout stays
/// reserved for the run summary.
pub fn render_diagnostics(sink: &DiagnosticSink, format: ReportFormat, global: &GlobalArgs) {
    let diagnostics = sink.diagnostics();
    if diagnostics.is_empty() {
        return;
    }

    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprintln!("{}", renderer.render(diag));
            }
            if !global.quiet {
                eprintln!(
                    "   Result: {} error(s), {} warning(s)",
                    sink.error_count(),
                    sink.warning_count()
                );
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&diagnostics).unwrap_or_else(|_| "[]".to_string());
            eprintln!("{json}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(config: Option<String>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config,
        }
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alt.toml");
        std::fs::write(&path, "[library]\npath = \"cells.lib\"\n[report]\nextension = \"out\"\n")
            .unwrap();
        let resolved = resolve_config(&global(Some(path.display().to_string()))).unwrap();
        assert_eq!(resolved.config.report.extension, "out");
        assert_eq!(library_path(None, &resolved), dir.path().join("cells.lib"));
        assert_eq!(
            library_path(Some("other.lib"), &resolved),
            PathBuf::from("other.lib")
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = resolve_config(&global(Some(path.display().to_string()))).err().unwrap();
        assert!(err.to_string().contains("cannot load config"));
    }

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            default_output_path(Path::new("bench/c17.aag"), "mbench"),
            PathBuf::from("bench/c17.mbench")
        );
        assert_eq!(
            default_output_path(Path::new("c17"), "mbench"),
            PathBuf::from("c17.mbench")
        );
    }

    #[test]
    fn load_inputs_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("cells.lib");
        let aag = dir.path().join("c.aag");
        std::fs::write(&lib, "INV1\nTiming 1 1\nArea 2\nNAND1\nTiming 2 1\nArea 3\n").unwrap();
        std::fs::write(&aag, "aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n").unwrap();
        let sink = DiagnosticSink::new();
        let (network, library) = load_inputs(&aag, &lib, &sink, &global(None)).unwrap();
        assert_eq!(network.gates().len(), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn load_inputs_reports_missing_library() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DiagnosticSink::new();
        let result = load_inputs(
            &dir.path().join("c.aag"),
            &dir.path().join("none.lib"),
            &sink,
            &global(None),
        );
        assert!(result.is_err());
    }
}
