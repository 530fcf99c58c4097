//! nandmap CLI: timing-driven NAND/INV technology mapping.
//!
//! `nandmap map` maps an AND-inverter graph onto a two-cell standard
//! library, recovers area from slack, and writes the mapped netlist.
//! `nandmap sta` stops after timing analysis and prints the results.

#![warn(missing_docs)]

mod map;
mod pipeline;
mod sta;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// nandmap: timing-driven NAND/INV technology mapper.
#[derive(Parser, Debug)]
#[command(name = "nandmap", version, about = "Timing-driven NAND/INV technology mapper")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `nandmap.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Map a netlist, optimize area, and write the mapped netlist.
    Map(MapArgs),
    /// Run timing analysis only and print delays and slack.
    Sta(StaArgs),
}

/// Arguments for the `nandmap map` subcommand.
#[derive(Parser, Debug)]
pub struct MapArgs {
    /// ASCII AIGER netlist (`.aag`).
    pub netlist: String,

    /// Cell library file (default: `library.path` from `nandmap.toml`).
    #[arg(short, long)]
    pub library: Option<String>,

    /// Output path (default: the netlist path with the configured extension).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Report the fastest-cell mapping without area recovery.
    #[arg(long)]
    pub no_optimize: bool,

    /// Output format for the run summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `nandmap sta` subcommand.
#[derive(Parser, Debug)]
pub struct StaArgs {
    /// ASCII AIGER netlist (`.aag`).
    pub netlist: String,

    /// Cell library file (default: `library.path` from `nandmap.toml`).
    #[arg(short, long)]
    pub library: Option<String>,

    /// Output format for the timing results.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Summary output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON on stdout.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level(&global))
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .init();

    let result = match cli.command {
        Command::Map(ref args) => map::run(args, &global),
        Command::Sta(ref args) => sta::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Picks the tracing filter from the global flags.
fn log_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}
