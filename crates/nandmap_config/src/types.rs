//! Configuration types deserialized from `nandmap.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration parsed from `nandmap.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapperConfig {
    /// Where the standard-cell library comes from.
    #[serde(default)]
    pub library: LibraryConfig,
    /// Layout of the mapped-netlist report.
    #[serde(default)]
    pub report: ReportConfig,
    /// Area optimization settings.
    #[serde(default)]
    pub optimize: OptimizeConfig,
}

/// Cell library settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library file used when `--library` is not given.
    #[serde(default = "default_library_path")]
    pub path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
        }
    }
}

/// Mapped-netlist report settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Width the `X<id> = CELL(...)` text is padded to before the slack column.
    #[serde(default = "default_column_width")]
    pub column_width: usize,
    /// File extension of the report when `--output` is not given.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column_width: default_column_width(),
            extension: default_extension(),
        }
    }
}

/// Greedy area optimization settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizeConfig {
    /// When `false`, the fastest-cell mapping is reported as-is.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_library_path() -> PathBuf {
    PathBuf::from("PA3.lib")
}

fn default_column_width() -> usize {
    45
}

fn default_extension() -> String {
    "mbench".to_string()
}

fn default_true() -> bool {
    true
}
