//! Parsing and validation of `nandmap.toml` run configuration files.
//!
//! Every field has a default, so a missing file and an empty file both
//! yield the same [`MapperConfig`]. Command-line flags override the values
//! read here.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
