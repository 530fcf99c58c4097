//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::MapperConfig;
use std::path::Path;

/// Name of the configuration file looked up in a working directory.
pub const CONFIG_FILE_NAME: &str = "nandmap.toml";

/// Loads the configuration for a working directory.
///
/// Reads `<dir>/nandmap.toml` when it exists and returns the defaults
/// otherwise.
pub fn load_config(dir: &Path) -> Result<MapperConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        load_config_file(&path)
    } else {
        Ok(MapperConfig::default())
    }
}

/// Loads and validates a configuration from an explicit file path.
///
/// Unlike [`load_config`], a missing file is an error.
pub fn load_config_file(path: &Path) -> Result<MapperConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<MapperConfig, ConfigError> {
    let config: MapperConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &MapperConfig) -> Result<(), ConfigError> {
    if config.library.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "library.path must not be empty".to_string(),
        ));
    }
    if config.report.column_width == 0 {
        return Err(ConfigError::ValidationError(
            "report.column_width must be positive".to_string(),
        ));
    }
    if config.report.extension.is_empty() {
        return Err(ConfigError::ValidationError(
            "report.extension must not be empty".to_string(),
        ));
    }
    Ok(())
}
