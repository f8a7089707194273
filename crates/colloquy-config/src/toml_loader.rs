//! TOML settings file loading.

use std::path::{Path, PathBuf};

use colloquy_common::ConfigError;
use tracing::{debug, info};

use crate::schema::ColloquySettings;
use crate::validation;

/// Load settings from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. The parsed settings must pass
/// validation; out-of-range values are an error rather than silently
/// replaced.
pub fn load_from_path(path: &Path) -> Result<ColloquySettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let settings = parse_settings(&content)?;
    info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<ColloquySettings, ConfigError> {
    let settings: ColloquySettings = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;
    validation::validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/colloquy/config.toml`
/// On Linux: `~/.config/colloquy/config.toml`
///
/// Unlike an explicit path, the default file is optional.
pub fn load_default() -> Result<ColloquySettings, ConfigError> {
    let Some(path) = default_config_path() else {
        debug!("no platform config directory, using default settings");
        return Ok(ColloquySettings::default());
    };

    if !path.exists() {
        debug!("no settings at {}, using defaults", path.display());
        return Ok(ColloquySettings::default());
    }

    load_from_path(&path)
}

/// Platform-specific default settings path, if the platform has a config
/// directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("colloquy").join("config.toml"))
}
