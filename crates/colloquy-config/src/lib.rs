//! Colloquy configuration.
//!
//! Two sources feed a running session:
//! - the backend triple (endpoint, model, API key), read once from the
//!   process environment and fatal when incomplete;
//! - optional TOML settings for generation options and the session's
//!   initial system prompt. Missing fields use defaults.
//!
//! ```rust,no_run
//! use colloquy_config::{load_settings, BackendConfig};
//!
//! let backend = BackendConfig::from_env().expect("backend not configured");
//! let settings = load_settings(None).expect("bad settings file");
//! println!("{} via {}", backend.model_name, backend.endpoint);
//! println!("temperature {}", settings.generation.temperature);
//! ```

pub mod backend;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use backend::{BackendConfig, API_KEY_VAR, ENDPOINT_VAR, MODEL_NAME_VAR};
pub use schema::{ColloquySettings, GenerationConfig, SessionConfig, DEFAULT_SYSTEM_PROMPT};

use std::path::Path;

use colloquy_common::ConfigError;

/// Load settings from an explicit path, or from the platform default path.
///
/// An explicit path must exist. The default path is optional: when no file
/// is there, defaults are returned.
pub fn load_settings(path: Option<&Path>) -> Result<ColloquySettings, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
