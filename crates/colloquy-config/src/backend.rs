//! Backend endpoint, model and credential resolution.

use std::fmt;

use colloquy_common::ConfigError;

pub const ENDPOINT_VAR: &str = "AZURE_AI_ENDPOINT";
pub const MODEL_NAME_VAR: &str = "AZURE_AI_MODEL_NAME";
pub const API_KEY_VAR: &str = "AZURE_AI_API_KEY";

/// Connection details for the completion backend.
///
/// Resolved once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model_name: String,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl BackendConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Resolve from `AZURE_AI_ENDPOINT`, `AZURE_AI_MODEL_NAME` and
    /// `AZURE_AI_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using an arbitrary variable lookup.
    ///
    /// Unset and blank values are both treated as missing; every missing
    /// variable is reported in a single [`ConfigError::Missing`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |key: &str| -> String {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(key.to_string());
                    String::new()
                }
            }
        };

        let endpoint = read(ENDPOINT_VAR);
        let model_name = read(MODEL_NAME_VAR);
        let api_key = read(API_KEY_VAR);

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let config = Self::new(endpoint, api_key, model_name);
        crate::validation::validate_backend(&config)?;
        Ok(config)
    }
}
