//! Range and format checks. All violations are collected before failing.

use colloquy_common::ConfigError;

use crate::backend::BackendConfig;
use crate::schema::ColloquySettings;

/// Validate the settings file, collecting all errors.
pub fn validate_settings(settings: &ColloquySettings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "generation.max_output_tokens",
        settings.generation.max_output_tokens as u64,
        1,
        131_072,
    );
    validate_range_f64(
        &mut errors,
        "generation.temperature",
        settings.generation.temperature,
        0.0,
        2.0,
    );
    validate_range(
        &mut errors,
        "session.request_timeout_secs",
        settings.session.request_timeout_secs,
        0,
        600,
    );

    finish(errors)
}

/// Validate the backend triple beyond presence.
pub fn validate_backend(config: &BackendConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if !(config.endpoint.starts_with("https://") || config.endpoint.starts_with("http://")) {
        errors.push(format!(
            "endpoint '{}' must start with http:// or https://",
            config.endpoint
        ));
    }

    finish(errors)
}

fn finish(errors: Vec<String>) -> Result<(), ConfigError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, name: &str, value: f64, min: f64, max: f64) {
    if value.is_nan() || value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        assert!(validate_settings(&ColloquySettings::default()).is_ok());
    }

    #[test]
    fn catches_zero_max_tokens() {
        let mut settings = ColloquySettings::default();
        settings.generation.max_output_tokens = 0;
        let err = validate_settings(&settings).unwrap_err().to_string();
        assert!(err.contains("generation.max_output_tokens"));
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        let mut settings = ColloquySettings::default();
        settings.generation.temperature = 0.0;
        assert!(validate_settings(&settings).is_ok());
        settings.generation.temperature = 2.0;
        assert!(validate_settings(&settings).is_ok());
        settings.generation.temperature = -0.1;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn collects_multiple_errors() {
        let mut settings = ColloquySettings::default();
        settings.generation.temperature = 9.0;
        settings.session.request_timeout_secs = 10_000;
        let err = validate_settings(&settings).unwrap_err().to_string();
        assert!(err.contains("generation.temperature"));
        assert!(err.contains("session.request_timeout_secs"));
    }

    #[test]
    fn backend_endpoint_scheme() {
        let ok = BackendConfig::new("https://example.com", "k", "m");
        assert!(validate_backend(&ok).is_ok());

        let local = BackendConfig::new("http://localhost:8080", "k", "m");
        assert!(validate_backend(&local).is_ok());

        let bad = BackendConfig::new("example.com", "k", "m");
        let err = validate_backend(&bad).unwrap_err().to_string();
        assert!(err.contains("example.com"));
    }
}
