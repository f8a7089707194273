//! Settings file types. Every section uses serde defaults so partial
//! files work.

use serde::{Deserialize, Serialize};

/// System prompt used when neither the settings file nor the command line
/// provides one. It names no reply language, so the model follows the user's.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a kind and knowledgeable AI assistant. \
Provide accurate, easy-to-understand answers to the user's questions.";

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColloquySettings {
    pub generation: GenerationConfig,
    pub session: SessionConfig,
}

/// Options forwarded with every completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Upper bound on reply length, in tokens.
    pub max_output_tokens: u32,
    /// Sampling randomness, 0.0-2.0.
    pub temperature: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_output_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Initial session state and caller-side limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub system_prompt: String,
    /// Deadline for one completion request in seconds; 0 disables it.
    pub request_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            request_timeout_secs: 0,
        }
    }
}

impl SessionConfig {
    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}
