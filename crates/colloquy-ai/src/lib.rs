//! Conversation core for Colloquy.
//!
//! Provides:
//! - the outbound message model and the pure sequence builder
//! - the `CompletionClient` seam plus an Azure AI inference implementation
//! - `ChatOrchestrator`, the per-session state machine that owns history

pub mod azure;
pub mod sequence;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

use async_trait::async_trait;
use colloquy_config::GenerationConfig;

pub use azure::{AzureInferenceClient, DEFAULT_TOTAL_TIMEOUT};
pub use sequence::build_messages;
pub use session::{BackendInfo, ChatOrchestrator, ChatState, Session, Turn, DIAGNOSTIC_PREFIX};

/// A backend that turns an ordered message sequence into one reply.
///
/// Implementations make exactly one attempt per call. Every failure mode
/// collapses into [`CompletionFailure`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[OutboundMessage],
        model_name: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionFailure>;
}

/// Role of an outbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a request. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum OutboundMessage {
    System(String),
    User(String),
    Assistant(String),
}

impl OutboundMessage {
    pub fn role(&self) -> Role {
        match self {
            Self::System(_) => Role::System,
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System(text) | Self::User(text) | Self::Assistant(text) => text,
        }
    }
}

/// Per-request generation settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    /// Caps reply length.
    pub max_output_tokens: u32,
    /// Sampling randomness in `[0, 2]`.
    pub temperature: f64,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for CompletionOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        }
    }
}

/// The single, uniform failure of a completion call.
///
/// Transport errors, rejected credentials, quota limits and unusable
/// responses all end up here with a readable cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{cause}")]
pub struct CompletionFailure {
    cause: String,
}

impl CompletionFailure {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}
