//! ChatOrchestrator struct and session management.

use std::sync::Arc;
use std::time::Duration;

use colloquy_config::BackendConfig;
use tracing::debug;

use crate::{CompletionClient, CompletionOptions};

use super::types::{BackendInfo, ChatState, Session, Turn};

/// Owns one conversation and drives it against a completion backend.
///
/// Every mutating operation takes `&mut self`, so a session never has more
/// than one request in flight.
pub struct ChatOrchestrator {
    /// History and system prompt.
    pub(super) session: Session,
    /// Backend used for every send.
    pub(super) client: Arc<dyn CompletionClient>,
    /// Endpoint and model, without the credential.
    pub(super) backend: BackendInfo,
    /// Generation options forwarded with each request.
    pub(super) options: CompletionOptions,
    /// Caller deadline for a single request.
    pub(super) request_timeout: Option<Duration>,
    pub(super) state: ChatState,
}

impl ChatOrchestrator {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        backend: &BackendConfig,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            session: Session::new(system_prompt),
            client,
            backend: BackendInfo {
                endpoint: backend.endpoint.clone(),
                model_name: backend.model_name.clone(),
            },
            options: CompletionOptions::default(),
            request_timeout: None,
            state: ChatState::Idle,
        }
    }

    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Abandon a request after `timeout`; the send then yields a degraded turn.
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Drop all turns at once. The system prompt is kept.
    pub fn reset_history(&mut self) {
        debug!(turns = self.session.history.len(), "resetting history");
        self.session.history = Vec::new();
    }

    /// Replace the system prompt used by the next send.
    pub fn update_system_prompt(&mut self, text: impl Into<String>) {
        self.session.system_prompt = text.into();
    }

    /// Completed turns in conversational order.
    pub fn history(&self) -> &[Turn] {
        self.session.history()
    }

    pub fn system_prompt(&self) -> &str {
        self.session.system_prompt()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Endpoint and model name. The API key is not part of this view.
    pub fn config(&self) -> BackendInfo {
        self.backend.clone()
    }

    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    pub fn state(&self) -> ChatState {
        self.state
    }
}
