//! Session value types and the request state guard.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::CompletionFailure;

/// Marker that starts every locally generated diagnostic reply.
pub const DIAGNOSTIC_PREFIX: &str = "An error occurred: ";

/// One completed user/assistant exchange.
///
/// Both sides are set together at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    user: String,
    assistant: String,
    #[serde(skip)]
    degraded: bool,
}

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
            degraded: false,
        }
    }

    /// A turn whose assistant side explains a failed backend call.
    pub fn degraded(user: impl Into<String>, failure: &CompletionFailure) -> Self {
        Self {
            user: user.into(),
            assistant: format!("{DIAGNOSTIC_PREFIX}{}", failure.cause()),
            degraded: true,
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }

    /// Whether the assistant side was generated locally after a failure.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Conversation state: ordered history plus the prompt for the next request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(super) history: Vec<Turn>,
    pub(super) system_prompt: String,
}

impl Session {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            history: Vec::new(),
            system_prompt: system_prompt.into(),
        }
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

/// Credential-free view of the backend a session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    pub endpoint: String,
    pub model_name: String,
}

/// Where a session is within one `send_message` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatState {
    #[default]
    Idle,
    Requesting,
    Integrating,
}

impl fmt::Display for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Integrating => "integrating",
        };
        f.write_str(name)
    }
}

/// Drives state transitions for one send and puts the session back to
/// `Idle` on drop, including when the send future is cancelled.
pub(super) struct StateGuard<'a> {
    state: &'a mut ChatState,
}

impl<'a> StateGuard<'a> {
    pub(super) fn enter(state: &'a mut ChatState) -> Self {
        let mut guard = Self { state };
        guard.transition(ChatState::Requesting);
        guard
    }

    pub(super) fn transition(&mut self, next: ChatState) {
        debug!(from = %self.state, to = %next, "chat state transition");
        *self.state = next;
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if *self.state != ChatState::Idle {
            self.transition(ChatState::Idle);
        }
    }
}
