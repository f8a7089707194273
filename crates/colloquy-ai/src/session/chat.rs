//! The send path: build, request, integrate.

use tracing::{info, warn};

use crate::sequence::build_messages;
use crate::CompletionFailure;

use super::manager::ChatOrchestrator;
use super::types::{ChatState, StateGuard, Turn};

impl ChatOrchestrator {
    /// Send `input` with the current prompt and history and record the turn.
    ///
    /// Always appends exactly one turn. A backend failure becomes a degraded
    /// turn whose assistant text starts with
    /// [`DIAGNOSTIC_PREFIX`](super::DIAGNOSTIC_PREFIX); it is never returned
    /// as an error.
    pub async fn send_message(&mut self, input: impl Into<String>) -> Turn {
        let input = input.into();
        let mut state = StateGuard::enter(&mut self.state);

        let messages = build_messages(
            &self.session.system_prompt,
            &self.session.history,
            &input,
        );

        let call = self
            .client
            .complete(&messages, &self.backend.model_name, &self.options);
        let result = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or_else(|_| {
                    Err(CompletionFailure::new(format!(
                        "request timed out after {limit:?}"
                    )))
                }),
            None => call.await,
        };

        state.transition(ChatState::Integrating);
        let turn = match result {
            Ok(text) => Turn::new(input, text),
            Err(failure) => {
                warn!(cause = %failure, "completion failed, recording diagnostic turn");
                Turn::degraded(input, &failure)
            }
        };

        self.session.history.push(turn.clone());
        info!(turns = self.session.history.len(), "turn recorded");
        turn
    }
}
