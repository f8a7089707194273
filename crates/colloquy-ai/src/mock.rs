//! Scripted completion backend for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::{CompletionClient, CompletionFailure, CompletionOptions, OutboundMessage};

/// Replays queued results in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, CompletionFailure>>>,
    requests: Mutex<Vec<Vec<OutboundMessage>>>,
    models: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sleep this long before answering each call.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn reply(self, text: &str) -> Self {
        self.push(Ok(text.to_string()));
        self
    }

    pub(crate) fn fail(self, cause: &str) -> Self {
        self.push(Err(CompletionFailure::new(cause)));
        self
    }

    fn push(&self, result: Result<String, CompletionFailure>) {
        self.replies.lock().unwrap().push_back(result);
    }

    pub(crate) fn requests(&self) -> Vec<Vec<OutboundMessage>> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Vec<OutboundMessage> {
        self.requests().pop().unwrap_or_default()
    }

    pub(crate) fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        messages: &[OutboundMessage],
        model_name: &str,
        _options: &CompletionOptions,
    ) -> Result<String, CompletionFailure> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.models.lock().unwrap().push(model_name.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionFailure::new("no scripted reply left")))
    }
}
