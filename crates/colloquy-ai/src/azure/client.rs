//! Azure inference client struct, request building, and response parsing.

use std::time::Duration;

use colloquy_config::BackendConfig;
use serde::{Deserialize, Serialize};

use crate::{CompletionFailure, CompletionOptions, OutboundMessage};

pub const API_VERSION: &str = "2024-05-01-preview";
const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
/// Error bodies are cut to this many characters before reaching the cause.
const ERROR_BODY_LIMIT: usize = 200;
/// Total HTTP timeout when the caller sets no deadline of its own.
pub const DEFAULT_TOTAL_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions client bound to one endpoint and credential.
pub struct AzureInferenceClient {
    pub(crate) config: BackendConfig,
    pub(crate) http: reqwest::Client,
    pub(crate) url: String,
    pub(crate) total_timeout: Duration,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [OutboundMessage],
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl AzureInferenceClient {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_total_timeout(config, DEFAULT_TOTAL_TIMEOUT)
    }

    /// Build a client whose HTTP total timeout is `total_timeout`.
    ///
    /// Callers that enforce their own per-request deadline should pass that
    /// same deadline here, so the transport never gives up first.
    pub fn with_total_timeout(config: BackendConfig, total_timeout: Duration) -> Self {
        let url = format!(
            "{}{CHAT_COMPLETIONS_PATH}",
            config.endpoint.trim_end_matches('/')
        );
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(10))
                .timeout(total_timeout)
                .build()
                .unwrap_or_default(),
            url,
            total_timeout,
        }
    }

    pub fn total_timeout(&self) -> Duration {
        self.total_timeout
    }

    /// Full chat-completions URL, without the `api-version` query.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn build_request_body<'a>(
        messages: &'a [OutboundMessage],
        model_name: &'a str,
        options: &CompletionOptions,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: model_name,
            messages,
            max_tokens: options.max_output_tokens,
            temperature: options.temperature,
        }
    }

    pub(crate) fn build_request(
        &self,
        messages: &[OutboundMessage],
        model_name: &str,
        options: &CompletionOptions,
    ) -> reqwest::RequestBuilder {
        let body = Self::build_request_body(messages, model_name, options);
        self.http
            .post(&self.url)
            .query(&[("api-version", API_VERSION)])
            .header("api-key", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .json(&body)
    }

    /// Extract the first choice's text from a response body.
    pub(crate) fn parse_response(body: &str) -> Result<String, CompletionFailure> {
        let response: ChatResponse = serde_json::from_str(body)
            .map_err(|e| CompletionFailure::new(format!("malformed response: {e}")))?;

        let first = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionFailure::new("response contained no choices"))?;

        match first.message.content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(CompletionFailure::new("response contained no message content")),
        }
    }

    /// Describe a transport failure with its kind and full source chain.
    pub(crate) fn describe_send_error(&self, error: &reqwest::Error) -> String {
        let kind = if error.is_timeout() {
            format!("request timed out after {:?}", self.total_timeout)
        } else if error.is_connect() {
            "connection failed".to_string()
        } else {
            "request failed".to_string()
        };

        let mut cause = format!("{kind}: {error}");
        let mut source = std::error::Error::source(error);
        while let Some(inner) = source {
            cause.push_str(&format!(": {inner}"));
            source = std::error::Error::source(inner);
        }
        cause
    }

    pub(crate) fn truncate_error_body(body: &str) -> String {
        body.chars().take(ERROR_BODY_LIMIT).collect()
    }
}
