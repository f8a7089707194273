//! CompletionClient trait implementation for AzureInferenceClient.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{CompletionClient, CompletionFailure, CompletionOptions, OutboundMessage};

use super::client::AzureInferenceClient;

#[async_trait]
impl CompletionClient for AzureInferenceClient {
    async fn complete(
        &self,
        messages: &[OutboundMessage],
        model_name: &str,
        options: &CompletionOptions,
    ) -> Result<String, CompletionFailure> {
        debug!(
            model = %model_name,
            messages = messages.len(),
            "Azure inference request"
        );

        let response = self
            .build_request(messages, model_name, options)
            .send()
            .await
            .map_err(|e| CompletionFailure::new(self.describe_send_error(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = Self::truncate_error_body(&text);
            warn!(%status, "Azure inference returned an error status");
            return Err(CompletionFailure::new(format!("HTTP {status}: {text}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CompletionFailure::new(format!("failed to read response: {e}")))?;

        Self::parse_response(&body)
    }
}
