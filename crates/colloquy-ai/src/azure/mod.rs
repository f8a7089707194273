//! Azure AI model-inference client.
//!
//! Implements [`CompletionClient`](crate::CompletionClient) against the
//! chat-completions route of an Azure AI inference endpoint
//! (`{endpoint}/chat/completions?api-version=2024-05-01-preview`).

mod api;
mod client;


pub use client::{AzureInferenceClient, API_VERSION, DEFAULT_TOTAL_TIMEOUT};
