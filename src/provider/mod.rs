//! Completion service abstraction for kite.
//!
//! The agent loop only sees the [`CompletionClient`] trait: hand it the
//! conversation and the tool definitions, get back one assistant message.
//! [`ChatCompletionsClient`] implements it over HTTP for any
//! OpenAI-compatible endpoint (OpenRouter by default).

mod client;
pub mod wire;

pub use client::ChatCompletionsClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::message::Message;
use crate::tools::ToolDefinition;

/// Failure to obtain a completion. Always fatal to the current turn.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no choices in response")]
    NoChoices,
}

/// Produces one assistant message for a conversation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Requests a single completion.
    ///
    /// The returned message always has [`Role::Assistant`](crate::message::Role::Assistant).
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Message, CompletionError>;
}
