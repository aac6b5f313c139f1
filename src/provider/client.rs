//! HTTP client for OpenAI-compatible chat-completions endpoints.

use async_trait::async_trait;
use reqwest::Client;

use super::wire::{build_request, parse_response};
use super::{CompletionClient, CompletionError};
use crate::config::Config;
use crate::constants::{HTTP_REFERER, HTTP_TITLE};
use crate::message::Message;
use crate::tools::ToolDefinition;

/// A configured endpoint ready to handle completion requests.
///
/// Holds the base URL, API key and model. One instance serves every round of
/// every turn in a session.
pub struct ChatCompletionsClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatCompletionsClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<Message, CompletionError> {
        let request = build_request(&self.model, messages, tools);
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", HTTP_REFERER)
            .header("X-Title", HTTP_TITLE)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status { status, body });
        }

        let message = parse_response(&body)?;
        tracing::debug!(
            tool_calls = message.tool_calls.len(),
            has_content = message.content.is_some(),
            "received completion"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let config = Config {
            api_key: "k".into(),
            base_url: "http://localhost:8080/v1/".into(),
            model: "m".into(),
            max_rounds: 1,
            debug: false,
        };
        let client = ChatCompletionsClient::from_config(&config);
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
