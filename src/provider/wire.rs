//! Chat-completions wire format.
//!
//! Converts kite's [`Message`] and [`ToolDefinition`] types to the
//! OpenAI-compatible request body and decodes the response back into an
//! assistant [`Message`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CompletionError;
use crate::message::{Message, Role, ToolCall};
use crate::tools::ToolDefinition;

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WireMessage {
    pub role: Role,
    /// Serialized as `null` for pure tool-calling assistant turns.
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct WireTool<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: &'a ToolDefinition,
}

fn function_type() -> String {
    "function".to_string()
}

/// Builds the request body for one completion.
pub fn build_request<'a>(
    model: &'a str,
    messages: &[Message],
    tools: &'a [ToolDefinition],
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: messages.iter().map(to_wire).collect(),
        tools: tools
            .iter()
            .map(|function| WireTool {
                kind: "function",
                function,
            })
            .collect(),
    }
}

fn to_wire(msg: &Message) -> WireMessage {
    WireMessage {
        role: msg.role,
        content: msg.content.clone(),
        tool_calls: msg
            .tool_calls
            .iter()
            .map(|tc| WireToolCall {
                id: tc.id.clone(),
                kind: function_type(),
                function: WireFunction {
                    name: tc.name.clone(),
                    arguments: tc.arguments.clone(),
                },
            })
            .collect(),
        tool_call_id: msg.tool_call_id.clone(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

/// Decodes a response body into the assistant message of its first choice.
pub fn parse_response(body: &str) -> Result<Message, CompletionError> {
    let response: ChatResponse = serde_json::from_str(body)?;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::NoChoices)?;

    let content = choice.message.content.and_then(normalize_content);
    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall::new(tc.id, tc.function.name, tc.function.arguments))
        .collect();

    Ok(Message::assistant_with_tools(content, tool_calls))
}

/// Flattens the `content` field, which providers send either as a string or
/// as an array of parts.
fn normalize_content(content: Value) -> Option<String> {
    match content {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(parts) => Some(parts.into_iter().map(part_text).collect()),
        other => Some(other.to_string()),
    }
}

fn part_text(part: Value) -> String {
    if let Some(text) = part.get("text").and_then(Value::as_str) {
        return text.to_string();
    }
    match part {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
