//! Test doubles shared across modules.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::message::Message;
use crate::provider::{CompletionClient, CompletionError};
use crate::tools::ToolDefinition;

/// A [`CompletionClient`] that replays canned replies in order and records
/// every conversation it was asked to complete.
pub struct ScriptedClient {
    replies: Mutex<VecDeque<Result<Message, CompletionError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    pub fn new(replies: Vec<Result<Message, CompletionError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Snapshots of the conversation passed to each `complete` call.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(
        &self,
        messages: &[Message],
        _tools: &[ToolDefinition],
    ) -> Result<Message, CompletionError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(CompletionError::NoChoices))
    }
}
