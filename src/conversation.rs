//! In-memory conversation store.
//!
//! A [`Conversation`] is an ordered, append-only list of [`Message`]s owned by
//! the session driver and lent to the agent loop. Besides appending, only two
//! mutations exist: [`Conversation::clear`] for `/clear` and
//! [`Conversation::rollback`] for undoing a failed turn.

use crate::message::{Message, Role};

/// Position in the store captured before a turn, used to undo it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drops the entire history.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.messages.len())
    }

    /// Removes everything appended after `checkpoint`.
    ///
    /// Covers the pending user message as well as any assistant and tool
    /// messages a failed run left behind.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.messages.truncate(checkpoint.0);
    }

    /// Number of user turns in the history.
    pub fn user_turns(&self) -> usize {
        self.messages.iter().filter(|m| m.role == Role::User).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ToolCall;

    #[test]
    fn test_rollback_restores_previous_state() {
        let mut conv = Conversation::new();
        conv.push(Message::user("first"));
        conv.push(Message::assistant("answer"));
        let before = conv.clone();

        let cp = conv.checkpoint();
        conv.push(Message::user("second"));
        conv.push(Message::assistant_with_tools(
            None,
            vec![ToolCall::new("c1", "read_file", "{}")],
        ));
        conv.push(Message::tool_result("c1", "Error: boom"));
        conv.rollback(cp);

        assert_eq!(conv, before);
    }

    #[test]
    fn test_clear_empties_store() {
        let mut conv = Conversation::new();
        conv.push(Message::user("hi"));
        conv.push(Message::assistant("hello"));
        conv.clear();
        assert!(conv.is_empty());
        assert_eq!(conv.user_turns(), 0);
    }
}
