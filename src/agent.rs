//! The agent loop: completion requests alternating with tool dispatch.
//!
//! [`run_agent_loop`] drives a small state machine over a borrowed
//! [`Conversation`]:
//!
//! ```text
//! AwaitingCompletion ──(no tool calls)──────────────▶ Terminal(answer)
//!        │   ▲
//!        │   └──────(all calls answered)── DispatchingTools
//!        └──(tool calls)──────────────────────▶
//! ```
//!
//! Client failures end the run without appending anything. Tool failures
//! never end the run; they become `tool` messages the model can react to.
//! The number of completion requests is capped by `max_rounds`, and tool
//! calls requested in the last allowed round are never executed.

use thiserror::Error;

use crate::conversation::Conversation;
use crate::message::{Message, ToolCall};
use crate::output::Renderer;
use crate::provider::{CompletionClient, CompletionError};
use crate::tools::ToolRegistry;

/// Why a run could not produce an answer.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("no final answer after {0} rounds; the model kept requesting tools")]
    MaxRoundsExceeded(usize),
}

/// A successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOutcome {
    /// Content of the final assistant message (`""` when it had none).
    pub answer: String,
    /// Completion requests made, including the final one.
    pub rounds: usize,
}

enum LoopState {
    AwaitingCompletion,
    DispatchingTools(Vec<ToolCall>),
    Terminal(Result<String, AgentError>),
}

/// Runs the loop until the assistant answers without requesting tools.
///
/// Expects the caller to have appended the user message already. Every
/// assistant and tool message produced along the way is appended to
/// `conversation`; on error those stay in place and the caller decides
/// whether to roll back.
pub async fn run_agent_loop(
    client: &dyn CompletionClient,
    conversation: &mut Conversation,
    tools: &ToolRegistry,
    renderer: &mut dyn Renderer,
    max_rounds: usize,
) -> Result<AgentOutcome, AgentError> {
    let definitions = tools.definitions();
    let mut rounds = 0;
    let mut state = LoopState::AwaitingCompletion;

    loop {
        state = match state {
            LoopState::AwaitingCompletion => {
                if rounds >= max_rounds {
                    tracing::warn!(max_rounds, "round limit reached");
                    LoopState::Terminal(Err(AgentError::MaxRoundsExceeded(max_rounds)))
                } else {
                    rounds += 1;
                    tracing::debug!(round = rounds, "requesting completion");
                    match client.complete(conversation.messages(), &definitions).await {
                        Err(e) => {
                            tracing::debug!(error = %e, "completion failed");
                            LoopState::Terminal(Err(e.into()))
                        }
                        Ok(reply) => next_state(conversation, reply, rounds, max_rounds),
                    }
                }
            }
            LoopState::DispatchingTools(calls) => {
                for call in &calls {
                    tracing::debug!(tool = %call.name, id = %call.id, "dispatching tool call");
                    renderer.tool_start(&call.name, &call.arguments);
                    let result = tools.dispatch(call).await;
                    renderer.tool_result(&call.name, &result);
                    conversation.push(Message::tool_result(
                        call.id.clone(),
                        result.to_message_content(),
                    ));
                }
                LoopState::AwaitingCompletion
            }
            LoopState::Terminal(outcome) => {
                return outcome.map(|answer| AgentOutcome { answer, rounds });
            }
        };
    }
}

/// Appends the assistant reply and decides whether the run is over.
///
/// A reply that requests tools on the last allowed round ends the run before
/// any of them execute, and is not appended: its calls would go unanswered.
fn next_state(
    conversation: &mut Conversation,
    reply: Message,
    rounds: usize,
    max_rounds: usize,
) -> LoopState {
    if reply.has_tool_calls() && rounds >= max_rounds {
        tracing::warn!(
            max_rounds,
            calls = reply.tool_calls.len(),
            "round limit reached, tool calls not run"
        );
        LoopState::Terminal(Err(AgentError::MaxRoundsExceeded(max_rounds)))
    } else if reply.has_tool_calls() {
        let calls = reply.tool_calls.clone();
        conversation.push(reply);
        LoopState::DispatchingTools(calls)
    } else {
        let answer = reply.text().to_string();
        conversation.push(reply);
        LoopState::Terminal(Ok(answer))
    }
}
