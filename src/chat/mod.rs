//! Interactive chat REPL for kite.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). One [`Conversation`] lives for the whole
//! session and is sent in full with each completion request.

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::Path;

use crate::agent::{self, AgentError, AgentOutcome};
use crate::config::Config;
use crate::conversation::Conversation;
use crate::format;
use crate::message::Message;
use crate::output::{Renderer, TerminalRenderer};
use crate::provider::CompletionClient;
use crate::tools::ToolRegistry;

/// Runs the interactive chat REPL.
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/kite/history.txt` when the
///   cache directory is usable; otherwise the session runs without it
pub async fn run_chat(
    config: &Config,
    client: &dyn CompletionClient,
    tools: &ToolRegistry,
) -> Result<()> {
    let mut conversation = Conversation::new();
    let mut renderer = TerminalRenderer::new();

    println!(
        "{} [model: {}] (/help for commands, Ctrl+D to exit)",
        "kite chat".bold().cyan(),
        config.model.yellow(),
    );
    println!();

    // Set up readline with persistent history
    let mut rl = DefaultEditor::new()?;
    let history_path = match Config::history_path() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!(error = %e, "readline history disabled");
            None
        }
    };
    if let Some(path) = history_path.as_deref().filter(|p| p.exists()) {
        if let Err(e) = rl.load_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not load readline history");
        }
    }

    let mut fatal = None;
    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let flow = handle_line(
                    client,
                    &mut conversation,
                    tools,
                    &mut renderer,
                    config.max_rounds,
                    &line,
                )
                .await;
                if flow == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C (use /exit or Ctrl+D to quit)".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                fatal = Some(e);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if ensure_parent_dir(path) {
            if let Err(e) = rl.save_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not save readline history");
            }
        }
    }

    session_result(fatal)
}

/// A readline failure other than Ctrl+C/Ctrl+D ends the session as an error.
fn session_result(fatal: Option<ReadlineError>) -> Result<()> {
    match fatal {
        Some(e) => Err(anyhow::Error::new(e).context("reading input failed")),
        None => Ok(()),
    }
}

/// Whether the REPL keeps reading after a line.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Handles one line of input: a slash command, or a prompt for the model.
///
/// Whitespace is only trimmed to recognize blank lines and commands; a prompt
/// is stored exactly as typed.
async fn handle_line(
    client: &dyn CompletionClient,
    conversation: &mut Conversation,
    tools: &ToolRegistry,
    renderer: &mut dyn Renderer,
    max_rounds: usize,
    line: &str,
) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }

    match commands::handle_slash_command(line, conversation) {
        commands::CommandAction::Continue => return Flow::Continue,
        commands::CommandAction::Exit => {
            println!("{}", "goodbye.".dimmed());
            return Flow::Exit;
        }
        commands::CommandAction::Unknown(cmd) => {
            println!("{} Unknown command: {} (try /help)", "?".yellow(), cmd);
            return Flow::Continue;
        }
        commands::CommandAction::Prompt => {}
    }

    println!();
    match run_turn(client, conversation, tools, renderer, max_rounds, line).await {
        Ok(outcome) => {
            println!("{}", format::render_markdown_lite(&outcome.answer));
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
        }
    }
    println!();
    Flow::Continue
}

/// Creates the history file's directory, logging instead of failing.
fn ensure_parent_dir(path: &Path) -> bool {
    let Some(parent) = path.parent() else {
        return true;
    };
    match std::fs::create_dir_all(parent) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(path = %parent.display(), error = %e, "could not create history directory");
            false
        }
    }
}

/// Submits one user input and runs the agent loop on it.
///
/// On failure the conversation is rolled back to exactly what it was before
/// `input` arrived, so a failed turn leaves no trace in the history.
pub(crate) async fn run_turn(
    client: &dyn CompletionClient,
    conversation: &mut Conversation,
    tools: &ToolRegistry,
    renderer: &mut dyn Renderer,
    max_rounds: usize,
    input: &str,
) -> Result<AgentOutcome, AgentError> {
    let checkpoint = conversation.checkpoint();
    conversation.push(Message::user(input));

    let result = agent::run_agent_loop(client, conversation, tools, renderer, max_rounds).await;
    if let Err(ref e) = result {
        tracing::debug!(error = %e, "turn failed, rolling back");
        conversation.rollback(checkpoint);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Role, ToolCall};
    use crate::output::NullRenderer;
    use crate::provider::CompletionError;
    use crate::test_support::ScriptedClient;

    fn registry(dir: &tempfile::TempDir) -> ToolRegistry {
        ToolRegistry::with_builtins(dir.path().to_path_buf())
    }

    #[tokio::test]
    async fn test_successful_turns_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![
            Ok(Message::assistant("one")),
            Ok(Message::assistant("two")),
        ]);
        let mut conv = Conversation::new();
        let tools = registry(&dir);

        run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "first")
            .await
            .unwrap();
        let outcome = run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "second")
            .await
            .unwrap();

        assert_eq!(outcome.answer, "two");
        assert_eq!(conv.len(), 4);
        assert_eq!(conv.user_turns(), 2);
        // The second request saw the whole history.
        assert_eq!(client.requests()[1].len(), 3);
    }

    #[tokio::test]
    async fn test_failed_turn_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![
            Ok(Message::assistant("fine")),
            Err(CompletionError::NoChoices),
        ]);
        let mut conv = Conversation::new();
        let tools = registry(&dir);

        run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "first")
            .await
            .unwrap();
        let before = conv.clone();

        let err = run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "second").await;
        assert!(err.is_err());
        assert_eq!(conv, before);
    }

    #[tokio::test]
    async fn test_failure_after_tool_round_rolls_back_everything() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![
            Ok(Message::assistant_with_tools(
                None,
                vec![ToolCall::new("c1", "bash", r#"{"command":"echo hi"}"#)],
            )),
            Err(CompletionError::NoChoices),
        ]);
        let mut conv = Conversation::new();
        let before = conv.clone();

        let err = run_turn(&client, &mut conv, &registry(&dir), &mut NullRenderer, 5, "go").await;
        assert!(err.is_err());
        assert_eq!(conv, before);
        assert!(conv.is_empty());
    }

    #[tokio::test]
    async fn test_clear_then_fresh_conversation() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![
            Ok(Message::assistant("one")),
            Ok(Message::assistant("two")),
        ]);
        let mut conv = Conversation::new();
        let tools = registry(&dir);

        run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "first")
            .await
            .unwrap();
        commands::handle_slash_command("/clear", &mut conv);
        assert!(conv.is_empty());

        run_turn(&client, &mut conv, &tools, &mut NullRenderer, 5, "fresh")
            .await
            .unwrap();

        let second = &client.requests()[1];
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].role, Role::User);
        assert_eq!(second[0].text(), "fresh");
    }

    #[tokio::test]
    async fn test_path_style_prompt_reaches_model() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![Ok(Message::assistant("summary"))]);
        let mut conv = Conversation::new();
        let line = "/tmp/notes.txt summarize this file";

        let flow = handle_line(&client, &mut conv, &registry(&dir), &mut NullRenderer, 5, line).await;

        assert_eq!(flow, Flow::Continue);
        assert_eq!(client.request_count(), 1);
        assert_eq!(client.requests()[0][0].text(), line);
        assert_eq!(conv.len(), 2);
    }

    #[tokio::test]
    async fn test_prompt_stored_as_typed() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![Ok(Message::assistant("ok"))]);
        let mut conv = Conversation::new();
        let line = "  indented question  ";

        handle_line(&client, &mut conv, &registry(&dir), &mut NullRenderer, 5, line).await;

        assert_eq!(conv.messages()[0].text(), line);
    }

    #[tokio::test]
    async fn test_blank_and_command_lines_skip_model() {
        let dir = tempfile::tempdir().unwrap();
        let client = ScriptedClient::new(vec![]);
        let mut conv = Conversation::new();
        let tools = registry(&dir);

        let blank = handle_line(&client, &mut conv, &tools, &mut NullRenderer, 5, "   ").await;
        let unknown = handle_line(&client, &mut conv, &tools, &mut NullRenderer, 5, "/nope").await;
        let exit = handle_line(&client, &mut conv, &tools, &mut NullRenderer, 5, " /exit").await;

        assert_eq!(blank, Flow::Continue);
        assert_eq!(unknown, Flow::Continue);
        assert_eq!(exit, Flow::Exit);
        assert_eq!(client.request_count(), 0);
        assert!(conv.is_empty());
    }

    #[test]
    fn test_readline_failure_is_an_error() {
        assert!(session_result(None).is_ok());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "tty gone");
        let err = session_result(Some(ReadlineError::Io(io))).unwrap_err();
        assert!(err.to_string().contains("reading input failed"));
    }

    #[test]
    fn test_history_dir_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "").unwrap();

        assert!(!ensure_parent_dir(&blocker.join("kite").join("history.txt")));
        assert!(ensure_parent_dir(&dir.path().join("cache").join("history.txt")));
        assert!(dir.path().join("cache").is_dir());
    }
}
