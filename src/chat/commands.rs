//! Slash command handlers for the chat REPL.
//!
//! Dispatches `/exit`, `/clear`, `/history` and `/help`. Returns a
//! [`CommandAction`] so the REPL loop can decide how to proceed. A line is a
//! command only when its first word is one; `/tmp/notes.txt summarize this`
//! is an ordinary prompt.

use colored::Colorize;

use crate::conversation::Conversation;
use crate::format;

/// Action returned by slash command handling.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommandAction {
    /// Command was handled; keep reading input.
    Continue,
    /// Leave the REPL.
    Exit,
    /// Unknown command was entered.
    Unknown(String),
    /// Not a command; send the line to the model.
    Prompt,
}

/// Dispatch and handle a slash command.
pub(crate) fn handle_slash_command(line: &str, conversation: &mut Conversation) -> CommandAction {
    let mut words = line.split_whitespace();
    let Some(command) = words.next().filter(|w| w.starts_with('/')) else {
        return CommandAction::Prompt;
    };
    let single_word = words.next().is_none();

    match command {
        "/exit" | "/quit" => CommandAction::Exit,
        "/clear" => {
            conversation.clear();
            tracing::debug!("conversation cleared");
            println!("{}", "History cleared.".dimmed());
            CommandAction::Continue
        }
        "/history" => {
            if conversation.is_empty() {
                println!("{}", "No messages yet.".dimmed());
                return CommandAction::Continue;
            }
            println!(
                "{}",
                format!(
                    "{} messages, {} user turns",
                    conversation.len(),
                    conversation.user_turns()
                )
                .dimmed()
            );
            println!();
            for msg in conversation.messages() {
                println!("{}", format::format_message(msg));
                println!();
            }
            CommandAction::Continue
        }
        "/help" => {
            print_help();
            CommandAction::Continue
        }
        // A lone `/word` is a mistyped command; anything longer, or a path
        // like `/etc/hosts`, is a prompt.
        _ if single_word && !command[1..].contains('/') => {
            CommandAction::Unknown(command.to_string())
        }
        _ => CommandAction::Prompt,
    }
}

pub(crate) fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {} - show conversation history", "/history".cyan());
    println!("  {} - clear conversation", "/clear".cyan());
    println!("  {} - show this help", "/help".cyan());
    println!("  {} - exit (or Ctrl+D)", "/exit".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[test]
    fn test_clear_empties_conversation() {
        let mut conv = Conversation::new();
        conv.push(Message::user("a"));
        conv.push(Message::assistant("b"));
        assert_eq!(handle_slash_command("/clear", &mut conv), CommandAction::Continue);
        assert!(conv.is_empty());
    }

    #[test]
    fn test_exit_aliases() {
        let mut conv = Conversation::new();
        assert_eq!(handle_slash_command("/exit", &mut conv), CommandAction::Exit);
        assert_eq!(handle_slash_command("/quit", &mut conv), CommandAction::Exit);
    }

    #[test]
    fn test_help_and_history_leave_state_alone() {
        let mut conv = Conversation::new();
        conv.push(Message::user("a"));
        let before = conv.clone();
        assert_eq!(handle_slash_command("/help", &mut conv), CommandAction::Continue);
        assert_eq!(handle_slash_command("/history", &mut conv), CommandAction::Continue);
        assert_eq!(conv, before);
    }

    #[test]
    fn test_path_prompts_are_not_commands() {
        let mut conv = Conversation::new();
        assert_eq!(
            handle_slash_command("/tmp/notes.txt summarize this file", &mut conv),
            CommandAction::Prompt
        );
        assert_eq!(handle_slash_command("/etc/hosts", &mut conv), CommandAction::Prompt);
        assert_eq!(
            handle_slash_command("/why is this slow?", &mut conv),
            CommandAction::Prompt
        );
        assert_eq!(handle_slash_command("hello /exit", &mut conv), CommandAction::Prompt);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        let mut conv = Conversation::new();
        assert_eq!(handle_slash_command("  /exit  ", &mut conv), CommandAction::Exit);
    }

    #[test]
    fn test_unknown_command() {
        let mut conv = Conversation::new();
        assert_eq!(
            handle_slash_command("/frobnicate", &mut conv),
            CommandAction::Unknown("/frobnicate".into())
        );
    }
}
