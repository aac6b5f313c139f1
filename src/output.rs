//! Output rendering abstraction for kite.
//!
//! Defines the [`Renderer`] trait that decouples agent-loop progress from the
//! display layer. [`TerminalRenderer`] echoes tool activity to stderr so that
//! stdout carries only the final answer.

use colored::Colorize;

use crate::constants::TOOL_PREVIEW_CHARS;
use crate::tools::ToolResult;

/// Receives progress events from the agent loop.
pub trait Renderer {
    /// Called before a tool call is dispatched.
    fn tool_start(&mut self, name: &str, arguments: &str);

    /// Called after a tool call produced its result.
    fn tool_result(&mut self, name: &str, result: &ToolResult);
}

/// Renders tool activity to stderr.
#[derive(Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for TerminalRenderer {
    fn tool_start(&mut self, name: &str, arguments: &str) {
        eprintln!(
            "{} {} {}",
            "→".cyan(),
            name.bold(),
            preview(arguments).dimmed()
        );
    }

    fn tool_result(&mut self, name: &str, result: &ToolResult) {
        if result.is_error {
            eprintln!(
                "  {} {} {}",
                "✗".red(),
                name,
                preview(&result.content).red()
            );
        } else {
            let lines = result.content.lines().count();
            eprintln!(
                "  {} {} {}",
                "✓".green(),
                name,
                format!("({} lines)", lines).dimmed()
            );
        }
    }
}

/// First line of `text`, capped at [`TOOL_PREVIEW_CHARS`] characters.
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    if first.chars().count() > TOOL_PREVIEW_CHARS {
        let truncated: String = first.chars().take(TOOL_PREVIEW_CHARS).collect();
        format!("{}...", truncated)
    } else {
        first.to_string()
    }
}

/// Discards every event.
#[cfg(test)]
pub struct NullRenderer;

#[cfg(test)]
impl Renderer for NullRenderer {
    fn tool_start(&mut self, _name: &str, _arguments: &str) {}
    fn tool_result(&mut self, _name: &str, _result: &ToolResult) {}
}

#[cfg(test)]
mod tests {
    use super::preview;

    #[test]
    fn test_preview_first_line_only() {
        assert_eq!(preview("one\ntwo"), "one");
        assert_eq!(preview(""), "");
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(500);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), super::TOOL_PREVIEW_CHARS + 3);
    }
}
