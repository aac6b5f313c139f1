//! Bash tool: runs a command as a child process.
//!
//! The command string is split on whitespace and executed directly, without a
//! shell. There is no quoting or escaping: `echo "a b"` runs `echo` with the
//! two arguments `"a` and `b"`. Pipes, redirects and globs are not expanded.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::Stdio;

use super::ToolResult;

use crate::constants::BASH_STRIPPED_ENV_VARS;

pub(super) const NAME: &str = "bash";
pub(super) const DESCRIPTION: &str =
    "Execute a command and return its standard output. The command is split on whitespace and run without a shell.";

pub(super) fn schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "command": {
                "type": "string",
                "description": "The command to execute"
            }
        },
        "required": ["command"]
    })
}

/// Tool that executes commands in a child process.
///
/// The working directory is the registry's working directory and sensitive
/// environment variables are stripped from the child.
pub struct BashTool {
    working_dir: PathBuf,
}

impl BashTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    pub async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: BashInput = serde_json::from_value(input)?;

        let argv = split_command(&input.command);
        let Some((program, args)) = argv.split_first() else {
            return Ok(ToolResult::error("bash requires a non-empty command".into()));
        };

        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args);
        cmd.current_dir(&self.working_dir);
        cmd.stdin(Stdio::null());

        for var in BASH_STRIPPED_ENV_VARS {
            cmd.env_remove(var);
        }

        tracing::debug!(program = %program, args = ?args, "spawning command");

        let output = match cmd.output().await {
            Ok(o) => o,
            Err(e) => {
                return Ok(ToolResult::error(format!(
                    "Failed to execute command `{}`: {}",
                    program, e
                )));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            return Ok(ToolResult::success(stdout.into_owned()));
        }

        let code = output.status.code().unwrap_or(-1);
        let mut text = format!("Exit code: {}", code);
        if !stdout.is_empty() {
            text.push('\n');
            text.push_str(stdout.trim_end());
        }
        if !stderr.is_empty() {
            text.push_str("\n--- stderr ---\n");
            text.push_str(stderr.trim_end());
        }
        Ok(ToolResult::error(text))
    }
}

#[derive(Deserialize)]
struct BashInput {
    command: String,
}

/// Naive argv split: whitespace only, no quoting.
fn split_command(command: &str) -> Vec<&str> {
    command.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::split_command;

    #[test]
    fn test_split_ignores_quotes() {
        assert_eq!(
            split_command(r#"echo "a b"  c"#),
            vec!["echo", "\"a", "b\"", "c"]
        );
    }

    #[test]
    fn test_split_blank_is_empty() {
        assert!(split_command("   \t ").is_empty());
    }
}
