//! Built-in tools and the registry that advertises and dispatches them.
//!
//! The tool set is closed: [`Tool`] has one variant per built-in, and the
//! [`ToolRegistry`] resolves names against that fixed list. Every dispatch
//! produces a [`ToolResult`]; failures never propagate past
//! [`ToolRegistry::dispatch`] because the model has to read them.

pub mod bash_tool;
pub mod read_file;
pub mod write_file;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use bash_tool::BashTool;
use read_file::ReadFileTool;
use write_file::WriteFileTool;

use crate::message::ToolCall;

/// The result of executing a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(content: String) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Text sent back to the model in the `tool` message.
    pub fn to_message_content(&self) -> String {
        if self.is_error {
            format!("Error: {}", self.content)
        } else {
            self.content.clone()
        }
    }
}

/// Definition sent to the LLM so it knows what tools are available.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value, // JSON Schema
}

/// One of the built-in capabilities.
pub enum Tool {
    ReadFile(ReadFileTool),
    WriteFile(WriteFileTool),
    Bash(BashTool),
}

impl Tool {
    /// Unique name the LLM uses to call this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Tool::ReadFile(_) => read_file::NAME,
            Tool::WriteFile(_) => write_file::NAME,
            Tool::Bash(_) => bash_tool::NAME,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::ReadFile(_) => read_file::DESCRIPTION,
            Tool::WriteFile(_) => write_file::DESCRIPTION,
            Tool::Bash(_) => bash_tool::DESCRIPTION,
        }
    }

    /// JSON Schema describing the tool's input parameters.
    pub fn schema(&self) -> Value {
        match self {
            Tool::ReadFile(_) => read_file::schema(),
            Tool::WriteFile(_) => write_file::schema(),
            Tool::Bash(_) => bash_tool::schema(),
        }
    }

    /// Execute the tool with already-parsed JSON input.
    ///
    /// `Err` means the input did not fit the schema or the capability hit an
    /// unexpected fault; the registry turns it into an error result.
    pub async fn execute(&self, input: Value) -> Result<ToolResult> {
        match self {
            Tool::ReadFile(t) => t.execute(input),
            Tool::WriteFile(t) => t.execute(input),
            Tool::Bash(t) => t.execute(input).await,
        }
    }
}

/// Holds all registered tools and dispatches calls by name.
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Create a registry with all built-in tools.
    ///
    /// Relative paths and `bash` commands resolve against `working_dir`.
    pub fn with_builtins(working_dir: PathBuf) -> Self {
        Self {
            tools: vec![
                Tool::ReadFile(ReadFileTool::new(working_dir.clone())),
                Tool::WriteFile(WriteFileTool::new(working_dir.clone())),
                Tool::Bash(BashTool::new(working_dir)),
            ],
        }
    }

    /// Produce definitions for the LLM (sent in the API request).
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.schema(),
            })
            .collect()
    }

    pub fn resolve(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Parse, resolve and execute one tool call.
    ///
    /// Never fails: bad JSON, unknown names and capability faults all come
    /// back as error results.
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let raw = if call.arguments.trim().is_empty() {
            "{}"
        } else {
            call.arguments.as_str()
        };
        let input: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(tool = %call.name, error = %e, "invalid tool arguments");
                return ToolResult::error(format!(
                    "Invalid arguments JSON for '{}': {}",
                    call.name, e
                ));
            }
        };

        let Some(tool) = self.resolve(&call.name) else {
            tracing::debug!(tool = %call.name, "unknown tool requested");
            return ToolResult::error(format!("Unknown tool: {}", call.name));
        };

        match tool.execute(input).await {
            Ok(result) => result,
            Err(e) => ToolResult::error(format!("{} failed: {}", call.name, e)),
        }
    }
}

/// Resolve a tool-supplied path: absolute paths as-is, relative ones against
/// the registry's working directory.
fn resolve_path(working_dir: &Path, path: &str) -> PathBuf {
    let candidate = Path::new(path);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        working_dir.join(candidate)
    }
}
