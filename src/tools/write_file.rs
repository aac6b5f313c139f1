//! Write-file tool: writes content to a file, creating parent directories as needed.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

use super::{resolve_path, ToolResult};

pub(super) const NAME: &str = "write_file";
pub(super) const DESCRIPTION: &str =
    "Write content to a file, replacing it if it exists. Creates parent directories as needed.";

pub(super) fn schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "file_path": {
                "type": "string",
                "description": "The path of the file to write"
            },
            "content": {
                "type": "string",
                "description": "The content to write to the file"
            }
        },
        "required": ["file_path", "content"]
    })
}

/// Tool that writes string content to a file.
///
/// Existing files are overwritten. Missing parent directories are created.
pub struct WriteFileTool {
    /// Relative paths are resolved against this directory.
    working_dir: PathBuf,
}

impl WriteFileTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// # Errors
    ///
    /// Returns an error only when `input` lacks `file_path` or `content`;
    /// filesystem failures are reported as error results.
    pub fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: WriteFileInput = serde_json::from_value(input)?;
        if input.file_path.trim().is_empty() {
            return Ok(ToolResult::error(
                "write_file requires a non-empty file_path".into(),
            ));
        }

        let path = resolve_path(&self.working_dir, &input.file_path);
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return Ok(ToolResult::error(format!(
                    "Failed to create parent directory for {}: {}",
                    input.file_path, e
                )));
            }
        }

        if let Err(e) = fs::write(&path, &input.content) {
            return Ok(ToolResult::error(format!(
                "Failed to write {}: {}",
                input.file_path, e
            )));
        }

        Ok(ToolResult::success(format!(
            "Wrote {} bytes to {}",
            input.content.len(),
            input.file_path
        )))
    }
}

#[derive(Deserialize)]
struct WriteFileInput {
    file_path: String,
    content: String,
}
