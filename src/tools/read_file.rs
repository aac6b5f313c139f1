use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::PathBuf;

use super::{resolve_path, ToolResult};

pub(super) const NAME: &str = "read_file";
pub(super) const DESCRIPTION: &str = "Read and return the contents of a file";

pub(super) fn schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "file_path": {
                "type": "string",
                "description": "The path to the file to read"
            }
        },
        "required": ["file_path"]
    })
}

pub struct ReadFileTool {
    /// Relative paths are resolved against this directory.
    working_dir: PathBuf,
}

impl ReadFileTool {
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    pub fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: ReadFileInput = serde_json::from_value(input)?;
        if input.file_path.trim().is_empty() {
            return Ok(ToolResult::error(
                "read_file requires a non-empty file_path".into(),
            ));
        }

        let path = resolve_path(&self.working_dir, &input.file_path);
        let bytes = match std::fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                return Ok(ToolResult::error(format!(
                    "Failed to read {}: {}",
                    input.file_path, e
                )));
            }
        };

        match String::from_utf8(bytes) {
            Ok(text) => Ok(ToolResult::success(text)),
            Err(_) => Ok(ToolResult::error(format!(
                "File is not valid UTF-8: {}",
                input.file_path
            ))),
        }
    }
}

#[derive(Deserialize)]
struct ReadFileInput {
    file_path: String,
}
