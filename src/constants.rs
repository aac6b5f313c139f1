//! Centralized constants for kite.
//!
//! All magic numbers, default strings, and configuration constants live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "kite";

/// Default chat-completions endpoint (OpenRouter, OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default LLM model identifier.
pub const DEFAULT_MODEL: &str = "anthropic/claude-haiku-4.5";

/// Default upper bound on completion requests per agent-loop run.
pub const DEFAULT_MAX_ROUNDS: usize = 25;

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Readline history filename.
pub const HISTORY_FILENAME: &str = "history.txt";

// --- Environment variables ---

/// API key for the completion service (required).
pub const ENV_API_KEY: &str = "OPENROUTER_API_KEY";

/// Override for the completion service base URL.
pub const ENV_BASE_URL: &str = "OPENROUTER_BASE_URL";

/// Override for the model identifier.
pub const ENV_MODEL: &str = "KITE_MODEL";

/// Override for the round guard.
pub const ENV_MAX_ROUNDS: &str = "KITE_MAX_ROUNDS";

/// Set to `1` to enable debug diagnostics on stderr.
pub const ENV_DEBUG: &str = "DEBUG";

// --- HTTP ---

/// Attribution headers sent to OpenRouter.
pub const HTTP_REFERER: &str = "https://github.com/kite-cli/kite";
pub const HTTP_TITLE: &str = "kite";

// --- Tool limits ---

/// Environment variables removed from `bash` child processes.
pub const BASH_STRIPPED_ENV_VARS: &[&str] = &[ENV_API_KEY, "OPENAI_API_KEY", "ANTHROPIC_API_KEY"];

/// Maximum characters of a tool result echoed to the terminal.
pub const TOOL_PREVIEW_CHARS: usize = 120;
