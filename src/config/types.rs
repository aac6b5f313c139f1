//! Struct definitions for kite configuration.

use serde::Deserialize;
use thiserror::Error;

/// Fully resolved runtime configuration.
///
/// Built once at startup by [`Config::load`](super::Config::load) and then
/// only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token for the completion service.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API, without `/chat/completions`.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Maximum completion requests per agent-loop run.
    pub max_rounds: usize,
    /// Enables debug-level diagnostics.
    pub debug: bool,
}

/// Optional settings read from `config.toml`.
///
/// Every field may be omitted; environment variables take precedence.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub max_rounds: Option<usize>,
    pub debug: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
