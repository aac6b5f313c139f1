//! File loading and environment resolution for kite configuration.

use std::fs;
use std::path::Path;

use super::types::{Config, ConfigError, FileConfig};
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_ROUNDS, DEFAULT_MODEL, ENV_API_KEY, ENV_BASE_URL, ENV_DEBUG,
    ENV_MAX_ROUNDS, ENV_MODEL,
};

impl FileConfig {
    /// Reads `path` if it exists. A missing file is an empty config.
    pub(super) fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let mut config: FileConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        config.resolve_substitutions();
        Ok(config)
    }

    /// Resolve `{env:VAR_NAME}` patterns in string fields.
    fn resolve_substitutions(&mut self) {
        for field in [&mut self.api_key, &mut self.base_url, &mut self.model] {
            if let Some(value) = field {
                *value = resolve_str(value, |name| std::env::var(name).ok());
            }
        }
    }
}

/// Replace `{env:VAR}` with the environment variable value.
fn resolve_str(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("{env:") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 5..start + end];
            let value = lookup(var_name).unwrap_or_default();
            result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        } else {
            break;
        }
    }
    result
}

impl Config {
    /// Combine file settings with environment lookups.
    ///
    /// Precedence: environment > file > built-in defaults. Empty environment
    /// values count as unset.
    pub fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_key = env(ENV_API_KEY)
            .or(file.api_key.filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingApiKey(ENV_API_KEY))?;

        let base_url = env(ENV_BASE_URL)
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = env(ENV_MODEL)
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_rounds = match env(ENV_MAX_ROUNDS) {
            Some(raw) => parse_max_rounds(&raw)?,
            None => file.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
        };
        if max_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_rounds",
                value: "0".into(),
            });
        }

        let debug = match env(ENV_DEBUG) {
            Some(raw) => raw.trim() == "1",
            None => file.debug.unwrap_or(false),
        };

        Ok(Self {
            api_key,
            base_url,
            model,
            max_rounds,
            debug,
        })
    }
}

fn parse_max_rounds(raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidValue {
            key: ENV_MAX_ROUNDS,
            value: raw.to_string(),
        })
}
