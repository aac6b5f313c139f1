//! Configuration types and loading for kite.
//!
//! Settings come from environment variables (a `.env` file is loaded first by
//! `main`), then an optional TOML file at the platform's XDG config path
//! (e.g. `~/.config/kite/config.toml` on Linux), then built-in defaults.

mod loader;
mod paths;
mod types;

pub use types::{Config, FileConfig};

use anyhow::Result;

impl Config {
    /// Load config with precedence: environment > config file > defaults.
    ///
    /// # Errors
    ///
    /// Fails when no API key is configured, when a value does not parse, or
    /// when the config file exists but cannot be read.
    pub fn load() -> Result<Self> {
        let file = FileConfig::load_from(&Self::config_path()?)?;
        let config = Self::resolve(file, |key| std::env::var(key).ok())?;
        Ok(config)
    }
}
