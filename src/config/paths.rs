//! Where kite keeps its files on disk.
//!
//! Both locations follow the platform conventions from [`dirs`]: settings
//! under the config dir, readline history under the cache dir.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::types::Config;
use crate::constants::{APP_NAME, CONFIG_FILENAME, HISTORY_FILENAME};

fn app_subdir(base: Option<PathBuf>, kind: &str) -> Result<PathBuf> {
    base.map(|dir| dir.join(APP_NAME))
        .with_context(|| format!("could not determine the {} directory", kind))
}

impl Config {
    /// `~/.config/kite/config.toml` on Linux.
    ///
    /// # Errors
    ///
    /// Fails when the platform has no config directory (no home directory).
    pub fn config_path() -> Result<PathBuf> {
        Ok(app_subdir(dirs::config_dir(), "config")?.join(CONFIG_FILENAME))
    }

    /// Readline history file, `~/.cache/kite/history.txt` on Linux.
    pub fn history_path() -> Result<PathBuf> {
        Ok(app_subdir(dirs::cache_dir(), "cache")?.join(HISTORY_FILENAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_subdir_appends_name() {
        let dir = app_subdir(Some(PathBuf::from("/tmp/base")), "config").unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/base/kite"));
    }

    #[test]
    fn test_app_subdir_missing_base() {
        let err = app_subdir(None, "cache").unwrap_err();
        assert!(err.to_string().contains("cache directory"));
    }
}
