//! Configuration module
//!
//! This module handles configuration management: the persisted
//! [`storage::Config`] plus the per-run view the CLI works with.

pub mod storage;

use crate::error::{GeneratorError, Result};
use crate::openapi::translator::DocumentOptions;
use std::path::{Path, PathBuf};

pub use storage::Config;

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Loaded (or default) configuration
    pub config: Config,
    /// File the configuration came from (or would be saved to)
    pub config_path: PathBuf,
}

impl Settings {
    /// Load settings from `path`, or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Config::config_file()?,
        };
        let config = Config::load_from(&config_path)?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Document settings for the translator
    pub fn document_options(&self) -> DocumentOptions {
        self.config.document_options()
    }

    /// Resolve the Airtable token
    ///
    /// An explicit value wins; otherwise the configured environment
    /// variable is read after loading a `.env` file if one exists.
    pub fn token(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
            return Ok(token.to_string());
        }

        // A missing .env is fine
        let _ = dotenv::dotenv();

        std::env::var(&self.config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                GeneratorError::Config(format!(
                    "no Airtable token: set {} or pass --token",
                    self.config.token_env
                ))
            })
    }

    /// Write the current configuration to `config_path`
    pub fn save(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.config, Config::default());
        assert_eq!(settings.config_path, path);
    }

    #[test]
    fn test_explicit_token_wins() {
        let settings = Settings {
            config: Config::default(),
            config_path: PathBuf::from("unused.toml"),
        };
        assert_eq!(settings.token(Some("pat.abc")).unwrap(), "pat.abc");
    }

    #[test]
    fn test_token_from_configured_env() {
        let mut config = Config::default();
        config.token_env = "AIRTABLE_OPENAPI_TEST_TOKEN".to_string();
        let settings = Settings {
            config,
            config_path: PathBuf::from("unused.toml"),
        };

        std::env::set_var("AIRTABLE_OPENAPI_TEST_TOKEN", "pat.from-env");
        assert_eq!(settings.token(None).unwrap(), "pat.from-env");

        std::env::remove_var("AIRTABLE_OPENAPI_TEST_TOKEN");
        assert!(matches!(settings.token(None), Err(GeneratorError::Config(_))));
    }

    #[test]
    fn test_save_writes_to_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            config: Config::default(),
            config_path: dir.path().join("config.toml"),
        };
        settings.save().unwrap();
        assert!(settings.config_path.exists());
    }
}
