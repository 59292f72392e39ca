//! Configuration Storage
//!
//! This module handles persistent storage of configuration data:
//! document defaults, the metadata API location and the collision policy.

use crate::base::source::DEFAULT_META_API_URL;
use crate::error::{GeneratorError, Result};
use crate::openapi::naming::CollisionPolicy;
use crate::openapi::translator::{
    DocumentOptions, DEFAULT_API_VERSION, DEFAULT_SERVER_DESCRIPTION, DEFAULT_SERVER_URL,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name
const CONFIG_FILE: &str = "config.toml";

/// Configuration directory name
const CONFIG_DIR: &str = "airtable-openapi";

/// Environment variable holding the Airtable token by default
pub const DEFAULT_TOKEN_ENV: &str = "AIRTABLE_TOKEN";

/// Persistent configuration data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server URL written into the document
    pub server_url: String,
    /// Server description written into the document
    pub server_description: String,
    /// `info.version`
    pub api_version: String,
    /// `info.title` override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `info.description` override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Airtable metadata API root
    pub meta_api_url: String,
    /// Environment variable that holds the Airtable token
    pub token_env: String,
    /// Schema name collision handling
    pub collision_policy: CollisionPolicy,
    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            server_description: DEFAULT_SERVER_DESCRIPTION.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            title: None,
            description: None,
            meta_api_url: DEFAULT_META_API_URL.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            collision_policy: CollisionPolicy::default(),
            pretty: true,
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                GeneratorError::Config("Could not find configuration directory".to_string())
            })?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the default configuration file path
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load configuration from `path`, or defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file {}: {}", path.display(), e),
            ))
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GeneratorError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create config directory: {}", e),
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would produce an unusable document
    pub fn validate(&self) -> Result<()> {
        if self.server_url.trim().is_empty() {
            return Err(GeneratorError::Config("server_url must not be empty".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(GeneratorError::Config("api_version must not be empty".to_string()));
        }
        if self.token_env.trim().is_empty() {
            return Err(GeneratorError::Config("token_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// Document settings derived from this configuration
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            title: self.title.clone(),
            description: self.description.clone(),
            version: self.api_version.clone(),
            server_url: self.server_url.clone(),
            server_description: self.server_description.clone(),
            collision_policy: self.collision_policy,
        }
    }
}
