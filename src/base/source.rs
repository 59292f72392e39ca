//! Base Sources
//!
//! This module defines the trait-based abstraction for loading a base
//! description, with implementations for local JSON files (or stdin) and
//! the Airtable metadata API.

use crate::base::schema::{Base, BaseOverrides};
use crate::error::{GeneratorError, Result};
use crate::openapi::naming::encode_uri_component;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Default Airtable metadata API root
pub const DEFAULT_META_API_URL: &str = "https://api.airtable.com/v0/meta";

/// Default timeout for metadata requests (in seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path that selects stdin instead of a file
const STDIN_PATH: &str = "-";

/// Something that can produce a base description
#[async_trait]
pub trait BaseSource: Send + Sync {
    /// Load the base description
    async fn load(&self) -> Result<Base>;

    /// Human-readable name of the source, used in logs
    fn source_name(&self) -> String;
}

/// Reads a base description from a JSON file, or stdin for `-`
pub struct FileSource {
    /// Input path
    path: PathBuf,
    /// Id/name overrides
    overrides: BaseOverrides,
}

impl FileSource {
    /// Create a new file source
    pub fn new(path: impl Into<PathBuf>, overrides: BaseOverrides) -> Self {
        Self {
            path: path.into(),
            overrides,
        }
    }

    /// Whether this source reads stdin
    pub fn is_stdin(&self) -> bool {
        self.path.as_os_str() == STDIN_PATH
    }

    async fn read_text(&self) -> Result<String> {
        if self.is_stdin() {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            return Ok(text);
        }

        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GeneratorError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read {}: {}", self.path.display(), e),
            ))
        })
    }
}

#[async_trait]
impl BaseSource for FileSource {
    async fn load(&self) -> Result<Base> {
        let text = self.read_text().await?;
        if text.trim().is_empty() {
            return Err(GeneratorError::missing_base(format!(
                "{} is empty",
                self.source_name()
            )));
        }
        Base::from_json_str(&text, &self.overrides)
    }

    fn source_name(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

/// Loads a base description from the Airtable metadata API
///
/// Issues a single `GET <meta_api_url>/bases/<baseId>/tables`; there is no
/// retry. Non-success statuses surface as [`GeneratorError::MetaApi`].
pub struct MetaApiSource {
    /// Personal access token
    token: String,
    /// Metadata API root
    meta_api_url: String,
    /// Base id and optional display name
    overrides: BaseOverrides,
    /// HTTP client
    client: Client,
}

impl MetaApiSource {
    /// Create a new metadata API source
    ///
    /// # Arguments
    /// * `token` - Airtable personal access token
    /// * `base_id` - Base to describe
    /// * `base_name` - Display name (the tables endpoint does not return one)
    pub fn new(
        token: impl Into<String>,
        base_id: impl Into<String>,
        base_name: Option<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            token: token.into(),
            meta_api_url: DEFAULT_META_API_URL.to_string(),
            overrides: BaseOverrides {
                id: Some(base_id.into()),
                name: base_name,
            },
            client,
        })
    }

    /// Use a different metadata API root
    pub fn with_meta_api_url(mut self, url: impl Into<String>) -> Self {
        self.meta_api_url = url.into();
        self
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Whether a non-empty token is configured
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// URL of the tables endpoint for this base
    pub fn tables_url(&self) -> String {
        format!(
            "{}/bases/{}/tables",
            self.meta_api_url.trim_end_matches('/'),
            encode_uri_component(self.base_id())
        )
    }

    fn base_id(&self) -> &str {
        self.overrides.id.as_deref().unwrap_or_default()
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|_| GeneratorError::Config("token contains invalid characters".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl BaseSource for MetaApiSource {
    async fn load(&self) -> Result<Base> {
        if !self.has_token() {
            return Err(GeneratorError::Config(
                "no Airtable token configured".to_string(),
            ));
        }
        if self.base_id().trim().is_empty() {
            return Err(GeneratorError::missing_base("base id is required"));
        }

        let url = self.tables_url();
        tracing::debug!(url = %url, "fetching base schema");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(GeneratorError::MetaApi {
                status: status.as_u16(),
                message: text,
            });
        }

        Base::from_json_str(&text, &self.overrides)
    }

    fn source_name(&self) -> String {
        format!("Airtable metadata API ({})", self.base_id())
    }
}
