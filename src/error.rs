//! Error types for airtable-openapi
//!
//! This module defines the error types used throughout the application.
//! Translation itself never fails on malformed-but-present input; these
//! errors cover the boundaries around it (reading input, configuration,
//! the metadata API and the collision policy).

use thiserror::Error;

/// Result type alias for airtable-openapi
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Main error type for airtable-openapi
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP-related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be written
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The base description (or one of its required parts) is absent
    #[error("Missing base: {0}")]
    MissingBase(String),

    /// Two tables derive the same schema name and the policy forbids renaming
    #[error("Schema name collision: tables '{first}' and '{second}' both map to '{schema_name}'")]
    SchemaNameCollision {
        schema_name: String,
        first: String,
        second: String,
    },

    /// The Airtable metadata API answered with a non-success status
    #[error("Airtable metadata API error ({status}): {message}")]
    MetaApi { status: u16, message: String },
}

impl GeneratorError {
    /// Shorthand for [`GeneratorError::MissingBase`]
    pub fn missing_base(message: impl Into<String>) -> Self {
        Self::MissingBase(message.into())
    }

    /// Whether the error was caused by the input or configuration rather
    /// than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Serialization(_)
                | Self::ConfigParse(_)
                | Self::Config(_)
                | Self::MissingBase(_)
                | Self::SchemaNameCollision { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_message() {
        let err = GeneratorError::SchemaNameCollision {
            schema_name: "MyTable".to_string(),
            first: "My Table".to_string(),
            second: "My-Table".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Schema name collision: tables 'My Table' and 'My-Table' both map to 'MyTable'"
        );
        assert!(err.is_input_error());
    }

    #[test]
    fn test_io_is_not_input_error() {
        let err: GeneratorError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_input_error());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_malformed_json_is_input_error() {
        let err: GeneratorError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(err.is_input_error());

        let api = GeneratorError::MetaApi {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert!(!api.is_input_error());
    }
}
