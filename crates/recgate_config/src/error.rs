//! Error types for configuration validation.

use thiserror::Error;

/// Errors that can occur while validating a configuration.
///
/// A validation failure indicates a caller integration bug and halts the
/// whole visit decision; there is no recovery path.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The site identifier is not a strict 8-4-4-4-12 hex identifier.
    #[error("invalid site id '{0}': expected 8-4-4-4-12 hex groups")]
    InvalidSiteId(String),

    /// The location rule carries no country codes.
    #[error("location rule has an empty country code list")]
    EmptyCountryCodes,

    /// A page rule carries no pathname patterns.
    #[error("page rule {index} has an empty pathname list")]
    EmptyPathnames {
        /// Zero-based position of the offending rule.
        index: usize,
    },

    /// The configuration document could not be deserialized.
    #[error(transparent)]
    Deserialize(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
