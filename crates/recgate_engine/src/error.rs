//! Error types for the decision engine.

use thiserror::Error;

/// A single location lookup failing. Recoverable: the resolver advances to
/// the next source, and only exhausting every source triggers the configured
/// fallback.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level failure, including timeouts.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("request failed with status {code}")]
    Status {
        /// HTTP status code returned.
        code: u16,
    },

    /// The endpoint answered 2xx with an empty body.
    #[error("response body was empty")]
    EmptyBody,
}

/// Errors surfaced by the [`start`](crate::start) entry point.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The supplied configuration failed validation.
    #[error(transparent)]
    Config(#[from] recgate_config::ConfigError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
