//! Error types for sia-refs.
//!
//! Library functions return `Result<T, RefsError>`. The public client entry
//! points catch these at the call boundary and turn them into a plain
//! success/failure signal for the pipeline.

use thiserror::Error;

/// Main error type for sia-refs operations.
#[derive(Debug, Error)]
pub enum RefsError {
    /// Network/HTTP transport error (timeout, connection refused, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote service answered with an unexpected status
    #[error("API error: {code} - {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body as returned by the service
        message: String,
    },

    /// Response body could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias using `RefsError`
pub type Result<T> = std::result::Result<T, RefsError>;

impl RefsError {
    /// Human-readable line used in the console status output.
    ///
    /// API errors keep the `<status>: <body>` shape, everything else is
    /// reported with its plain description.
    pub fn status_line(&self) -> String {
        match self {
            RefsError::Api { code, message } => format!("❌ Error {}: {}", code, message),
            other => format!("❌ Error: {}", other.detail()),
        }
    }

    fn detail(&self) -> String {
        match self {
            RefsError::Network(e) => e.to_string(),
            RefsError::Parse(msg) | RefsError::Config(msg) => msg.clone(),
            RefsError::Api { message, .. } => message.clone(),
        }
    }
}
