//! Error types for the OpsDesk client.

use thiserror::Error;

/// Errors that can occur when calling the OpsDesk backends.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("HTTP {status}: {path}")]
    Status { status: u16, path: String },

    /// The backend answered with a non-zero business code.
    #[error("API error {code}: {msg}")]
    Api { code: i64, msg: String },

    /// The response envelope carried no data.
    #[error("missing response data: {0}")]
    MissingData(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
