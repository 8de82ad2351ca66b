//! Error types for the remote MCP adapter

use bridge_domain::ProviderError;
use thiserror::Error;

/// Result type alias for remote MCP operations
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Errors that can occur when talking to the remote MCP server
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON-RPC error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Payment failed: {0}")]
    Payment(String),

    #[error("Session expired")]
    SessionExpired,
}

impl From<RemoteError> for ProviderError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Http(e) => ProviderError::NotAvailable(e.to_string()),
            RemoteError::SessionExpired => ProviderError::NotAvailable(err.to_string()),
            RemoteError::Payment(msg) => ProviderError::ConfigurationError(msg),
            RemoteError::Rpc { message, .. } => ProviderError::ExecutionFailed(message),
            other => ProviderError::ExecutionFailed(other.to_string()),
        }
    }
}
