//! Tool provider abstraction
//!
//! A [`ToolProvider`] is a source of tools the router can list and call.
//! The bridge has two kinds:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ToolRouter                           │
//! │  list: [...remote, ...local]    call: local first, remote   │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//!         ┌──────────────┐                ┌──────────────┐
//!         │    Remote    │                │    Local     │
//!         │ (MCP catalog)│                │ (wallet +    │
//!         │              │                │  intents)    │
//!         └──────────────┘                └──────────────┘
//! ```
//!
//! Remote providers report failures through [`ProviderError`]; the router is
//! the only place that turns such an error into an error result.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::CallToolResult;

/// Error type for tool provider operations
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider cannot be reached (network failure, closed session)
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    /// Failed to list tools from the provider
    #[error("Discovery failed: {0}")]
    DiscoveryFailed(String),

    /// Tool call failed at the protocol level
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// Provider rejected the request because of its configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ProviderError {
    /// The underlying message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::NotAvailable(m)
            | Self::DiscoveryFailed(m)
            | Self::ExecutionFailed(m)
            | Self::ConfigurationError(m) => m,
        }
    }
}

/// Source of tools that can be listed and called
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier for this provider
    ///
    /// Examples: "local", "remote"
    fn id(&self) -> &str;

    /// Display name for log output
    fn display_name(&self) -> &str;

    /// List the tools this provider currently offers
    async fn discover_tools(&self) -> Result<Vec<ToolDefinition>, ProviderError>;

    /// Call a tool by name
    async fn call(&self, call: &ToolCall) -> Result<CallToolResult, ProviderError>;
}
