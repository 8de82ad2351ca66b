//! Remote tool source
//!
//! Talks MCP over streamable HTTP to the Blueprint server and exposes its
//! catalogue through the domain's [`ToolProvider`](bridge_domain::ToolProvider)
//! trait. Calls are authenticated with an API key or paid per request via x402.

pub mod client;
pub mod error;
pub mod payment;
pub mod protocol;
pub mod transport;

pub use client::{McpRemoteToolSource, RemoteAuth, SESSION_HEADER};
pub use error::RemoteError;
pub use payment::X402Payer;
