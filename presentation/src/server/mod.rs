//! MCP server facing the orchestrating host

pub mod handler;
pub mod protocol;
pub mod stdio;

pub use handler::{McpHandler, SERVER_NAME, SUPPORTED_PROTOCOL_VERSIONS};
pub use protocol::{IncomingMessage, OutgoingResponse, RpcFailure};
pub use stdio::serve;
