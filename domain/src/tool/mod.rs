//! Tool domain module
//!
//! Defines what the host sees of a tool: its [`ToolDefinition`] (name,
//! description, JSON Schema for arguments), how it is invoked
//! ([`ToolCall`]) and what comes back ([`CallToolResult`]).
//!
//! # Key Types
//!
//! - [`ToolDefinition`]: MCP-shaped tool description
//! - [`ToolCall`]: name plus a JSON object of arguments
//! - [`CallToolResult`]: content blocks, error flag, structured content
//! - [`ToolProvider`]: a listable, callable source of tools
//! - [`schema::sanitize_schema`]: strips unresolvable JSON Schema keywords
//!   from remote definitions

pub mod entities;
pub mod provider;
pub mod schema;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition};
pub use provider::{ProviderError, ToolProvider};
pub use schema::sanitize_schema;
pub use value_objects::{CallToolResult, ContentBlock, pretty_json};
