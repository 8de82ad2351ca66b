//! Presentation layer for blueprint-bridge
//!
//! This crate contains the command-line definition and the MCP server the
//! orchestrating host talks to over stdio.

pub mod cli;
pub mod server;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use server::{McpHandler, serve};
