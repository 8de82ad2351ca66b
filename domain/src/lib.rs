//! Domain layer for blueprint-bridge
//!
//! This crate contains the core types of the bridge and no I/O.
//!
//! # Core Concepts
//!
//! ## Intents
//!
//! An intent is a pre-built plan of blockchain actions produced upstream and
//! signed here by the user's own wallet. The chain family of its actions is
//! named by the caller, never inferred (see [`intent`]).
//!
//! ## Tools
//!
//! Tools are exposed to the orchestrating host in MCP shape. Remote and
//! local tools share the same [`ToolDefinition`] and [`CallToolResult`]
//! types (see [`tool`]).

pub mod chain;
pub mod core;
pub mod intent;
pub mod tool;

// Re-export commonly used types
pub use chain::{ChainMetadata, ChainType, registry as chain_registry};
pub use core::error::DomainError;
pub use intent::{
    EvmAction, FEE_MARKER, Intent, IntentAction, IntentEnvelope, SolanaAction,
    SuiAction, Transaction, TransactionStatus, decode_intent, encode_intent,
};
pub use tool::{
    CallToolResult, ContentBlock, ProviderError, ToolCall, ToolDefinition, ToolProvider,
    sanitize_schema,
};
