//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The remote tool source uses the domain's `ToolProvider` trait directly.

pub mod chain_error;
pub mod evm_client;
pub mod solana_client;
