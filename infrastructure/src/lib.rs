//! Infrastructure layer for blueprint-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod evm;
pub mod remote;
pub mod solana;

// Re-export commonly used types
pub use config::{
    BridgeConfig, ConfigLoader, ConfigValidationError, EvmSettings, FileConfig, RemoteSettings,
    SolanaSettings,
};
pub use evm::EthersEvmClient;
pub use remote::{McpRemoteToolSource, RemoteAuth, RemoteError, X402Payer};
pub use solana::{RpcSolanaClient, SolanaKeypair};
