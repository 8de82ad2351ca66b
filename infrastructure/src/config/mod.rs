//! Configuration loading for blueprint-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables (`EVM_PRIVATE_KEY`, `BLUEPRINT_API_KEY`, ...)
//! 2. `--config <path>` specified file
//! 3. Project root: `./blueprint.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/blueprint-bridge/config.toml`
//! 5. Default values
//!
//! The merged [`FileConfig`] is then validated into a [`BridgeConfig`].

mod bridge_config;
mod file_config;
mod loader;

pub use bridge_config::{
    BridgeConfig, ConfigValidationError, EvmSettings, RemoteSettings, SolanaSettings,
};
pub use file_config::{
    DEFAULT_BASE_RPC_URL, DEFAULT_MCP_URL, DEFAULT_SOLANA_RPC_URL, FileConfig, FileEvmConfig,
    FileRemoteConfig, FileSolanaConfig,
};
pub use loader::{ConfigLoader, ENV_OVERRIDES, PROJECT_CONFIG_FILE};
