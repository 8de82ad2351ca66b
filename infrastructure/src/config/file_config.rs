//! Raw TOML configuration data types
//!
//! These structs mirror the config file one-to-one. Keys are plain strings
//! here; [`BridgeConfig`](super::BridgeConfig) is the validated form.
//!
//! ```toml
//! [remote]
//! url = "https://blueprint-beta.api.sui-dev.bluefin.io/discover/mcp"
//! api_key = "..."
//!
//! [evm]
//! private_key = "0x..."
//! rpc_url = "https://mainnet.base.org"
//!
//! [solana]
//! private_key = "..."
//! rpc_url = "https://api.mainnet-beta.solana.com"
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_MCP_URL: &str = "https://blueprint-beta.api.sui-dev.bluefin.io/discover/mcp";
pub const DEFAULT_BASE_RPC_URL: &str = "https://mainnet.base.org";
pub const DEFAULT_SOLANA_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// Remote tool catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRemoteConfig {
    pub url: String,
    /// Bearer key; without it every remote call is paid via x402
    pub api_key: Option<String>,
}

impl Default for FileRemoteConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MCP_URL.to_string(),
            api_key: None,
        }
    }
}

/// EVM wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEvmConfig {
    /// Hex private key, with or without `0x`
    pub private_key: Option<String>,
    pub rpc_url: String,
}

impl Default for FileEvmConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            rpc_url: DEFAULT_BASE_RPC_URL.to_string(),
        }
    }
}

/// Solana wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSolanaConfig {
    /// Base58 keypair (64 bytes) or seed (32 bytes)
    pub private_key: Option<String>,
    pub rpc_url: String,
}

impl Default for FileSolanaConfig {
    fn default() -> Self {
        Self {
            private_key: None,
            rpc_url: DEFAULT_SOLANA_RPC_URL.to_string(),
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub remote: FileRemoteConfig,
    pub evm: FileEvmConfig,
    pub solana: FileSolanaConfig,
}

impl FileConfig {
    /// Copy with every key replaced by a marker, for `--show-config`
    pub fn redacted(&self) -> Self {
        fn mask(key: &Option<String>) -> Option<String> {
            key.as_ref().map(|_| "<redacted>".to_string())
        }

        let mut copy = self.clone();
        copy.remote.api_key = mask(&self.remote.api_key);
        copy.evm.private_key = mask(&self.evm.private_key);
        copy.solana.private_key = mask(&self.solana.private_key);
        copy
    }
}
