//! Validated runtime configuration

use super::file_config::FileConfig;
use secrecy::SecretString;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("no wallet configured: set EVM_PRIVATE_KEY and/or SOLANA_PRIVATE_KEY")]
    NoWalletKey,

    #[error("EVM_PRIVATE_KEY is required for x402 payments when BLUEPRINT_API_KEY is not set")]
    PaymentKeyRequired,

    #[error("invalid URL for {field}: {url}")]
    InvalidUrl { field: &'static str, url: String },
}

#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub url: String,
    pub api_key: Option<SecretString>,
}

#[derive(Debug, Clone)]
pub struct EvmSettings {
    /// `0x`-prefixed hex key
    pub private_key: SecretString,
    pub rpc_url: String,
}

#[derive(Debug, Clone)]
pub struct SolanaSettings {
    pub private_key: SecretString,
    pub rpc_url: String,
}

/// Configuration the bridge runs with. Secrets never appear in `Debug` output.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub remote: RemoteSettings,
    pub evm: Option<EvmSettings>,
    pub solana: Option<SolanaSettings>,
}

impl BridgeConfig {
    /// Whether remote calls authenticate with an API key rather than x402
    pub fn uses_api_key(&self) -> bool {
        self.remote.api_key.is_some()
    }
}

impl TryFrom<FileConfig> for BridgeConfig {
    type Error = ConfigValidationError;

    fn try_from(file: FileConfig) -> Result<Self, Self::Error> {
        let remote = RemoteSettings {
            url: checked_url("remote.url", file.remote.url)?,
            api_key: non_empty(file.remote.api_key).map(SecretString::from),
        };

        let evm = match non_empty(file.evm.private_key) {
            Some(key) => Some(EvmSettings {
                private_key: SecretString::from(with_hex_prefix(key)),
                rpc_url: checked_url("evm.rpc_url", file.evm.rpc_url)?,
            }),
            None => None,
        };

        let solana = match non_empty(file.solana.private_key) {
            Some(key) => Some(SolanaSettings {
                private_key: SecretString::from(key),
                rpc_url: checked_url("solana.rpc_url", file.solana.rpc_url)?,
            }),
            None => None,
        };

        if evm.is_none() && solana.is_none() {
            return Err(ConfigValidationError::NoWalletKey);
        }
        if remote.api_key.is_none() && evm.is_none() {
            return Err(ConfigValidationError::PaymentKeyRequired);
        }

        Ok(Self {
            remote,
            evm,
            solana,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn with_hex_prefix(key: String) -> String {
    if key.starts_with("0x") || key.starts_with("0X") {
        key
    } else {
        format!("0x{key}")
    }
}

fn checked_url(field: &'static str, url: String) -> Result<String, ConfigValidationError> {
    let url = url.trim().to_string();
    match reqwest::Url::parse(&url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url),
        _ => Err(ConfigValidationError::InvalidUrl { field, url }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn file_with(evm: Option<&str>, solana: Option<&str>, api_key: Option<&str>) -> FileConfig {
        let mut file = FileConfig::default();
        file.evm.private_key = evm.map(String::from);
        file.solana.private_key = solana.map(String::from);
        file.remote.api_key = api_key.map(String::from);
        file
    }

    #[test]
    fn test_evm_key_is_trimmed_and_prefixed() {
        let config = BridgeConfig::try_from(file_with(Some("  abcd1234 \n"), None, None)).unwrap();
        let evm = config.evm.unwrap();
        assert_eq!(evm.private_key.expose_secret(), "0xabcd1234");
    }

    #[test]
    fn test_prefixed_key_is_kept() {
        let config = BridgeConfig::try_from(file_with(Some("0xabcd"), None, None)).unwrap();
        assert_eq!(config.evm.unwrap().private_key.expose_secret(), "0xabcd");
    }

    #[test]
    fn test_no_wallet_is_rejected() {
        let err = BridgeConfig::try_from(file_with(None, Some("   "), Some("key"))).unwrap_err();
        assert!(matches!(err, ConfigValidationError::NoWalletKey));
    }

    #[test]
    fn test_solana_only_requires_api_key() {
        let err = BridgeConfig::try_from(file_with(None, Some("5Kd3"), None)).unwrap_err();
        assert!(matches!(err, ConfigValidationError::PaymentKeyRequired));

        let config = BridgeConfig::try_from(file_with(None, Some("5Kd3"), Some("key"))).unwrap();
        assert!(config.evm.is_none());
        assert!(config.solana.is_some());
        assert!(config.uses_api_key());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let mut file = file_with(Some("0x01"), None, None);
        file.evm.rpc_url = "not a url".into();
        let err = BridgeConfig::try_from(file).unwrap_err();
        assert!(matches!(err, ConfigValidationError::InvalidUrl { field: "evm.rpc_url", .. }));
    }

    #[test]
    fn test_debug_does_not_leak_keys() {
        let config = BridgeConfig::try_from(file_with(Some("0xfeedface"), None, Some("sk-123"))).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("feedface"));
        assert!(!shown.contains("sk-123"));
    }
}
