//! Chain family tag carried alongside an intent.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::DomainError;

/// Blockchain family an intent targets.
///
/// The tag travels next to the encoded intent (the `chainType` argument of
/// `execute_intent`) and is the only thing that decides how the intent's
/// actions are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
    Evm,
    Solana,
    Sui,
}

impl ChainType {
    pub const ALL: [ChainType; 3] = [ChainType::Solana, ChainType::Evm, ChainType::Sui];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChainType::Evm => "evm",
            ChainType::Solana => "solana",
            ChainType::Sui => "sui",
        }
    }

    /// Environment variable that supplies the signing key for this family, if any
    pub fn credential_hint(&self) -> Option<&'static str> {
        match self {
            ChainType::Evm => Some("EVM_PRIVATE_KEY"),
            ChainType::Solana => Some("SOLANA_PRIVATE_KEY"),
            ChainType::Sui => None,
        }
    }
}

impl std::fmt::Display for ChainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChainType {
    type Err = DomainError;

    /// Exact, case-sensitive match on the wire tag.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "evm" => Ok(ChainType::Evm),
            "solana" => Ok(ChainType::Solana),
            "sui" => Ok(ChainType::Sui),
            other => Err(DomainError::UnsupportedChainType(other.to_string())),
        }
    }
}
