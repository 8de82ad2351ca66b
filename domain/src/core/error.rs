//! Domain error types

use thiserror::Error;

use crate::chain::ChainType;

/// Domain-level errors raised while interpreting wire data
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unsupported chain type: {0}")]
    UnsupportedChainType(String),

    #[error("Intent is not valid base64: {0}")]
    InvalidIntentEncoding(#[from] base64::DecodeError),

    #[error("Intent is not valid JSON: {0}")]
    InvalidIntentJson(#[from] serde_json::Error),

    #[error("Action {index} is not a valid {chain} action: {reason}")]
    InvalidAction {
        index: usize,
        chain: ChainType,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_chain_display() {
        let error = DomainError::UnsupportedChainType("bitcoin".to_string());
        assert_eq!(error.to_string(), "Unsupported chain type: bitcoin");
    }

    #[test]
    fn test_invalid_action_display() {
        let error = DomainError::InvalidAction {
            index: 2,
            chain: ChainType::Evm,
            reason: "missing field `to`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Action 2 is not a valid evm action: missing field `to`"
        );
    }
}
