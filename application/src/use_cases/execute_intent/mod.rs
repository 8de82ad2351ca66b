//! Execute Intent use case.
//!
//! Runs the eligible actions of a typed [`Intent`] strictly in order,
//! waiting for each one to be confirmed before submitting the next.
//!
//! A revert or on-chain failure is recorded as a
//! [`TransactionStatus::Failed`](bridge_domain::TransactionStatus) entry
//! and execution continues. Signing, submission or confirmation errors
//! abort the run; transactions already submitted stay on chain.

pub mod evm;
pub mod solana;

use crate::ports::chain_error::ChainError;
use async_trait::async_trait;
use bridge_domain::{ChainType, DomainError, Intent, IntentAction, Transaction};
use thiserror::Error;

pub use evm::{EVM_CONFIRMATIONS, EvmIntentExecutor};
pub use solana::SolanaIntentExecutor;

/// Signs and submits the actions of one chain family.
#[async_trait]
pub trait IntentExecutor: Send + Sync {
    type Action: IntentAction;

    /// Address of the signing wallet on this chain family
    fn address(&self) -> String;

    /// Execute every non-fee action, returning one transaction per action in order
    async fn execute(&self, intent: &Intent<Self::Action>) -> Result<Vec<Transaction>, ChainError>;
}

/// Errors that can occur while executing an intent.
#[derive(Error, Debug)]
pub enum ExecuteIntentError {
    #[error("Unsupported chain type: {0}")]
    UnsupportedChainType(String),

    #[error("{}", not_configured_message(.chain))]
    NotConfigured { chain: ChainType },

    #[error("Invalid intent: {0}")]
    InvalidIntent(#[source] DomainError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl From<DomainError> for ExecuteIntentError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnsupportedChainType(tag) => Self::UnsupportedChainType(tag),
            other => Self::InvalidIntent(other),
        }
    }
}

fn not_configured_message(chain: &ChainType) -> String {
    let label = match chain {
        ChainType::Evm => "EVM",
        ChainType::Solana => "Solana",
        ChainType::Sui => "Sui",
    };
    match chain.credential_hint() {
        Some(var) => format!("{label} executor not configured. Set {var}."),
        None => format!("{label} executor not configured"),
    }
}
