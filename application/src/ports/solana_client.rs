//! Solana client port
//!
//! The client owns the keypair: it decodes a base64 transaction, co-signs it
//! and submits it, then reports the confirmation outcome.

use async_trait::async_trait;
use serde_json::Value;

use super::chain_error::ChainError;

/// Outcome of waiting for a signature at `confirmed` commitment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SolanaConfirmation {
    /// Transaction error as reported by the cluster, if any
    pub err: Option<Value>,
}

impl SolanaConfirmation {
    pub fn ok() -> Self {
        Self { err: None }
    }

    pub fn failed(err: impl Into<Value>) -> Self {
        Self {
            err: Some(err.into()),
        }
    }

    /// Absent, null and empty-string errors count as success
    pub fn is_success(&self) -> bool {
        match &self.err {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        }
    }
}

/// Signing and broadcasting client for one Solana keypair.
#[async_trait]
pub trait SolanaClient: Send + Sync {
    /// Base58 public key of the signing keypair
    fn address(&self) -> String;

    /// Co-sign a base64 serialized transaction and submit it, returning its signature
    async fn sign_and_send_transaction(&self, payload: &str) -> Result<String, ChainError>;

    /// Wait for the signature to reach `confirmed` commitment
    async fn confirm_transaction(&self, signature: &str) -> Result<SolanaConfirmation, ChainError>;
}
