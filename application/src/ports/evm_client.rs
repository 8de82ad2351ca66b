//! EVM client port
//!
//! Narrow view of an EVM wallet + RPC connection: submit a signed call and
//! wait for its receipt.

use async_trait::async_trait;
use bridge_domain::ChainMetadata;

use super::chain_error::ChainError;

/// A contract call to be signed by the configured account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvmTransactionRequest<'a> {
    /// Chain metadata for the action's chain id, `None` when unknown
    pub chain: Option<&'static ChainMetadata>,
    pub to: &'a str,
    /// Hex-encoded calldata
    pub data: &'a str,
}

/// Execution status reported by a receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmReceipt {
    pub status: ReceiptStatus,
}

/// Signing and broadcasting client for one EVM account.
#[async_trait]
pub trait EvmClient: Send + Sync {
    /// Checksummed address of the signing account
    fn address(&self) -> String;

    /// Sign and broadcast, returning the transaction hash
    async fn send_transaction(
        &self,
        request: EvmTransactionRequest<'_>,
    ) -> Result<String, ChainError>;

    /// Block until the transaction has `confirmations` confirmations
    async fn wait_for_transaction_receipt(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> Result<EvmReceipt, ChainError>;
}
