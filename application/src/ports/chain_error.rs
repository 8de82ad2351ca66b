//! Errors reported by chain client adapters.

use thiserror::Error;

/// Failure while talking to a chain: signing, submission or confirmation.
///
/// A transaction that lands on chain but reverts is *not* a `ChainError`;
/// it is reported as a failed transaction.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Invalid transaction payload: {0}")]
    InvalidPayload(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Confirmation failed: {0}")]
    Confirmation(String),

    #[error("RPC error (code {code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),
}
