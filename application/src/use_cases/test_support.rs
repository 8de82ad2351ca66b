//! Hand-written chain client mocks shared by the use case tests.

use crate::ports::chain_error::ChainError;
use crate::ports::evm_client::{EvmClient, EvmReceipt, EvmTransactionRequest, ReceiptStatus};
use crate::ports::solana_client::{SolanaClient, SolanaConfirmation};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEvmTx {
    pub chain_id: Option<u64>,
    pub to: String,
    pub data: String,
}

pub struct MockEvmClient {
    address: String,
    sent: Mutex<Vec<SentEvmTx>>,
    confirmations: Mutex<Vec<u64>>,
    revert_on: Option<usize>,
    fail_send_on: Option<usize>,
    fail_receipt_on: Option<usize>,
}

impl MockEvmClient {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            sent: Mutex::new(Vec::new()),
            confirmations: Mutex::new(Vec::new()),
            revert_on: None,
            fail_send_on: None,
            fail_receipt_on: None,
        }
    }

    /// Receipt for the nth submitted transaction reports a revert
    pub fn revert_on(mut self, index: usize) -> Self {
        self.revert_on = Some(index);
        self
    }

    /// The nth submission fails outright
    pub fn fail_send_on(mut self, index: usize) -> Self {
        self.fail_send_on = Some(index);
        self
    }

    /// Waiting for the nth receipt fails, e.g. the RPC drops the connection
    pub fn fail_receipt_on(mut self, index: usize) -> Self {
        self.fail_receipt_on = Some(index);
        self
    }

    pub fn sent(&self) -> Vec<SentEvmTx> {
        self.sent.lock().unwrap().clone()
    }

    pub fn awaited_confirmations(&self) -> Vec<u64> {
        self.confirmations.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvmClient for MockEvmClient {
    fn address(&self) -> String {
        self.address.clone()
    }

    async fn send_transaction(
        &self,
        request: EvmTransactionRequest<'_>,
    ) -> Result<String, ChainError> {
        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        sent.push(SentEvmTx {
            chain_id: request.chain.map(|c| c.id),
            to: request.to.to_string(),
            data: request.data.to_string(),
        });
        if self.fail_send_on == Some(index) {
            return Err(ChainError::Submission("nonce too low".into()));
        }
        Ok(format!("0xhash{}", index + 1))
    }

    async fn wait_for_transaction_receipt(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> Result<EvmReceipt, ChainError> {
        self.confirmations.lock().unwrap().push(confirmations);
        let index: usize = hash
            .trim_start_matches("0xhash")
            .parse::<usize>()
            .map(|n| n - 1)
            .unwrap_or(usize::MAX);
        if self.fail_receipt_on == Some(index) {
            return Err(ChainError::Confirmation(format!("transaction {hash} was dropped")));
        }
        let status = if self.revert_on == Some(index) {
            ReceiptStatus::Reverted
        } else {
            ReceiptStatus::Success
        };
        Ok(EvmReceipt { status })
    }
}

pub struct MockSolanaClient {
    address: String,
    submitted: Mutex<Vec<String>>,
    failure: Option<(usize, Value)>,
    reject_payload: Option<String>,
    fail_confirm_transport_on: Option<usize>,
}

impl MockSolanaClient {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            submitted: Mutex::new(Vec::new()),
            failure: None,
            reject_payload: None,
            fail_confirm_transport_on: None,
        }
    }

    /// Signing `payload` fails before anything is submitted
    pub fn reject_payload(mut self, payload: &str) -> Self {
        self.reject_payload = Some(payload.to_string());
        self
    }

    /// Confirmation of the nth signature carries `err`
    pub fn fail_confirmation_on(mut self, index: usize, err: Value) -> Self {
        self.failure = Some((index, err));
        self
    }

    /// Confirming the nth signature fails at the transport, not on chain
    pub fn fail_confirm_transport_on(mut self, index: usize) -> Self {
        self.fail_confirm_transport_on = Some(index);
        self
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SolanaClient for MockSolanaClient {
    fn address(&self) -> String {
        self.address.clone()
    }

    async fn sign_and_send_transaction(&self, payload: &str) -> Result<String, ChainError> {
        if self.reject_payload.as_deref() == Some(payload) {
            return Err(ChainError::Signing("wallet is not a required signer".into()));
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(payload.to_string());
        Ok(format!("sig{}", submitted.len()))
    }

    async fn confirm_transaction(&self, signature: &str) -> Result<SolanaConfirmation, ChainError> {
        let index = signature
            .trim_start_matches("sig")
            .parse::<usize>()
            .map(|n| n - 1)
            .unwrap_or(usize::MAX);
        if self.fail_confirm_transport_on == Some(index) {
            return Err(ChainError::Transport("confirmation timed out".into()));
        }
        match &self.failure {
            Some((i, err)) if *i == index => Ok(SolanaConfirmation::failed(err.clone())),
            _ => Ok(SolanaConfirmation::ok()),
        }
    }
}
