//! EVM intent executor

use super::IntentExecutor;
use crate::ports::chain_error::ChainError;
use crate::ports::evm_client::{EvmClient, EvmTransactionRequest, ReceiptStatus};
use async_trait::async_trait;
use bridge_domain::{EvmAction, Intent, IntentAction, Transaction, chain_registry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Confirmations awaited for every EVM transaction
pub const EVM_CONFIRMATIONS: u64 = 2;

/// Executes EVM actions through an [`EvmClient`].
#[derive(Clone)]
pub struct EvmIntentExecutor {
    client: Arc<dyn EvmClient>,
}

impl EvmIntentExecutor {
    pub fn new(client: Arc<dyn EvmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentExecutor for EvmIntentExecutor {
    type Action = EvmAction;

    fn address(&self) -> String {
        self.client.address()
    }

    async fn execute(&self, intent: &Intent<EvmAction>) -> Result<Vec<Transaction>, ChainError> {
        info!(
            intent_id = %intent.id,
            actions = intent.actions.len(),
            skipped_fees = intent.fee_action_count(),
            "Executing EVM intent"
        );

        let mut transactions = Vec::new();

        for action in intent.eligible_actions() {
            let chain = chain_registry::lookup_str(action.chain_id());
            if chain.is_none() {
                warn!(
                    chain_id = %action.chain_id,
                    "Unknown chain id, signing on the wallet's default chain"
                );
            }

            let hash = self
                .client
                .send_transaction(EvmTransactionRequest {
                    chain,
                    to: &action.to,
                    data: &action.data,
                })
                .await?;
            debug!(hash = %hash, description = %action.description, "Transaction submitted");

            let receipt = self
                .client
                .wait_for_transaction_receipt(&hash, EVM_CONFIRMATIONS)
                .await?;

            let tx = match receipt.status {
                ReceiptStatus::Success => Transaction::success(hash, action.description.clone()),
                ReceiptStatus::Reverted => {
                    warn!(hash = %hash, "Transaction reverted");
                    Transaction::failed(hash, action.description.clone())
                }
            };
            transactions.push(tx);
        }

        Ok(transactions)
    }
}
