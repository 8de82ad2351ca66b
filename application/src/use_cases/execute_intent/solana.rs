//! Solana intent executor

use super::IntentExecutor;
use crate::ports::chain_error::ChainError;
use crate::ports::solana_client::SolanaClient;
use async_trait::async_trait;
use bridge_domain::{Intent, SolanaAction, Transaction};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Executes Solana actions through a [`SolanaClient`].
#[derive(Clone)]
pub struct SolanaIntentExecutor {
    client: Arc<dyn SolanaClient>,
}

impl SolanaIntentExecutor {
    pub fn new(client: Arc<dyn SolanaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentExecutor for SolanaIntentExecutor {
    type Action = SolanaAction;

    fn address(&self) -> String {
        self.client.address()
    }

    async fn execute(&self, intent: &Intent<SolanaAction>) -> Result<Vec<Transaction>, ChainError> {
        info!(
            intent_id = %intent.id,
            actions = intent.actions.len(),
            skipped_fees = intent.fee_action_count(),
            "Executing Solana intent"
        );

        let mut transactions = Vec::new();

        for action in intent.eligible_actions() {
            let signature = self.client.sign_and_send_transaction(&action.payload).await?;
            debug!(signature = %signature, description = %action.description, "Transaction submitted");

            let confirmation = self.client.confirm_transaction(&signature).await?;

            let tx = if confirmation.is_success() {
                Transaction::success(signature, action.description.clone())
            } else {
                warn!(signature = %signature, err = ?confirmation.err, "Transaction failed on chain");
                Transaction::failed(signature, action.description.clone())
            };
            transactions.push(tx);
        }

        Ok(transactions)
    }
}
