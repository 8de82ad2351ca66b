//! Execution context
//!
//! Holds one executor slot per chain family and dispatches decoded intents
//! to the slot named by the caller. Built once at startup and shared
//! read-only by every tool call.

use super::execute_intent::{
    EvmIntentExecutor, ExecuteIntentError, IntentExecutor, SolanaIntentExecutor,
};
use bridge_domain::{ChainType, IntentEnvelope, Transaction};
use serde::Serialize;
use tracing::info;

/// Wallet addresses per chain family; empty string when unconfigured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletAddresses {
    pub evm: String,
    pub solana: String,
    pub sui: String,
}

/// An executor that may or may not have been configured at startup.
#[derive(Clone)]
pub enum ExecutorSlot<E> {
    Configured(E),
    NotConfigured,
}

impl<E> ExecutorSlot<E> {
    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }
}

impl<E> From<Option<E>> for ExecutorSlot<E> {
    fn from(executor: Option<E>) -> Self {
        executor.map_or(Self::NotConfigured, Self::Configured)
    }
}

impl<E: IntentExecutor> ExecutorSlot<E> {
    fn address(&self) -> String {
        match self {
            Self::Configured(executor) => executor.address(),
            Self::NotConfigured => String::new(),
        }
    }

    async fn run(
        &self,
        chain: ChainType,
        envelope: IntentEnvelope,
    ) -> Result<Vec<Transaction>, ExecuteIntentError> {
        let Self::Configured(executor) = self else {
            return Err(ExecuteIntentError::NotConfigured { chain });
        };
        let intent = envelope.bind::<E::Action>()?;
        Ok(executor.execute(&intent).await?)
    }
}

/// Executors and wallet identity for the lifetime of the process.
pub struct ExecutionContext {
    wallet: WalletAddresses,
    evm: ExecutorSlot<EvmIntentExecutor>,
    solana: ExecutorSlot<SolanaIntentExecutor>,
}

impl ExecutionContext {
    pub fn new(evm: Option<EvmIntentExecutor>, solana: Option<SolanaIntentExecutor>) -> Self {
        let evm = ExecutorSlot::from(evm);
        let solana = ExecutorSlot::from(solana);
        let wallet = WalletAddresses {
            evm: evm.address(),
            solana: solana.address(),
            sui: String::new(),
        };
        Self {
            wallet,
            evm,
            solana,
        }
    }

    pub fn wallet(&self) -> &WalletAddresses {
        &self.wallet
    }

    pub fn is_configured(&self, chain: ChainType) -> bool {
        match chain {
            ChainType::Evm => self.evm.is_configured(),
            ChainType::Solana => self.solana.is_configured(),
            ChainType::Sui => false,
        }
    }

    /// Fails with [`ExecuteIntentError::NotConfigured`] when no executor
    /// exists for `chain`.
    pub fn require(&self, chain: ChainType) -> Result<(), ExecuteIntentError> {
        if self.is_configured(chain) {
            Ok(())
        } else {
            Err(ExecuteIntentError::NotConfigured { chain })
        }
    }

    /// Bind the envelope's actions to `chain` and execute them.
    pub async fn execute_intent(
        &self,
        chain: ChainType,
        envelope: IntentEnvelope,
    ) -> Result<Vec<Transaction>, ExecuteIntentError> {
        info!(chain = %chain, intent_id = %envelope.id, "Dispatching intent");
        match chain {
            ChainType::Evm => self.evm.run(chain, envelope).await,
            ChainType::Solana => self.solana.run(chain, envelope).await,
            ChainType::Sui => Err(ExecuteIntentError::NotConfigured { chain }),
        }
    }
}
