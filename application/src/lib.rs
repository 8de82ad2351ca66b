//! Application layer for blueprint-bridge
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chain_error::ChainError,
    evm_client::{EvmClient, EvmReceipt, EvmTransactionRequest, ReceiptStatus},
    solana_client::{SolanaClient, SolanaConfirmation},
};
pub use use_cases::execute_intent::{
    EVM_CONFIRMATIONS, EvmIntentExecutor, ExecuteIntentError, IntentExecutor,
    SolanaIntentExecutor,
};
pub use use_cases::execution_context::{ExecutionContext, ExecutorSlot, WalletAddresses};
pub use use_cases::local_tools::{LocalTool, LocalToolError, LocalToolKit};
pub use use_cases::route_tools::ToolRouter;
