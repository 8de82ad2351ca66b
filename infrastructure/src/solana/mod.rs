//! Solana adapter
//!
//! [`RpcSolanaClient`] implements the
//! [`SolanaClient`](bridge_application::SolanaClient) port with a base58
//! keypair, the transaction wire format and the cluster's JSON-RPC API.

mod client;
mod keypair;
mod wire;

pub use client::{DEFAULT_CONFIRM_TIMEOUT, DEFAULT_POLL_INTERVAL, RpcSolanaClient};
pub use keypair::SolanaKeypair;
