//! EVM adapter
//!
//! [`EthersEvmClient`] implements the application's
//! [`EvmClient`](bridge_application::EvmClient) port on top of `ethers`.

mod client;

pub use client::EthersEvmClient;
