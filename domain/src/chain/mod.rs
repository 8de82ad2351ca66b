//! Chain families and EVM chain metadata
//!
//! - [`ChainType`]: the chain family tag (`evm`, `solana`, `sui`) that selects
//!   which executor interprets an intent
//! - [`registry`]: static numeric id → [`ChainMetadata`] table used to
//!   parameterize EVM signing

pub mod chain_type;
pub mod registry;

pub use chain_type::ChainType;
pub use registry::ChainMetadata;
