//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: errors raised while decoding intents and chain tags

pub mod error;
