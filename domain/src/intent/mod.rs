//! Intent domain module
//!
//! An **intent** is an externally planned bundle of blockchain actions that
//! the user's own wallet must sign. The bridge never builds intents; it only
//! executes them.
//!
//! ```text
//! base64 string ──decode_intent──▶ IntentEnvelope ──bind::<A>──▶ Intent<A>
//!                                  (raw actions)     (chain tag)  (typed actions)
//!                                                                    │
//!                                              eligible_actions() ◀──┘
//!                                              (fee actions dropped)
//! ```
//!
//! Executing an `Intent<A>` yields one [`Transaction`] per eligible action,
//! in order.

pub mod codec;
pub mod entities;
pub mod fee;
pub mod value_objects;

pub use codec::{decode_intent, encode_intent};
pub use entities::{
    EvmAction, Intent, IntentAction, IntentEnvelope, SolanaAction, SuiAction,
};
pub use fee::{FEE_MARKER, is_fee_description};
pub use value_objects::{Transaction, TransactionStatus};
