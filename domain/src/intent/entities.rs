//! Intent entities
//!
//! An intent arrives with untyped actions: the wire format does not say
//! which chain family an action belongs to. [`IntentEnvelope`] keeps the
//! actions as raw JSON until a [`ChainType`] is supplied, at which point
//! [`IntentEnvelope::bind`] produces a typed [`Intent`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::fee;
use crate::chain::ChainType;
use crate::core::error::DomainError;

/// Decoded intent whose actions have not been interpreted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentEnvelope {
    pub id: String,
    pub request_id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub intent_type: String,
    #[serde(default)]
    pub input: Option<serde_json::Value>,
    pub actions: Vec<serde_json::Value>,
}

/// An intent whose actions are interpreted for one chain family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent<A> {
    pub id: String,
    pub request_id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub intent_type: String,
    #[serde(default)]
    pub input: Option<serde_json::Value>,
    pub actions: Vec<A>,
}

/// Behaviour shared by every chain-specific action shape.
pub trait IntentAction: DeserializeOwned + Send + Sync {
    /// Chain family this action shape belongs to
    const CHAIN: ChainType;

    fn chain_id(&self) -> &str;

    fn description(&self) -> &str;

    /// Fee-collection actions are informational at this layer and never signed
    fn is_fee(&self) -> bool {
        fee::is_fee_description(self.description())
    }
}

/// Contract call on an EVM chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmAction {
    /// Numeric chain id as a string (e.g. "8453")
    pub chain_id: String,
    pub description: String,
    pub to: String,
    /// Hex-encoded calldata
    pub data: String,
}

/// Pre-built Solana transaction waiting for the user's signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolanaAction {
    /// Cluster tag (e.g. "mainnet-beta")
    pub chain_id: String,
    pub description: String,
    /// Base64-encoded serialized transaction
    pub payload: String,
}

/// Pre-built Sui transaction. Decodable, but no executor consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiAction {
    pub chain_id: String,
    pub description: String,
    pub payload: String,
}

impl IntentAction for EvmAction {
    const CHAIN: ChainType = ChainType::Evm;

    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl IntentAction for SolanaAction {
    const CHAIN: ChainType = ChainType::Solana;

    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl IntentAction for SuiAction {
    const CHAIN: ChainType = ChainType::Sui;

    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl IntentEnvelope {
    /// Interpret every action as `A`, preserving order.
    pub fn bind<A: IntentAction>(self) -> Result<Intent<A>, DomainError> {
        let actions = self
            .actions
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                serde_json::from_value::<A>(raw).map_err(|e| DomainError::InvalidAction {
                    index,
                    chain: A::CHAIN,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Intent {
            id: self.id,
            request_id: self.request_id,
            description: self.description,
            intent_type: self.intent_type,
            input: self.input,
            actions,
        })
    }
}

impl<A: IntentAction> Intent<A> {
    /// Actions that should be signed, in their original order.
    pub fn eligible_actions(&self) -> impl Iterator<Item = &A> {
        self.actions.iter().filter(|action| !action.is_fee())
    }

    pub fn fee_action_count(&self) -> usize {
        self.actions.iter().filter(|action| action.is_fee()).count()
    }
}
