//! x402 payments for remote tool calls
//!
//! Without an API key the remote server answers `402 Payment Required` with
//! a list of accepted payment options. We pick the first `exact` option,
//! sign an EIP-3009 `TransferWithAuthorization` for it and resend the
//! request with the base64 payload in the `X-PAYMENT` header.

use super::error::{RemoteError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ethers::abi::{Token, encode};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, H256, U256};
use ethers::utils::{keccak256, to_checksum};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

pub const PAYMENT_HEADER: &str = "X-PAYMENT";
pub const PAYMENT_REQUIRED_HEADER: &str = "payment-required";
pub const X402_VERSION: u8 = 1;

/// Authorizations stay valid for this long
const VALIDITY_SECS: u64 = 3600;

const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";
const TRANSFER_WITH_AUTHORIZATION_TYPE: &[u8] = b"TransferWithAuthorization(address from,address to,uint256 value,uint256 validAfter,uint256 validBefore,bytes32 nonce)";

/// Body (or decoded header) of a 402 response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    #[serde(default)]
    pub x402_version: Option<u8>,
    #[serde(default)]
    pub accepts: Vec<PaymentRequirements>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentExtra {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    pub scheme: String,
    pub network: String,
    #[serde(alias = "amount")]
    pub max_amount_required: String,
    #[serde(alias = "payToAddress")]
    pub pay_to: String,
    pub asset: String,
    #[serde(default)]
    pub extra: Option<PaymentExtra>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub x402_version: u8,
    pub scheme: String,
    pub network: String,
    pub payload: ExactEvmPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExactEvmPayload {
    pub signature: String,
    pub authorization: Authorization,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorization {
    pub from: String,
    pub to: String,
    pub value: String,
    pub valid_after: String,
    pub valid_before: String,
    pub nonce: String,
}

impl PaymentPayload {
    pub fn to_header_value(&self) -> Result<String> {
        Ok(STANDARD.encode(serde_json::to_vec(self)?))
    }
}

impl PaymentRequired {
    /// Requirements from the 402 body, falling back to the base64 header.
    pub fn from_response(headers: &HeaderMap, body: &str) -> Result<Self> {
        if let Ok(required) = serde_json::from_str::<PaymentRequired>(body) {
            if !required.accepts.is_empty() {
                return Ok(required);
            }
        }

        let header = headers
            .get(PAYMENT_REQUIRED_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| RemoteError::Payment("402 response without payment requirements".into()))?;
        let decoded = STANDARD
            .decode(header.trim())
            .map_err(|e| RemoteError::Payment(format!("invalid payment-required header: {e}")))?;
        Ok(serde_json::from_slice(&decoded)?)
    }

    /// First option we know how to pay
    pub fn exact_option(&self) -> Result<&PaymentRequirements> {
        self.accepts
            .iter()
            .find(|req| req.scheme == "exact")
            .ok_or_else(|| {
                let offered: Vec<&str> = self.accepts.iter().map(|r| r.scheme.as_str()).collect();
                RemoteError::Payment(format!("no supported payment scheme offered ({offered:?})"))
            })
    }
}

/// Chain id for an x402 network name (`base`, `eip155:8453`, ...)
pub fn chain_id_for_network(network: &str) -> Option<u64> {
    if let Some(id) = network.strip_prefix("eip155:") {
        return id.parse().ok();
    }
    match network.to_ascii_lowercase().as_str() {
        "base" => Some(8453),
        "base-sepolia" => Some(84532),
        "ethereum" | "mainnet" => Some(1),
        "sepolia" => Some(11155111),
        "polygon" => Some(137),
        "optimism" => Some(10),
        "arbitrum" => Some(42161),
        "avalanche" => Some(43114),
        _ => None,
    }
}

/// Signs x402 payments with the EVM wallet.
pub struct X402Payer {
    wallet: LocalWallet,
}

impl X402Payer {
    pub fn new(wallet: LocalWallet) -> Self {
        Self { wallet }
    }

    pub fn address(&self) -> String {
        to_checksum(&self.wallet.address(), None)
    }

    /// Sign the first `exact` option and return the `X-PAYMENT` header value.
    pub fn pay(&self, required: &PaymentRequired) -> Result<String> {
        let requirements = required.exact_option()?;
        let nonce = H256::from(rand::random::<[u8; 32]>());
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| RemoteError::Payment(format!("system clock: {e}")))?
            .as_secs();

        let payload = self.sign_exact(requirements, nonce, now + VALIDITY_SECS)?;
        info!(
            amount = %requirements.max_amount_required,
            asset = %requirements.asset,
            pay_to = %requirements.pay_to,
            network = %requirements.network,
            "Signed x402 payment"
        );
        payload.to_header_value()
    }

    fn sign_exact(
        &self,
        requirements: &PaymentRequirements,
        nonce: H256,
        valid_before: u64,
    ) -> Result<PaymentPayload> {
        let chain_id = chain_id_for_network(&requirements.network).ok_or_else(|| {
            RemoteError::Payment(format!("unsupported payment network: {}", requirements.network))
        })?;
        let asset: Address = parse_address("asset", &requirements.asset)?;
        let pay_to: Address = parse_address("payTo", &requirements.pay_to)?;
        let value = U256::from_dec_str(&requirements.max_amount_required)
            .map_err(|e| RemoteError::Payment(format!("invalid amount: {e}")))?;

        let extra = requirements.extra.clone().unwrap_or_default();
        let name = extra.name.unwrap_or_else(|| "USD Coin".to_string());
        let version = extra.version.unwrap_or_else(|| "2".to_string());

        let from = self.wallet.address();
        let struct_hash = keccak256(encode(&[
            Token::FixedBytes(keccak256(TRANSFER_WITH_AUTHORIZATION_TYPE).to_vec()),
            Token::Address(from),
            Token::Address(pay_to),
            Token::Uint(value),
            Token::Uint(U256::zero()),
            Token::Uint(U256::from(valid_before)),
            Token::FixedBytes(nonce.as_bytes().to_vec()),
        ]));
        let digest = typed_data_digest(&name, &version, chain_id, asset, struct_hash);

        let signature = self
            .wallet
            .sign_hash(H256::from(digest))
            .map_err(|e| RemoteError::Payment(format!("signing failed: {e}")))?;

        Ok(PaymentPayload {
            x402_version: X402_VERSION,
            scheme: requirements.scheme.clone(),
            network: requirements.network.clone(),
            payload: ExactEvmPayload {
                signature: format!("0x{}", hex::encode(signature.to_vec())),
                authorization: Authorization {
                    from: to_checksum(&from, None),
                    to: to_checksum(&pay_to, None),
                    value: value.to_string(),
                    valid_after: "0".to_string(),
                    valid_before: valid_before.to_string(),
                    nonce: format!("{nonce:?}"),
                },
            },
        })
    }
}

/// keccak256("\x19\x01" ‖ domainSeparator ‖ structHash)
fn typed_data_digest(
    name: &str,
    version: &str,
    chain_id: u64,
    verifying_contract: Address,
    struct_hash: [u8; 32],
) -> [u8; 32] {
    let separator = keccak256(encode(&[
        Token::FixedBytes(keccak256(DOMAIN_TYPE).to_vec()),
        Token::FixedBytes(keccak256(name.as_bytes()).to_vec()),
        Token::FixedBytes(keccak256(version.as_bytes()).to_vec()),
        Token::Uint(U256::from(chain_id)),
        Token::Address(verifying_contract),
    ]));

    let mut message = Vec::with_capacity(66);
    message.extend_from_slice(&[0x19, 0x01]);
    message.extend_from_slice(&separator);
    message.extend_from_slice(&struct_hash);
    keccak256(message)
}

fn parse_address(field: &str, value: &str) -> Result<Address> {
    value
        .parse()
        .map_err(|e| RemoteError::Payment(format!("invalid {field} address {value}: {e}")))
}
