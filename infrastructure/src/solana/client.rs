//! Solana JSON-RPC client

use super::keypair::SolanaKeypair;
use super::wire::WireTransaction;
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bridge_application::{ChainError, SolanaClient, SolanaConfirmation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// Interval between `getSignatureStatuses` polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Give up waiting once a blockhash would have expired
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    #[serde(default)]
    err: Option<Value>,
    #[serde(default)]
    confirmation_status: Option<String>,
}

impl SignatureStatus {
    fn is_confirmed(&self) -> bool {
        matches!(
            self.confirmation_status.as_deref(),
            Some("confirmed") | Some("finalized")
        )
    }
}

/// Co-signs and submits pre-built transactions over plain JSON-RPC.
pub struct RpcSolanaClient {
    http: reqwest::Client,
    rpc_url: String,
    keypair: SolanaKeypair,
    next_id: AtomicU64,
    poll_interval: Duration,
    confirm_timeout: Duration,
}

impl RpcSolanaClient {
    pub fn new(private_key: &SecretString, rpc_url: impl Into<String>) -> Result<Self, ChainError> {
        let keypair = SolanaKeypair::parse(private_key.expose_secret())?;
        info!(address = %keypair.address(), "Solana wallet ready");
        Ok(Self {
            http: reqwest::Client::new(),
            rpc_url: rpc_url.into(),
            keypair,
            next_id: AtomicU64::new(1),
            poll_interval: DEFAULT_POLL_INTERVAL,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        })
    }

    /// Decode a base64 transaction and put our signature into its slot.
    pub fn sign_payload(&self, payload: &str) -> Result<Vec<u8>, ChainError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ChainError::InvalidPayload(format!("transaction is not base64: {e}")))?;
        let mut tx = WireTransaction::parse(bytes)?;

        let index = tx.signer_index(&self.keypair.public_key()).ok_or_else(|| {
            ChainError::Signing(format!(
                "{} is not a required signer of this transaction",
                self.keypair.address()
            ))
        })?;
        let signature = self.keypair.sign(tx.message());
        tx.set_signature(index, &signature)?;

        Ok(tx.into_bytes())
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let body = json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params});

        let response: RpcResponse = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| ChainError::Transport(format!("invalid {method} response: {e}")))?;

        if let Some(error) = response.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result.unwrap_or(Value::Null))
    }

    async fn signature_status(&self, signature: &str) -> Result<Option<SignatureStatus>, ChainError> {
        let result = self
            .rpc("getSignatureStatuses", json!([[signature]]))
            .await?;
        let status = result
            .get("value")
            .and_then(|v| v.get(0))
            .cloned()
            .unwrap_or(Value::Null);
        if status.is_null() {
            return Ok(None);
        }
        serde_json::from_value(status)
            .map(Some)
            .map_err(|e| ChainError::Confirmation(format!("unexpected signature status: {e}")))
    }
}

#[async_trait]
impl SolanaClient for RpcSolanaClient {
    fn address(&self) -> String {
        self.keypair.address()
    }

    async fn sign_and_send_transaction(&self, payload: &str) -> Result<String, ChainError> {
        let signed = self.sign_payload(payload)?;
        let result = self
            .rpc(
                "sendTransaction",
                json!([
                    STANDARD.encode(signed),
                    {"encoding": "base64", "preflightCommitment": "confirmed"}
                ]),
            )
            .await
            .map_err(|e| match e {
                ChainError::Rpc { code, message } => {
                    ChainError::Submission(format!("{message} (code {code})"))
                }
                other => other,
            })?;

        let signature = result
            .as_str()
            .ok_or_else(|| ChainError::Submission("sendTransaction returned no signature".into()))?
            .to_string();
        debug!(signature = %signature, "Solana transaction sent");
        Ok(signature)
    }

    async fn confirm_transaction(&self, signature: &str) -> Result<SolanaConfirmation, ChainError> {
        let confirm = async {
            loop {
                if let Some(status) = self.signature_status(signature).await? {
                    if status.is_confirmed() {
                        return Ok::<_, ChainError>(SolanaConfirmation { err: status.err });
                    }
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(self.confirm_timeout, confirm)
            .await
            .map_err(|_| {
                ChainError::Confirmation(format!(
                    "{signature} not confirmed within {}s",
                    self.confirm_timeout.as_secs()
                ))
            })?
    }
}
