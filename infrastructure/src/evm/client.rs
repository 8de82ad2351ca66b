//! ethers-backed EVM client

use async_trait::async_trait;
use bridge_application::{ChainError, EvmClient, EvmReceipt, EvmTransactionRequest, ReceiptStatus};
use bridge_domain::ChainMetadata;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, PendingTransaction, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::transaction::eip1559::Eip1559TransactionRequest;
use ethers::types::{Address, Bytes, H256, U64};
use ethers::utils::to_checksum;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

/// Signs with one local key and talks to the configured RPC only.
///
/// The wallet is bound to the RPC's chain. An action for any other known
/// chain is refused before anything is signed.
pub struct EthersEvmClient {
    wallet: LocalWallet,
    provider: Provider<Http>,
    chain_id: u64,
}

impl EthersEvmClient {
    /// Parse the key and ask the RPC for its chain id.
    pub async fn connect(private_key: &SecretString, rpc_url: &str) -> Result<Self, ChainError> {
        let wallet: LocalWallet = private_key
            .expose_secret()
            .parse()
            .map_err(|e| ChainError::Signing(format!("invalid EVM private key: {e}")))?;
        let provider = http_provider(rpc_url)?;
        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| ChainError::Transport(format!("{rpc_url}: {e}")))?
            .as_u64();

        info!(chain_id, address = %to_checksum(&wallet.address(), None), "EVM wallet ready");

        Ok(Self {
            wallet: wallet.with_chain_id(chain_id),
            provider,
            chain_id,
        })
    }

    /// The signing wallet, bound to the RPC's chain id
    pub fn wallet(&self) -> &LocalWallet {
        &self.wallet
    }

}

/// Chain id to sign for, given the chain resolved for an action.
///
/// Unknown chains fall back to the wallet's chain; a known chain other than
/// the wallet's is a signing error.
fn signing_chain(wallet_chain_id: u64, chain: Option<&ChainMetadata>) -> Result<u64, ChainError> {
    match chain {
        Some(meta) if meta.id != wallet_chain_id => Err(ChainError::Signing(format!(
            "chain mismatch: action targets {} ({}) but the wallet is connected to chain {}",
            meta.name, meta.id, wallet_chain_id
        ))),
        _ => Ok(wallet_chain_id),
    }
}

fn http_provider(url: &str) -> Result<Provider<Http>, ChainError> {
    Provider::<Http>::try_from(url)
        .map_err(|e| ChainError::Transport(format!("invalid RPC URL {url}: {e}")))
}

#[async_trait]
impl EvmClient for EthersEvmClient {
    fn address(&self) -> String {
        to_checksum(&self.wallet.address(), None)
    }

    async fn send_transaction(
        &self,
        request: EvmTransactionRequest<'_>,
    ) -> Result<String, ChainError> {
        let chain_id = signing_chain(self.chain_id, request.chain)?;
        let to: Address = request
            .to
            .parse()
            .map_err(|e| ChainError::InvalidPayload(format!("invalid 'to' address {}: {e}", request.to)))?;
        let data: Bytes = request
            .data
            .parse()
            .map_err(|e| ChainError::InvalidPayload(format!("invalid calldata: {e}")))?;

        let signer = SignerMiddleware::new(self.provider.clone(), self.wallet.clone());

        let tx = Eip1559TransactionRequest::new()
            .from(self.wallet.address())
            .to(to)
            .data(data)
            .chain_id(chain_id);

        debug!(chain_id, to = %request.to, "Sending EVM transaction");
        let pending = signer
            .send_transaction(tx, None)
            .await
            .map_err(|e| ChainError::Submission(e.to_string()))?;
        let hash = pending.tx_hash();

        Ok(format!("{hash:?}"))
    }

    async fn wait_for_transaction_receipt(
        &self,
        hash: &str,
        confirmations: u64,
    ) -> Result<EvmReceipt, ChainError> {
        let tx_hash: H256 = hash
            .parse()
            .map_err(|e| ChainError::InvalidPayload(format!("invalid transaction hash {hash}: {e}")))?;
        let receipt = PendingTransaction::new(tx_hash, &self.provider)
            .confirmations(confirmations as usize)
            .await
            .map_err(|e| ChainError::Confirmation(e.to_string()))?
            .ok_or_else(|| ChainError::Confirmation(format!("transaction {hash} was dropped")))?;

        let status = if receipt.status == Some(U64::from(1)) {
            ReceiptStatus::Success
        } else {
            ReceiptStatus::Reverted
        };
        debug!(hash, ?status, block = ?receipt.block_number, "EVM receipt");

        Ok(EvmReceipt { status })
    }
}
