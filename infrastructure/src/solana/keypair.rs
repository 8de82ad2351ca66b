//! Solana keypair parsing

use bridge_application::ChainError;
use ed25519_dalek::{Signer, SigningKey};

/// ed25519 keypair in the form Solana wallets export it.
pub struct SolanaKeypair {
    signing_key: SigningKey,
}

impl SolanaKeypair {
    /// Accepts a base58 string of a 64-byte keypair or a 32-byte seed, or
    /// the JSON byte array written by `solana-keygen`.
    pub fn parse(secret: &str) -> Result<Self, ChainError> {
        let secret = secret.trim();
        let bytes = if secret.starts_with('[') {
            serde_json::from_str::<Vec<u8>>(secret)
                .map_err(|e| ChainError::Signing(format!("invalid Solana key array: {e}")))?
        } else {
            bs58::decode(secret)
                .into_vec()
                .map_err(|e| ChainError::Signing(format!("invalid base58 Solana key: {e}")))?
        };
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
        let signing_key = match bytes.len() {
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(bytes);
                SigningKey::from_keypair_bytes(&keypair)
                    .map_err(|e| ChainError::Signing(format!("Solana keypair mismatch: {e}")))?
            }
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(bytes);
                SigningKey::from_bytes(&seed)
            }
            n => {
                return Err(ChainError::Signing(format!(
                    "Solana key must be 32 or 64 bytes, got {n}"
                )));
            }
        };
        Ok(Self { signing_key })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Base58 public key, the wallet address
    pub fn address(&self) -> String {
        bs58::encode(self.public_key()).into_string()
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}
