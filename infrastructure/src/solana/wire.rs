//! Solana transaction wire format
//!
//! ```text
//! transaction = compact-u16 n ‖ n × 64-byte signature ‖ message
//! message     = [0x80 | version]? ‖ header(3) ‖ compact-u16 k ‖ k × 32-byte key ‖ ...
//! ```
//!
//! Only the parts needed to place our signature are parsed; the message
//! bytes are signed as-is.

use bridge_application::ChainError;

const SIGNATURE_LEN: usize = 64;
const PUBKEY_LEN: usize = 32;
const VERSION_PREFIX_MASK: u8 = 0x80;

/// A serialized transaction with its signature slots located.
#[derive(Debug, Clone)]
pub struct WireTransaction {
    bytes: Vec<u8>,
    signatures_offset: usize,
    signature_count: usize,
    message_offset: usize,
    signers: Vec<[u8; PUBKEY_LEN]>,
}

impl WireTransaction {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, ChainError> {
        let (signature_count, signatures_offset) = read_compact_u16(&bytes, 0)?;
        let message_offset = signatures_offset + signature_count * SIGNATURE_LEN;
        if bytes.len() < message_offset {
            return Err(invalid("truncated signatures"));
        }

        let mut cursor = message_offset;
        if byte_at(&bytes, cursor)? & VERSION_PREFIX_MASK != 0 {
            cursor += 1;
        }
        let required_signatures = byte_at(&bytes, cursor)? as usize;
        cursor += 3;

        let (key_count, keys_offset) = read_compact_u16(&bytes, cursor)?;
        if required_signatures > key_count {
            return Err(invalid("more required signers than account keys"));
        }
        if keys_offset + key_count * PUBKEY_LEN > bytes.len() {
            return Err(invalid("truncated account keys"));
        }
        if signature_count != required_signatures {
            return Err(invalid(&format!(
                "{signature_count} signature slots for {required_signatures} required signers"
            )));
        }

        let signers = (0..required_signatures)
            .map(|i| {
                let start = keys_offset + i * PUBKEY_LEN;
                let mut key = [0u8; PUBKEY_LEN];
                key.copy_from_slice(&bytes[start..start + PUBKEY_LEN]);
                key
            })
            .collect();

        Ok(Self {
            bytes,
            signatures_offset,
            signature_count,
            message_offset,
            signers,
        })
    }

    /// The bytes every signer signs
    pub fn message(&self) -> &[u8] {
        &self.bytes[self.message_offset..]
    }

    /// Slot index of `pubkey` among the required signers
    pub fn signer_index(&self, pubkey: &[u8; PUBKEY_LEN]) -> Option<usize> {
        self.signers.iter().position(|key| key == pubkey)
    }

    pub fn set_signature(&mut self, index: usize, signature: &[u8; SIGNATURE_LEN]) -> Result<(), ChainError> {
        if index >= self.signature_count {
            return Err(invalid("signature slot out of range"));
        }
        let start = self.signatures_offset + index * SIGNATURE_LEN;
        self.bytes[start..start + SIGNATURE_LEN].copy_from_slice(signature);
        Ok(())
    }

    pub fn signature(&self, index: usize) -> Option<&[u8]> {
        (index < self.signature_count).then(|| {
            let start = self.signatures_offset + index * SIGNATURE_LEN;
            &self.bytes[start..start + SIGNATURE_LEN]
        })
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decode a compact-u16 at `offset`, returning the value and the offset after it.
pub fn read_compact_u16(bytes: &[u8], offset: usize) -> Result<(usize, usize), ChainError> {
    let mut value = 0usize;
    for i in 0..3 {
        let byte = byte_at(bytes, offset + i)?;
        value |= ((byte & 0x7f) as usize) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, offset + i + 1));
        }
    }
    Err(invalid("compact-u16 longer than 3 bytes"))
}

fn byte_at(bytes: &[u8], offset: usize) -> Result<u8, ChainError> {
    bytes
        .get(offset)
        .copied()
        .ok_or_else(|| invalid("unexpected end of transaction"))
}

fn invalid(reason: &str) -> ChainError {
    ChainError::InvalidPayload(format!("malformed Solana transaction: {reason}"))
}
