//! Wire codec for the `intent` argument of `execute_intent`.
//!
//! The argument is base64 over UTF-8 JSON. Padding is optional and both the
//! standard and URL-safe alphabets are accepted, matching how upstream
//! planners have been observed to emit intents.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;

use super::entities::IntentEnvelope;
use crate::core::error::DomainError;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode a base64 intent into an envelope with uninterpreted actions.
pub fn decode_intent(encoded: &str) -> Result<IntentEnvelope, DomainError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = match STANDARD_LENIENT.decode(&compact) {
        Ok(bytes) => bytes,
        Err(standard_err) => URL_SAFE_LENIENT
            .decode(&compact)
            .map_err(|_| DomainError::InvalidIntentEncoding(standard_err))?,
    };

    Ok(serde_json::from_slice(&bytes)?)
}

/// Encode any intent-shaped value the way planners do (standard, padded).
pub fn encode_intent<T: Serialize>(intent: &T) -> Result<String, DomainError> {
    let json = serde_json::to_vec(intent)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "id": "intent-1",
            "requestId": "request-1",
            "description": "Deposit",
            "type": "deposit",
            "input": null,
            "actions": [{"chainId": "8453", "description": "Deposit", "to": "0xa", "data": "0x"}]
        })
    }

    #[test]
    fn test_decode_standard_base64() {
        let encoded = encode_intent(&sample()).unwrap();
        let envelope = decode_intent(&encoded).unwrap();
        assert_eq!(envelope.id, "intent-1");
        assert_eq!(envelope.actions.len(), 1);
    }

    #[test]
    fn test_decode_without_padding_and_with_newlines() {
        let encoded = encode_intent(&sample()).unwrap();
        let unpadded = encoded.trim_end_matches('=');
        let wrapped = format!("{}\n{}", &unpadded[..10], &unpadded[10..]);
        assert!(decode_intent(&wrapped).is_ok());
    }

    #[test]
    fn test_decode_url_safe_alphabet() {
        let json = serde_json::to_vec(&sample()).unwrap();
        let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
        assert_eq!(decode_intent(&encoded).unwrap().request_id, "request-1");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_intent("not base64 at all!"),
            Err(DomainError::InvalidIntentEncoding(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_intent_json() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"{\"hello\": 1}");
        assert!(matches!(
            decode_intent(&encoded),
            Err(DomainError::InvalidIntentJson(_))
        ));
    }
}
