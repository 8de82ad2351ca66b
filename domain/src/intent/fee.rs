//! Fee-action detection.
//!
//! Upstream planners bundle protocol fee collection into intents. Those
//! actions are never routed through the user's signer.

/// Marker that identifies a fee action, matched case-insensitively anywhere
/// in the action description.
pub const FEE_MARKER: &str = "blueprint fee";

pub fn is_fee_description(description: &str) -> bool {
    description.to_lowercase().contains(FEE_MARKER)
}
