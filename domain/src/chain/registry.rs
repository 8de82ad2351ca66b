//! Static registry of known EVM chains, keyed by numeric chain id.
//!
//! The registry is a pure lookup. A missing entry is returned as `None` and
//! handed to the signer unchanged; it is up to the signing layer to decide
//! whether it can proceed without metadata.

/// Metadata for a single EVM chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainMetadata {
    pub id: u64,
    pub name: &'static str,
}

const fn chain(id: u64, name: &'static str) -> ChainMetadata {
    ChainMetadata { id, name }
}

static KNOWN_CHAINS: &[ChainMetadata] = &[
    chain(1, "Ethereum"),
    chain(10, "OP Mainnet"),
    chain(56, "BNB Smart Chain"),
    chain(100, "Gnosis"),
    chain(137, "Polygon"),
    chain(324, "ZKsync Era"),
    chain(5000, "Mantle"),
    chain(8453, "Base"),
    chain(42161, "Arbitrum One"),
    chain(42220, "Celo"),
    chain(43114, "Avalanche"),
    chain(59144, "Linea"),
    chain(81457, "Blast"),
    chain(534352, "Scroll"),
    chain(84532, "Base Sepolia"),
    chain(421614, "Arbitrum Sepolia"),
    chain(11155111, "Sepolia"),
];

/// Look up a chain by numeric id.
pub fn lookup(chain_id: u64) -> Option<&'static ChainMetadata> {
    KNOWN_CHAINS.iter().find(|c| c.id == chain_id)
}

/// Look up a chain by the numeric-as-string id carried on EVM actions.
///
/// Non-numeric ids resolve to `None` just like unknown numeric ids.
pub fn lookup_str(chain_id: &str) -> Option<&'static ChainMetadata> {
    chain_id.trim().parse::<u64>().ok().and_then(lookup)
}
