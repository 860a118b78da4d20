//! Derived Account Addressing
//!
//! Every stateful record lives at an address that is a pure function of a
//! fixed seed tag (plus the round index for round records). Callers can
//! recompute any location without querying the engine.

use super::hash::{DomainHasher, Hash32};

/// Seed tag for the global registry record.
pub const GLOBAL_STATE_SEED: &[u8] = b"GLOBAL-STATE-SEED";

/// Seed tag for per-round records.
pub const ROUND_STATE_SEED: &[u8] = b"ROUND-STATE-SEED";

/// Seed tag for the escrow vault.
pub const VAULT_SEED: &[u8] = b"VAULT_SEED";

/// Domain separator for address derivation.
const ADDRESS_DOMAIN: &[u8] = b"WAGER_ADDRESS_V1";

/// A derived storage address (32 bytes).
pub type Address = Hash32;

/// Derive an address from a seed tag alone (singleton records).
fn derive(seed: &[u8]) -> Address {
    let mut hasher = DomainHasher::new(ADDRESS_DOMAIN);
    hasher.update_bytes(seed);
    hasher.finalize()
}

/// Address of the singleton global registry.
pub fn global_state_address() -> Address {
    derive(GLOBAL_STATE_SEED)
}

/// Address of the singleton escrow vault.
pub fn vault_address() -> Address {
    derive(VAULT_SEED)
}

/// Address of the round record for `index`.
///
/// The index is mixed in little-endian, matching the wire format used
/// everywhere else in the engine.
pub fn round_state_address(index: u32) -> Address {
    let mut hasher = DomainHasher::new(ADDRESS_DOMAIN);
    hasher.update_bytes(ROUND_STATE_SEED);
    hasher.update_u32(index);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================
