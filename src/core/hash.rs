//! Domain-Separated Hashing
//!
//! Provides deterministic hashing for:
//! - Secret commitments (commit/reveal fairness)
//! - Derived account addressing

use sha2::{Digest, Sha256};

/// Hash output type (256 bits / 32 bytes)
pub type Hash32 = [u8; 32];

/// Deterministic hasher with a mandatory domain separator.
///
/// Wraps SHA-256 with helpers for the engine's primitive types.
/// Order of updates is critical for determinism.
pub struct DomainHasher {
    hasher: Sha256,
}

impl DomainHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an i64 value (little-endian).
    #[inline]
    pub fn update_i64(&mut self, value: i64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Hash32 {
        self.hasher.finalize().into()
    }
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let make_hash = || {
            let mut hasher = DomainHasher::new(b"test");
            hasher.update_u32(100);
            hasher.update_u64(12345);
            hasher.update_i64(-7);
            hasher.update_bool(true);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = DomainHasher::new(b"test");
            h.update_u32(1);
            h.update_u32(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = DomainHasher::new(b"test");
            h.update_u32(2);
            h.update_u32(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let data = [1u8, 2, 3, 4];

        let hash1 = hash_with_domain(b"DOMAIN_A", &data);
        let hash2 = hash_with_domain(b"DOMAIN_B", &data);

        assert_ne!(hash1, hash2);
    }
}
