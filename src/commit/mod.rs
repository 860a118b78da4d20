//! Secret Commitment Scheme
//!
//! The creator of a reveal-variant round binds themselves to a secret
//! value before the joiner stakes. The commitment is published at round
//! creation and cannot be changed; the secret is checked against it at
//! reveal time.

use serde::{Deserialize, Serialize};

use crate::core::hash::{DomainHasher, Hash32};

/// Domain separator for secret commitments.
const COMMITMENT_DOMAIN: &[u8] = b"WAGER_COMMIT_V1";

/// A commitment to a secret value, published before the round is joined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretCommitment(pub Hash32);

impl SecretCommitment {
    /// Commit to a secret value.
    pub fn from_secret(secret: u64) -> Self {
        Self(compute_commitment(secret))
    }

    /// Verify that a revealed secret matches this commitment.
    pub fn verify(&self, secret: u64) -> bool {
        compute_commitment(secret) == self.0
    }

    /// Raw hash bytes.
    pub fn as_bytes(&self) -> &Hash32 {
        &self.0
    }
}

/// Compute the commitment hash for a secret.
///
/// Domain-separated SHA-256 over the little-endian secret. The encoding
/// is part of the protocol: reveal recomputes exactly this.
pub fn compute_commitment(secret: u64) -> Hash32 {
    let mut hasher = DomainHasher::new(COMMITMENT_DOMAIN);
    hasher.update_u64(secret);
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_commitment_determinism() {
        let c1 = SecretCommitment::from_secret(42);
        let c2 = SecretCommitment::from_secret(42);

        assert_eq!(c1, c2);
        assert!(c1.verify(42));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let commitment = SecretCommitment::from_secret(42);

        assert!(!commitment.verify(99));
        assert!(!commitment.verify(0));
    }

    #[test]
    fn test_commitment_hides_secret_encoding() {
        // The raw hash must not equal an undomained hash of the secret.
        let commitment = SecretCommitment::from_secret(7);
        let bare = crate::core::hash::hash_with_domain(b"", &7u64.to_le_bytes());

        assert_ne!(*commitment.as_bytes(), bare);
    }

    proptest! {
        #[test]
        fn prop_commitment_round_trip(secret in any::<u64>()) {
            let commitment = SecretCommitment::from_secret(secret);
            prop_assert!(commitment.verify(secret));
        }

        #[test]
        fn prop_distinct_secrets_distinct_commitments(a in any::<u64>(), b in any::<u64>()) {
            prop_assume!(a != b);
            prop_assert_ne!(compute_commitment(a), compute_commitment(b));
        }
    }
}
