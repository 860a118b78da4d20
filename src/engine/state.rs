//! Engine State Definitions
//!
//! Record types for the global registry and per-round state.
//! Uses BTreeMap-friendly ordered keys for deterministic iteration.

use serde::{Deserialize, Serialize};

use crate::commit::SecretCommitment;
use crate::ROUND_TIMEOUT_SECS;

// =============================================================================
// ACCOUNT ID
// =============================================================================

/// Caller identity (public-key bytes).
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Create from raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short hex prefix for log output.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

// =============================================================================
// GAME KIND
// =============================================================================

/// Settlement variant, selected at round creation.
///
/// The engine dispatches on this tag, never on which value fields happen
/// to be populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum GameKind {
    /// Creator commits to a secret at creation and settles by revealing it.
    Commitment = 0,
    /// Both parties submit a score; higher score wins, creator wins ties.
    Score = 1,
}

// =============================================================================
// ROUND PHASE
// =============================================================================

/// Lifecycle phase of a round.
///
/// Derived from record fields rather than stored, so the phase can never
/// disagree with the data that defines it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Created, waiting for a second participant.
    Created,
    /// Both parties staked, waiting for reveal or scores.
    Joined,
    /// Terminal: winner determined, pot paid out.
    Settled,
    /// Terminal: deadline passed, stakes refunded.
    TimedOut,
}

// =============================================================================
// GLOBAL STATE
// =============================================================================

/// Singleton registry record tracking the total number of rounds created.
///
/// Its well-known derived address is
/// [`crate::core::address::global_state_address`]. Created once by
/// `initialize`, mutated only by `create_round`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GlobalState {
    /// Monotonic round counter; also the next round index to issue.
    pub total_rounds: u32,
}

impl GlobalState {
    /// Return the next round index and advance the counter.
    ///
    /// Callers must apply this in the same atomic step as the rest of
    /// round creation so no index is ever reused or skipped.
    pub fn next_index(&mut self) -> u32 {
        let index = self.total_rounds;
        self.total_rounds += 1;
        index
    }
}

// =============================================================================
// ROUND STATE
// =============================================================================

/// Per-round record, stored at the address derived from its index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundState {
    /// Round index, immutable, assigned at creation.
    pub index: u32,

    /// Settlement variant.
    pub kind: GameKind,

    /// Round opener; set at creation, immutable.
    pub creator: AccountId,

    /// Second participant; unset until joined, immutable once set.
    pub joiner: Option<AccountId>,

    /// Creator's commitment (Commitment rounds only); immutable once set.
    pub commitment: Option<SecretCommitment>,

    /// Creator's revealed secret or submitted score; written exactly once.
    pub creator_value: Option<u64>,

    /// Joiner's guess or submitted score; written exactly once.
    pub joiner_value: Option<u64>,

    /// Winner; unset until a terminal settlement.
    pub winner: Option<AccountId>,

    /// Monotonic false→true; true freezes all value fields.
    pub is_finished: bool,

    /// Per-party stake, fixed at creation.
    pub stake_amount: u64,

    /// Unix timestamp after which a timeout claim becomes valid.
    pub deadline: i64,

    /// Unix timestamp of creation.
    pub created_at: i64,

    /// Unix timestamp of join (if joined).
    pub joined_at: Option<i64>,
}

impl RoundState {
    /// Create a freshly opened round.
    pub fn new(
        index: u32,
        kind: GameKind,
        creator: AccountId,
        commitment: Option<SecretCommitment>,
        stake_amount: u64,
        now: i64,
        timeout_secs: i64,
    ) -> Self {
        Self {
            index,
            kind,
            creator,
            joiner: None,
            commitment,
            creator_value: None,
            joiner_value: None,
            winner: None,
            is_finished: false,
            stake_amount,
            deadline: now.saturating_add(timeout_secs),
            created_at: now,
            joined_at: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RoundPhase {
        if self.is_finished {
            if self.winner.is_some() {
                RoundPhase::Settled
            } else {
                RoundPhase::TimedOut
            }
        } else if self.joiner.is_some() {
            RoundPhase::Joined
        } else {
            RoundPhase::Created
        }
    }

    /// Is `id` one of the two parties?
    pub fn is_participant(&self, id: &AccountId) -> bool {
        self.creator == *id || self.joiner.as_ref() == Some(id)
    }

    /// Number of parties who have staked into the vault for this round.
    ///
    /// Attribution only; the vault itself keeps no per-round accounting.
    pub fn staked_parties(&self) -> u64 {
        if self.is_finished {
            0
        } else if self.joiner.is_some() {
            2
        } else {
            1
        }
    }

    /// Total pot for this round (both stakes), saturating at `u64::MAX`.
    pub fn pot(&self) -> u64 {
        self.stake_amount.saturating_mul(2)
    }
}

// =============================================================================
// ROUND CONFIG
// =============================================================================

/// Configuration for round lifecycle.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Seconds from creation until a timeout claim becomes valid.
    pub timeout_secs: i64,

    /// Smallest per-party stake a round may be created with.
    pub min_stake: u64,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            timeout_secs: ROUND_TIMEOUT_SECS,
            min_stake: 1,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_ordering() {
        let id1 = AccountId::new([0; 32]);
        let id2 = AccountId::new([1; 32]);

        assert!(id1 < id2);
    }

    #[test]
    fn test_next_index_is_sequential() {
        let mut global = GlobalState::default();

        assert_eq!(global.next_index(), 0);
        assert_eq!(global.next_index(), 1);
        assert_eq!(global.next_index(), 2);
        assert_eq!(global.total_rounds, 3);
    }

    #[test]
    fn test_phase_derivation() {
        let creator = AccountId::new([1; 32]);
        let joiner = AccountId::new([2; 32]);
        let mut round = RoundState::new(0, GameKind::Score, creator, None, 100, 1000, 3600);

        assert_eq!(round.phase(), RoundPhase::Created);
        assert_eq!(round.staked_parties(), 1);

        round.joiner = Some(joiner);
        assert_eq!(round.phase(), RoundPhase::Joined);
        assert_eq!(round.staked_parties(), 2);

        round.is_finished = true;
        assert_eq!(round.phase(), RoundPhase::TimedOut);
        assert_eq!(round.staked_parties(), 0);

        round.winner = Some(joiner);
        assert_eq!(round.phase(), RoundPhase::Settled);
    }

    #[test]
    fn test_deadline_from_creation() {
        let creator = AccountId::new([1; 32]);
        let round = RoundState::new(0, GameKind::Commitment, creator, None, 50, 500, 100);

        assert_eq!(round.created_at, 500);
        assert_eq!(round.deadline, 600);
        assert_eq!(round.pot(), 100);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let creator = AccountId::new([1; 32]);
        let round =
            RoundState::new(0, GameKind::Score, creator, None, u64::MAX, i64::MAX, 3600);

        assert_eq!(round.deadline, i64::MAX);
        assert_eq!(round.pot(), u64::MAX);
    }
}
