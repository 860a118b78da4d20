//! Round Lifecycle Events
//!
//! Events generated by engine operations, consumable by callers for
//! logging and audit trails.

use serde::{Deserialize, Serialize};

use super::state::{AccountId, GameKind};

/// Event data for a round transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEventData {
    /// A round was opened and the creator's stake escrowed.
    RoundCreated {
        creator: AccountId,
        kind: GameKind,
        stake_amount: u64,
        deadline: i64,
    },

    /// A second party joined and matched the stake.
    RoundJoined { joiner: AccountId },

    /// The creator's secret was revealed and verified.
    SecretRevealed { secret: u64 },

    /// A party recorded their score.
    ScoreSubmitted { player: AccountId, score: u64 },

    /// The round settled; the pot was paid to the winner.
    RoundSettled { winner: AccountId, payout: u64 },

    /// The round timed out; stakes were refunded.
    RoundTimedOut {
        claimed_by: AccountId,
        refunded: u64,
    },
}

/// A round lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEvent {
    /// Round index the event belongs to.
    pub index: u32,
    /// What happened.
    pub data: RoundEventData,
}

impl RoundEvent {
    /// Create an event for a round.
    pub fn new(index: u32, data: RoundEventData) -> Self {
        Self { index, data }
    }
}
