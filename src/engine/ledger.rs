//! Round Engine Operations
//!
//! The authoritative state machine driving rounds through
//! `Created → Joined → Settled`, with `TimedOut` reachable from either
//! non-terminal phase.
//!
//! Operations execute serially: each one re-validates every guard against
//! current state at execution time, then either commits fully or fails
//! with no effect. All guards run before any mutation, so a transfer can
//! never commit without the state transition that authorizes it.

use std::collections::BTreeMap;

use tracing::info;

use crate::commit::SecretCommitment;
use crate::core::address::{round_state_address, Address};

use super::error::EngineError;
use super::events::{RoundEvent, RoundEventData};
use super::state::{AccountId, GameKind, GlobalState, RoundConfig, RoundState};
use super::vault::{Balances, Vault};

/// The wager ledger: registry, round records, escrow vault and the
/// balances capability, mutated only through the operations below.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    config: RoundConfig,
    global: Option<GlobalState>,
    rounds: BTreeMap<Address, RoundState>,
    balances: Balances,
    vault: Vault,
    pending_events: Vec<RoundEvent>,
}

impl Ledger {
    /// Create an empty ledger with the given round configuration.
    pub fn new(config: RoundConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // =========================================================================
    // FUNDS CAPABILITY
    // =========================================================================

    /// Credit an account balance (host-ledger funding, e.g. an airdrop).
    pub fn fund(&mut self, account: AccountId, amount: u64) {
        self.balances.credit(account, amount);
    }

    /// Current balance of an account.
    pub fn balance(&self, account: &AccountId) -> u64 {
        self.balances.balance(account)
    }

    /// Total funds currently escrowed in the vault.
    pub fn vault_escrowed(&self) -> u64 {
        self.vault.escrowed()
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Create the global registry with `total_rounds = 0`.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.global.is_some() {
            return Err(EngineError::AlreadyInitialized);
        }
        self.global = Some(GlobalState::default());
        info!("registry initialized");
        Ok(())
    }

    /// Open a new round, escrowing the creator's stake.
    ///
    /// `index` must equal the registry counter; `commitment` must be
    /// present exactly when `kind` is [`GameKind::Commitment`]. The
    /// deadline is fixed at `now + timeout`.
    pub fn create_round(
        &mut self,
        caller: AccountId,
        index: u32,
        kind: GameKind,
        commitment: Option<SecretCommitment>,
        stake_amount: u64,
        now: i64,
    ) -> Result<(), EngineError> {
        let global = self.global.as_ref().ok_or(EngineError::NotInitialized)?;
        if index != global.total_rounds {
            return Err(EngineError::InvalidIndex);
        }
        match kind {
            GameKind::Commitment if commitment.is_none() => {
                return Err(EngineError::GameKindMismatch)
            }
            GameKind::Score if commitment.is_some() => return Err(EngineError::GameKindMismatch),
            _ => {}
        }
        if stake_amount < self.config.min_stake {
            return Err(EngineError::StakeTooLow);
        }
        if self.balances.balance(&caller) < stake_amount {
            return Err(EngineError::InsufficientFunds);
        }

        // Guards passed: escrow, record allocation and index bump commit
        // as one step.
        self.vault.deposit(&mut self.balances, &caller, stake_amount)?;
        let issued = self
            .global
            .as_mut()
            .ok_or(EngineError::NotInitialized)?
            .next_index();
        debug_assert_eq!(issued, index);
        let round = RoundState::new(
            index,
            kind,
            caller,
            commitment,
            stake_amount,
            now,
            self.config.timeout_secs,
        );
        let deadline = round.deadline;
        self.rounds.insert(round_state_address(index), round);

        info!(
            index,
            creator = %caller.short_hex(),
            ?kind,
            stake_amount,
            deadline,
            "round created"
        );
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::RoundCreated {
                creator: caller,
                kind,
                stake_amount,
                deadline,
            },
        ));
        Ok(())
    }

    /// Join an open round, matching the creator's stake.
    ///
    /// `value` is the joiner's guess (Commitment rounds) or score (Score
    /// rounds); it may be omitted and is written at most once.
    pub fn join_round(
        &mut self,
        caller: AccountId,
        index: u32,
        value: Option<u64>,
        now: i64,
    ) -> Result<(), EngineError> {
        let round = self
            .rounds
            .get_mut(&round_state_address(index))
            .ok_or(EngineError::RoundNotFound)?;
        if round.is_finished || round.joiner.is_some() {
            return Err(EngineError::RoundNotJoinable);
        }
        if round.creator == caller {
            return Err(EngineError::Unauthorized);
        }
        if now > round.deadline {
            return Err(EngineError::DeadlineExceeded);
        }
        if self.balances.balance(&caller) < round.stake_amount {
            return Err(EngineError::InsufficientFunds);
        }

        self.vault
            .deposit(&mut self.balances, &caller, round.stake_amount)?;
        round.joiner = Some(caller);
        round.joiner_value = value;
        round.joined_at = Some(now);

        info!(index, joiner = %caller.short_hex(), "round joined");
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::RoundJoined { joiner: caller },
        ));
        Ok(())
    }

    /// Reveal the creator's secret and settle a Commitment round.
    ///
    /// A mismatched secret fails with [`EngineError::CommitmentMismatch`]
    /// and leaves the round untouched; the creator may retry until the
    /// deadline. Only an expired deadline forfeits funds.
    pub fn reveal(
        &mut self,
        caller: AccountId,
        index: u32,
        secret: u64,
        now: i64,
    ) -> Result<AccountId, EngineError> {
        let round = self
            .rounds
            .get_mut(&round_state_address(index))
            .ok_or(EngineError::RoundNotFound)?;
        if round.kind != GameKind::Commitment {
            return Err(EngineError::GameKindMismatch);
        }
        if round.creator != caller {
            return Err(EngineError::Unauthorized);
        }
        if round.is_finished {
            return Err(EngineError::AlreadyFinished);
        }
        let joiner = round.joiner.ok_or(EngineError::NoJoiner)?;
        if now > round.deadline {
            return Err(EngineError::DeadlineExceeded);
        }
        let commitment = round.commitment.ok_or(EngineError::GameKindMismatch)?;
        if !commitment.verify(secret) {
            return Err(EngineError::CommitmentMismatch);
        }

        round.creator_value = Some(secret);
        let winner = commitment_winner(round.creator, joiner, round.joiner_value, secret);
        let pot = round.pot();
        round.winner = Some(winner);
        round.is_finished = true;
        self.vault.payout(&mut self.balances, winner, pot);

        info!(
            index,
            secret,
            winner = %winner.short_hex(),
            payout = pot,
            "round settled by reveal"
        );
        self.pending_events
            .push(RoundEvent::new(index, RoundEventData::SecretRevealed { secret }));
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::RoundSettled { winner, payout: pot },
        ));
        Ok(winner)
    }

    /// Record a party's score on a Score round, settling once both slots
    /// are filled.
    ///
    /// Each party writes only their own slot, exactly once. Returns the
    /// winner when this call triggered settlement.
    pub fn submit_score(
        &mut self,
        caller: AccountId,
        index: u32,
        score: u64,
        now: i64,
    ) -> Result<Option<AccountId>, EngineError> {
        let round = self
            .rounds
            .get_mut(&round_state_address(index))
            .ok_or(EngineError::RoundNotFound)?;
        if round.kind != GameKind::Score {
            return Err(EngineError::GameKindMismatch);
        }
        if round.is_finished {
            return Err(EngineError::AlreadyFinished);
        }
        let joiner = round.joiner.ok_or(EngineError::NoJoiner)?;
        if now > round.deadline {
            return Err(EngineError::DeadlineExceeded);
        }
        let slot = if round.creator == caller {
            &mut round.creator_value
        } else if joiner == caller {
            &mut round.joiner_value
        } else {
            return Err(EngineError::Unauthorized);
        };
        // Single writer per slot: a second write is an authorization
        // failure, not an update.
        if slot.is_some() {
            return Err(EngineError::Unauthorized);
        }
        *slot = Some(score);

        info!(index, player = %caller.short_hex(), score, "score submitted");
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::ScoreSubmitted { player: caller, score },
        ));

        let (Some(creator_score), Some(joiner_score)) = (round.creator_value, round.joiner_value)
        else {
            return Ok(None);
        };

        // Both slots filled: settle. Higher score wins, creator wins ties.
        let winner = if creator_score >= joiner_score {
            round.creator
        } else {
            joiner
        };
        let pot = round.pot();
        round.winner = Some(winner);
        round.is_finished = true;
        self.vault.payout(&mut self.balances, winner, pot);

        info!(
            index,
            creator_score,
            joiner_score,
            winner = %winner.short_hex(),
            payout = pot,
            "round settled by score"
        );
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::RoundSettled { winner, payout: pot },
        ));
        Ok(Some(winner))
    }

    /// Terminate a stalled round after its deadline, refunding stakes.
    ///
    /// Never joined: the creator's own stake comes back. Joined but
    /// unsettled: each party's own stake comes back, both in this call.
    /// Idempotence: a second claim fails with `AlreadyFinished`.
    pub fn claim_timeout(
        &mut self,
        caller: AccountId,
        index: u32,
        now: i64,
    ) -> Result<(), EngineError> {
        let round = self
            .rounds
            .get_mut(&round_state_address(index))
            .ok_or(EngineError::RoundNotFound)?;
        if !round.is_participant(&caller) {
            return Err(EngineError::Unauthorized);
        }
        if round.is_finished {
            return Err(EngineError::AlreadyFinished);
        }
        // Evaluated against the execution-time clock, never submission time.
        if now <= round.deadline {
            return Err(EngineError::DeadlineExceeded);
        }

        let stake = round.stake_amount;
        let joiner = round.joiner;
        round.is_finished = true;
        self.vault.payout(&mut self.balances, round.creator, stake);
        let mut refunded = stake;
        if let Some(joiner) = joiner {
            self.vault.payout(&mut self.balances, joiner, stake);
            refunded += stake;
        }

        info!(
            index,
            claimed_by = %caller.short_hex(),
            refunded,
            "round timed out"
        );
        self.pending_events.push(RoundEvent::new(
            index,
            RoundEventData::RoundTimedOut {
                claimed_by: caller,
                refunded,
            },
        ));
        Ok(())
    }

    // =========================================================================
    // READ-ONLY SNAPSHOTS
    // =========================================================================

    /// Read-only snapshot of the global registry (if initialized).
    pub fn fetch_global(&self) -> Option<&GlobalState> {
        self.global.as_ref()
    }

    /// Read-only snapshot of a round record by index.
    pub fn fetch_round(&self, index: u32) -> Option<&RoundState> {
        self.fetch_round_at(&round_state_address(index))
    }

    /// Read-only snapshot of a round record by its derived address, as
    /// computed by [`round_state_address`].
    pub fn fetch_round_at(&self, address: &Address) -> Option<&RoundState> {
        self.rounds.get(address)
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Winner rule for Commitment rounds.
///
/// The joiner's guess (zero when absent) is compared against the revealed
/// secret by parity: matching parity keeps the pot with the creator,
/// differing parity hands it to the joiner. Pure and total; no ties.
fn commitment_winner(
    creator: AccountId,
    joiner: AccountId,
    guess: Option<u64>,
    secret: u64,
) -> AccountId {
    if (secret ^ guess.unwrap_or(0)) & 1 == 0 {
        creator
    } else {
        joiner
    }
}

// =============================================================================
// TESTS
// =============================================================================
