//! Engine Error Taxonomy
//!
//! Every guard violation maps to exactly one named error. A failed
//! operation has no effect; retries are the caller's responsibility.

use thiserror::Error;

/// Errors surfaced by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The registry was already created.
    #[error("already initialized")]
    AlreadyInitialized,

    /// The registry has not been created yet.
    #[error("not initialized")]
    NotInitialized,

    /// Supplied round index does not match the registry counter.
    #[error("invalid round index")]
    InvalidIndex,

    /// No round record exists at the given index.
    #[error("round not found")]
    RoundNotFound,

    /// Round is not in the Created phase or already has a joiner.
    #[error("round not joinable")]
    RoundNotJoinable,

    /// The deadline check for this operation failed.
    #[error("deadline check failed")]
    DeadlineExceeded,

    /// Stake is below the configured minimum.
    #[error("stake too low")]
    StakeTooLow,

    /// Caller balance cannot cover the stake.
    #[error("insufficient funds")]
    InsufficientFunds,

    /// Revealed secret does not hash to the stored commitment.
    #[error("commitment mismatch")]
    CommitmentMismatch,

    /// Wrong caller for the operation, or a value slot already written.
    #[error("unauthorized")]
    Unauthorized,

    /// Round already reached a terminal phase.
    #[error("already finished")]
    AlreadyFinished,

    /// Operation requires a joined round but no joiner is set.
    #[error("no joiner")]
    NoJoiner,

    /// Operation does not apply to this round's game variant.
    #[error("game kind mismatch")]
    GameKindMismatch,
}
