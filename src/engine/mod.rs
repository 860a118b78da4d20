//! Round Engine Module
//!
//! The wager round state machine. 100% deterministic: outcomes depend
//! only on operation arguments and the caller-supplied clock.
//!
//! ## Module Structure
//!
//! - `state`: registry, round records, phases, configuration
//! - `ledger`: the operation surface (create/join/reveal/score/timeout)
//! - `vault`: escrow custody and the balances capability
//! - `events`: lifecycle events for audit trails
//! - `error`: the guard-violation taxonomy

pub mod error;
pub mod events;
pub mod ledger;
pub mod state;
pub mod vault;

// Re-export key types
pub use error::EngineError;
pub use events::{RoundEvent, RoundEventData};
pub use ledger::Ledger;
pub use state::{AccountId, GameKind, GlobalState, RoundConfig, RoundPhase, RoundState};
pub use vault::{Balances, Vault};
