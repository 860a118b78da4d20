//! # Wager Engine
//!
//! Deterministic commit-reveal wager round engine with escrowed stakes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      WAGER ENGINE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── hash.rs     - Domain-separated SHA-256 hashing          │
//! │  └── address.rs  - Derived account addressing                │
//! │                                                              │
//! │  commit/         - Secret commitment scheme                  │
//! │                                                              │
//! │  engine/         - Round state machine (deterministic)       │
//! │  ├── state.rs    - Registry and round records                │
//! │  ├── ledger.rs   - Operation surface                         │
//! │  ├── vault.rs    - Escrow custody                            │
//! │  ├── events.rs   - Lifecycle events                          │
//! │  └── error.rs    - Guard-violation taxonomy                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The engine is **100% deterministic**:
//! - No system time dependencies: callers supply the execution-time clock
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - Every operation commits fully or fails with no effect
//!
//! Given identical operation sequences, the ledger reaches **identical
//! state** on any platform.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod commit;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use commit::{compute_commitment, SecretCommitment};
pub use self::core::address::{global_state_address, round_state_address, vault_address};
pub use engine::{
    AccountId, EngineError, GameKind, Ledger, RoundConfig, RoundEvent, RoundPhase, RoundState,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds from round creation until a timeout claim becomes valid (24 hours)
pub const ROUND_TIMEOUT_SECS: i64 = 24 * 60 * 60;
