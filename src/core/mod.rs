//! Core deterministic primitives.
//!
//! All types in this module are pure functions of their inputs and form
//! the foundation for commitment verification and derived addressing.

pub mod address;
pub mod hash;

// Re-export core types
pub use address::{global_state_address, round_state_address, vault_address, Address};
pub use hash::{hash_with_domain, DomainHasher, Hash32};
