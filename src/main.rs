//! Wager Engine Demo
//!
//! Drives full round lifecycles against an in-memory ledger:
//! a reveal settlement, a score settlement, and a timeout claim.

use anyhow::Result;
use chrono::Utc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use wager_engine::{
    global_state_address, round_state_address, vault_address, AccountId, GameKind, Ledger,
    RoundConfig, RoundPhase, SecretCommitment, VERSION,
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Wager Engine v{}", VERSION);

    let config = RoundConfig::default();
    info!("Round timeout: {} seconds", config.timeout_secs);

    let mut ledger = Ledger::new(config);
    ledger.initialize()?;
    info!("Registry address: {}", hex::encode(global_state_address()));
    info!("Vault address: {}", hex::encode(vault_address()));

    let alice = AccountId::new([1; 32]);
    let bob = AccountId::new([2; 32]);
    ledger.fund(alice, 1_000);
    ledger.fund(bob, 1_000);
    info!(
        "Funded alice={} bob={}",
        alice.short_hex(),
        bob.short_hex()
    );

    let now = Utc::now().timestamp();

    // Round 0: commit-reveal wager
    info!("=== Round 0: commit-reveal ===");
    let secret = 42u64;
    let commitment = SecretCommitment::from_secret(secret);
    info!("Commitment: {}", hex::encode(commitment.as_bytes()));

    ledger.create_round(alice, 0, GameKind::Commitment, Some(commitment), 100, now)?;
    ledger.join_round(bob, 0, Some(7), now + 5)?;
    let winner = ledger.reveal(alice, 0, secret, now + 10)?;
    info!("Round 0 winner: {}", winner.short_hex());

    // Round 1: score wager
    info!("=== Round 1: score submission ===");
    ledger.create_round(alice, 1, GameKind::Score, None, 50, now)?;
    ledger.join_round(bob, 1, None, now + 5)?;
    ledger.submit_score(alice, 1, 12, now + 10)?;
    if let Some(winner) = ledger.submit_score(bob, 1, 30, now + 15)? {
        info!("Round 1 winner: {}", winner.short_hex());
    }

    // Round 2: nobody joins, creator reclaims after the deadline
    info!("=== Round 2: timeout claim ===");
    ledger.create_round(bob, 2, GameKind::Score, None, 25, now)?;
    let past_deadline = now + config.timeout_secs + 1;
    ledger.claim_timeout(bob, 2, past_deadline)?;
    info!(
        "Round 2 phase: {:?}",
        ledger.fetch_round(2).map(|r| r.phase())
    );

    // Final snapshots
    info!("=== Final State ===");
    info!("Vault escrowed: {}", ledger.vault_escrowed());
    info!("alice balance: {}", ledger.balance(&alice));
    info!("bob balance: {}", ledger.balance(&bob));

    for index in 0..3 {
        let address = round_state_address(index);
        if let Some(round) = ledger.fetch_round_at(&address) {
            info!(
                "round {} at {}: {}",
                index,
                hex::encode(address),
                serde_json::to_string(round)?
            );
            assert!(matches!(
                round.phase(),
                RoundPhase::Settled | RoundPhase::TimedOut
            ));
        }
    }

    let events = ledger.take_events();
    info!("Total events: {}", events.len());

    Ok(())
}
