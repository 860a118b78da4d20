//! Escrow Vault and Caller Balances
//!
//! `Balances` stands in for the host ledger's account balances (the funds
//! capability the engine calls into). `Vault` is the singleton escrow
//! custodying every active round's stakes. The vault keeps no per-round
//! sub-accounting; the ledger computes exact amounts from each round's
//! `stake_amount`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::state::AccountId;

// =============================================================================
// BALANCES
// =============================================================================

/// Account balances (BTreeMap for deterministic iteration).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Balances {
    accounts: BTreeMap<AccountId, u64>,
}

impl Balances {
    /// Current balance of an account (zero if unknown).
    pub fn balance(&self, id: &AccountId) -> u64 {
        self.accounts.get(id).copied().unwrap_or(0)
    }

    /// Credit an account, saturating at `u64::MAX`.
    pub fn credit(&mut self, id: AccountId, amount: u64) {
        let balance = self.accounts.entry(id).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Debit an account, failing if the balance cannot cover it.
    pub fn debit(&mut self, id: &AccountId, amount: u64) -> Result<(), EngineError> {
        let balance = self.accounts.entry(*id).or_insert(0);
        if *balance < amount {
            return Err(EngineError::InsufficientFunds);
        }
        *balance -= amount;
        Ok(())
    }

    /// Sum of all account balances.
    pub fn total(&self) -> u64 {
        self.accounts.values().sum()
    }
}

// =============================================================================
// VAULT
// =============================================================================

/// Singleton escrow holding all active rounds' stakes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Vault {
    escrowed: u64,
}

impl Vault {
    /// Total funds currently escrowed across all rounds.
    pub fn escrowed(&self) -> u64 {
        self.escrowed
    }

    /// Move `amount` from a caller's balance into escrow.
    pub fn deposit(
        &mut self,
        balances: &mut Balances,
        from: &AccountId,
        amount: u64,
    ) -> Result<(), EngineError> {
        balances.debit(from, amount)?;
        self.escrowed += amount;
        Ok(())
    }

    /// Move `amount` from escrow to an account.
    ///
    /// Invariant: the ledger only ever requests amounts it previously
    /// escrowed for the round being settled, so this cannot underflow.
    pub fn payout(&mut self, balances: &mut Balances, to: AccountId, amount: u64) {
        debug_assert!(amount <= self.escrowed, "payout exceeds escrow");
        self.escrowed -= amount;
        balances.credit(to, amount);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn acct(b: u8) -> AccountId {
        AccountId::new([b; 32])
    }

    #[test]
    fn test_debit_requires_funds() {
        let mut balances = Balances::default();
        balances.credit(acct(1), 100);

        assert_eq!(
            balances.debit(&acct(1), 150),
            Err(EngineError::InsufficientFunds)
        );
        assert_eq!(balances.balance(&acct(1)), 100);

        assert!(balances.debit(&acct(1), 100).is_ok());
        assert_eq!(balances.balance(&acct(1)), 0);
    }

    #[test]
    fn test_credit_saturates_at_max() {
        let mut balances = Balances::default();
        balances.credit(acct(1), u64::MAX - 10);
        balances.credit(acct(1), 100);

        assert_eq!(balances.balance(&acct(1)), u64::MAX);
    }

    #[test]
    fn test_deposit_then_payout() {
        let mut balances = Balances::default();
        let mut vault = Vault::default();
        balances.credit(acct(1), 100);
        balances.credit(acct(2), 100);

        vault.deposit(&mut balances, &acct(1), 100).unwrap();
        vault.deposit(&mut balances, &acct(2), 100).unwrap();
        assert_eq!(vault.escrowed(), 200);

        vault.payout(&mut balances, acct(2), 200);
        assert_eq!(vault.escrowed(), 0);
        assert_eq!(balances.balance(&acct(2)), 200);
    }

    #[test]
    fn test_failed_deposit_leaves_escrow_untouched() {
        let mut balances = Balances::default();
        let mut vault = Vault::default();
        balances.credit(acct(1), 50);

        assert_eq!(
            vault.deposit(&mut balances, &acct(1), 60),
            Err(EngineError::InsufficientFunds)
        );
        assert_eq!(vault.escrowed(), 0);
        assert_eq!(balances.balance(&acct(1)), 50);
    }

    proptest! {
        #[test]
        fn prop_funds_are_conserved(
            initial in 0u64..1_000_000,
            stake in 0u64..1_000_000,
        ) {
            let mut balances = Balances::default();
            let mut vault = Vault::default();
            balances.credit(acct(1), initial);

            let before = balances.total() + vault.escrowed();
            let _ = vault.deposit(&mut balances, &acct(1), stake);
            prop_assert_eq!(balances.total() + vault.escrowed(), before);

            let escrowed = vault.escrowed();
            vault.payout(&mut balances, acct(2), escrowed);
            prop_assert_eq!(balances.total() + vault.escrowed(), before);
        }
    }
}
