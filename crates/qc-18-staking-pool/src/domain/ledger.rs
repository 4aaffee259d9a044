//! # Pool Ledger
//!
//! Per-participant deposits and the pool-wide running total.
//!
//! `total == sum(balances)` holds after every public call: both sides of an
//! update are computed with checked arithmetic before either is written.

use super::errors::PoolError;
use super::value_objects::{Address, U256};
use std::collections::HashMap;

/// Deposit ledger.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    /// Active deposits; zero balances are never stored.
    balances: HashMap<Address, U256>,
    /// Sum of all active deposits.
    total: U256,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current deposit held for `participant` (zero if none).
    #[must_use]
    pub fn balance_of(&self, participant: &Address) -> U256 {
        self.balances.get(participant).copied().unwrap_or_default()
    }

    /// Sum of all active deposits.
    #[must_use]
    pub fn total(&self) -> U256 {
        self.total
    }

    /// Number of participants with a non-zero deposit.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.balances.len()
    }

    /// Iterate over active deposits.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &U256)> {
        self.balances.iter()
    }

    /// Add `amount` to `participant`. Returns the participant's new balance.
    pub fn credit(&mut self, participant: Address, amount: U256) -> Result<U256, PoolError> {
        if amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }
        let balance = self
            .balance_of(&participant)
            .checked_add(amount)
            .ok_or(PoolError::Overflow)?;
        let total = self.total.checked_add(amount).ok_or(PoolError::Overflow)?;

        self.balances.insert(participant, balance);
        self.total = total;
        Ok(balance)
    }

    /// Remove and return `participant`'s entire deposit.
    pub fn take(&mut self, participant: &Address) -> Result<U256, PoolError> {
        let amount = self.balance_of(participant);
        if amount.is_zero() {
            return Err(PoolError::NoBalance {
                participant: *participant,
            });
        }
        let total = self.total.checked_sub(amount).ok_or(PoolError::Overflow)?;

        self.balances.remove(participant);
        self.total = total;
        Ok(amount)
    }

    /// Recompute the sum of balances and compare it to the running total.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.iter()
            .try_fold(U256::zero(), |acc, (_, v)| acc.checked_add(*v))
            .is_some_and(|sum| sum == self.total)
    }
}
