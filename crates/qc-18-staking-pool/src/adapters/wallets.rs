//! # Wallet Adapter
//!
//! In-memory participant balances receiving refunds.

use crate::domain::errors::PayoutError;
use crate::domain::value_objects::{Address, U256};
use crate::ports::outbound::Payout;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// External balances of participants.
#[derive(Debug, Default)]
pub struct InMemoryWallets {
    balances: RwLock<HashMap<Address, U256>>,
    /// Addresses that refuse incoming value.
    frozen: RwLock<HashSet<Address>>,
}

impl InMemoryWallets {
    /// Create empty wallets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// External balance of `address`.
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> U256 {
        self.balances
            .read()
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    /// Set the external balance of `address`.
    pub fn set_balance(&self, address: Address, balance: U256) {
        self.balances.write().insert(address, balance);
    }

    /// Refuse payouts to `address`.
    pub fn freeze(&self, address: Address) {
        self.frozen.write().insert(address);
    }

    /// Accept payouts to `address` again.
    pub fn unfreeze(&self, address: &Address) {
        self.frozen.write().remove(address);
    }
}

impl Payout for InMemoryWallets {
    fn pay(&self, to: Address, amount: U256) -> Result<(), PayoutError> {
        if self.frozen.read().contains(&to) {
            return Err(PayoutError::Rejected(to));
        }

        let mut balances = self.balances.write();
        let balance = balances.entry(to).or_default();
        *balance = balance.checked_add(amount).ok_or(PayoutError::Overflow)?;

        debug!(to = %to, amount = %amount, "[qc-18] Payout credited");
        Ok(())
    }
}
