//! # Beneficiary Adapter
//!
//! In-memory beneficiary: holds a balance and a one-way completion flag.
//! Production would forward the value to an external contract.

use crate::domain::entities::CompletionAck;
use crate::domain::errors::BeneficiaryError;
use crate::domain::value_objects::{Address, U256};
use crate::ports::outbound::Beneficiary;
use parking_lot::RwLock;
use tracing::{info, warn};

#[derive(Debug, Default)]
struct BeneficiaryState {
    balance: U256,
    completed: bool,
    rejecting: Option<String>,
}

/// In-memory beneficiary.
#[derive(Debug)]
pub struct InMemoryBeneficiary {
    address: Address,
    state: RwLock<BeneficiaryState>,
}

impl InMemoryBeneficiary {
    /// Create a beneficiary at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: RwLock::new(BeneficiaryState::default()),
        }
    }

    /// Value received so far.
    #[must_use]
    pub fn balance(&self) -> U256 {
        self.state.read().balance
    }

    /// Make every following `accept_funds` fail with `reason`.
    pub fn reject_with(&self, reason: impl Into<String>) {
        self.state.write().rejecting = Some(reason.into());
    }

    /// Accept funds again.
    pub fn resume(&self) {
        self.state.write().rejecting = None;
    }
}

impl Beneficiary for InMemoryBeneficiary {
    fn address(&self) -> Address {
        self.address
    }

    fn accept_funds(&self, amount: U256) -> Result<CompletionAck, BeneficiaryError> {
        let mut state = self.state.write();

        if let Some(reason) = &state.rejecting {
            warn!(reason = %reason, "[qc-18] Beneficiary rejected funds");
            return Err(BeneficiaryError::Rejected(reason.clone()));
        }
        if state.completed {
            return Err(BeneficiaryError::AlreadyCompleted);
        }

        state.balance = state
            .balance
            .checked_add(amount)
            .ok_or_else(|| BeneficiaryError::Rejected("balance overflow".to_string()))?;
        state.completed = true;

        info!(
            beneficiary = %self.address,
            amount = %amount,
            "[qc-18] Beneficiary completed"
        );

        Ok(CompletionAck {
            amount_received: amount,
            completed: true,
        })
    }

    fn is_completed(&self) -> bool {
        self.state.read().completed
    }
}
