//! # Domain Invariants
//!
//! Accounting rules that MUST hold between any two committed transitions.
//!
//! - INVARIANT-1: Ledger Conservation (`total == sum(balances)`)
//! - INVARIANT-2: Escrow Backing (open pool holds exactly `total`)
//! - INVARIANT-3: Completion Drains Escrow (completed pool holds nothing)

use super::entities::Pool;
use super::value_objects::U256;

/// INVARIANT-1: Ledger Conservation
#[must_use]
pub fn check_ledger_conservation_invariant(pool: &Pool) -> bool {
    pool.ledger().is_consistent()
}

/// INVARIANT-2: Escrow Backing
///
/// Until completion, every wei on the ledger is physically held by the pool.
#[must_use]
pub fn check_escrow_backing_invariant(pool: &Pool) -> bool {
    pool.is_completed() || pool.escrow_balance() == pool.total_deposited()
}

/// INVARIANT-3: Completion Drains Escrow
#[must_use]
pub fn check_completion_drained_invariant(pool: &Pool) -> bool {
    !pool.is_completed() || pool.escrow_balance().is_zero()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(pool: &Pool) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_ledger_conservation_invariant(pool) {
        violations.push(InvariantViolation::LedgerMismatch {
            total: pool.total_deposited(),
        });
    }

    if !check_escrow_backing_invariant(pool) {
        violations.push(InvariantViolation::EscrowMismatch {
            escrow: pool.escrow_balance(),
            total: pool.total_deposited(),
        });
    }

    if !check_completion_drained_invariant(pool) {
        violations.push(InvariantViolation::CompletedWithEscrow {
            escrow: pool.escrow_balance(),
        });
    }

    InvariantCheckResult { violations }
}

/// Result of invariant checking.
#[derive(Clone, Debug, Default)]
pub struct InvariantCheckResult {
    /// List of violations found.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// Returns true if all invariants passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Types of invariant violations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Running total disagrees with the sum of balances.
    LedgerMismatch {
        /// Running total
        total: U256,
    },
    /// Open pool escrow differs from the ledger total.
    EscrowMismatch {
        /// Held value
        escrow: U256,
        /// Ledger total
        total: U256,
    },
    /// Completed pool still holds value.
    CompletedWithEscrow {
        /// Held value
        escrow: U256,
    },
}
