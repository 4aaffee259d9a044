//! # Domain Entities
//!
//! The `Pool` aggregate and the receipts its transitions produce.
//!
//! Transfers out of the pool are split into `begin_*` and `complete_*`/`abort_*`
//! so the external call can happen between them. While a transfer is pending
//! the pool rejects every mutating call with `PoolError::TransactionInProgress`.

use super::errors::PoolError;
use super::gate::{Gate, GateStatus};
use super::ledger::Ledger;
use super::value_objects::{Address, FinalizePolicy, PoolState, Timestamp, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Parameters fixed at pool creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolParams {
    /// Address of the pool itself.
    pub address: Address,
    /// Address of the beneficiary the pool pays out to.
    pub beneficiary: Address,
    /// Absolute deadline (unix seconds).
    pub deadline: Timestamp,
    /// Minimum total that allows finalize.
    pub threshold: U256,
    /// Behavior of finalize below threshold.
    pub finalize_policy: FinalizePolicy,
}

/// Acknowledgment returned by the beneficiary after accepting funds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionAck {
    /// Amount the beneficiary credited.
    pub amount_received: U256,
    /// Beneficiary's own completion flag after the transfer.
    pub completed: bool,
}

impl CompletionAck {
    /// Whether this acknowledgment confirms receipt of exactly `amount`.
    ///
    /// Anything else is a decline in which no value moved.
    #[must_use]
    pub fn confirms(&self, amount: U256) -> bool {
        self.completed && self.amount_received == amount
    }
}

/// Result of a successful deposit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Unique receipt identifier.
    pub receipt_id: Uuid,
    /// Position of this transition in the pool's commit order.
    pub sequence: u64,
    /// Depositor.
    pub participant: Address,
    /// Amount deposited.
    pub amount: U256,
    /// Participant balance after the deposit.
    pub balance: U256,
    /// Pool total after the deposit.
    pub total_deposited: U256,
}

/// Result of a successful finalize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReceipt {
    /// Unique receipt identifier.
    pub receipt_id: Uuid,
    /// Position of this transition in the pool's commit order.
    pub sequence: u64,
    /// Beneficiary that received the funds.
    pub beneficiary: Address,
    /// Amount forwarded.
    pub amount: U256,
    /// Beneficiary acknowledgment.
    pub ack: CompletionAck,
}

/// Result of a successful refund.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Unique receipt identifier.
    pub receipt_id: Uuid,
    /// Position of this transition in the pool's commit order.
    pub sequence: u64,
    /// Participant that was paid back.
    pub participant: Address,
    /// Amount returned.
    pub amount: U256,
}

/// Outcome of `finalize`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinalizeOutcome {
    /// Funds forwarded, pool completed.
    Completed(FinalizeReceipt),
    /// Threshold not met under `FinalizePolicy::NoOpBelowThreshold`.
    BelowThreshold {
        /// Current pool total
        total: U256,
        /// Required threshold
        threshold: U256,
    },
}

impl FinalizeOutcome {
    /// Returns true if the pool was completed by this call.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// First half of `finalize`.
#[derive(Debug)]
pub enum FinalizeStep {
    /// Transfer `PendingFinalize::amount` to the beneficiary, then complete or abort.
    Transfer(PendingFinalize),
    /// Nothing to do (no-op policy).
    BelowThreshold {
        /// Current pool total
        total: U256,
        /// Required threshold
        threshold: U256,
    },
}

/// A beneficiary transfer that has been validated but not committed.
#[derive(Debug)]
#[must_use = "a pending finalize must be completed or aborted"]
pub struct PendingFinalize {
    amount: U256,
}

impl PendingFinalize {
    /// Amount to transfer (the pool's entire escrow).
    #[must_use]
    pub fn amount(&self) -> U256 {
        self.amount
    }
}

/// A participant refund that has been validated but not committed.
#[derive(Debug)]
#[must_use = "a pending refund must be completed or aborted"]
pub struct PendingRefund {
    participant: Address,
    amount: U256,
}

impl PendingRefund {
    /// Participant being refunded.
    #[must_use]
    pub fn participant(&self) -> Address {
        self.participant
    }

    /// Amount to pay back.
    #[must_use]
    pub fn amount(&self) -> U256 {
        self.amount
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InFlight {
    Finalize,
    Refund(Address),
}

/// The staking pool aggregate.
#[derive(Debug)]
pub struct Pool {
    address: Address,
    beneficiary: Address,
    gate: Gate,
    finalize_policy: FinalizePolicy,
    ledger: Ledger,
    /// Value physically held by the pool.
    escrow: U256,
    completed: bool,
    in_flight: Option<InFlight>,
    sequence: u64,
}

impl Pool {
    /// Create a pool.
    #[must_use]
    pub fn new(params: PoolParams) -> Self {
        Self {
            address: params.address,
            beneficiary: params.beneficiary,
            gate: Gate::new(params.deadline, params.threshold),
            finalize_policy: params.finalize_policy,
            ledger: Ledger::new(),
            escrow: U256::zero(),
            completed: false,
            in_flight: None,
            sequence: 0,
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Pool address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Beneficiary address.
    #[must_use]
    pub fn beneficiary(&self) -> Address {
        self.beneficiary
    }

    /// Absolute deadline.
    #[must_use]
    pub fn deadline(&self) -> Timestamp {
        self.gate.deadline()
    }

    /// Completion threshold.
    #[must_use]
    pub fn threshold(&self) -> U256 {
        self.gate.threshold()
    }

    /// Finalize policy below threshold.
    #[must_use]
    pub fn finalize_policy(&self) -> FinalizePolicy {
        self.finalize_policy
    }

    /// Seconds until the deadline, zero once passed.
    #[must_use]
    pub fn time_left(&self, now: Timestamp) -> u64 {
        self.gate.time_left(now)
    }

    /// Deposit currently held for `participant`.
    #[must_use]
    pub fn balance_of(&self, participant: &Address) -> U256 {
        self.ledger.balance_of(participant)
    }

    /// Sum of active deposits.
    #[must_use]
    pub fn total_deposited(&self) -> U256 {
        self.ledger.total()
    }

    /// Value held by the pool (zero once completed).
    #[must_use]
    pub fn escrow_balance(&self) -> U256 {
        self.escrow
    }

    /// Whether funds were forwarded to the beneficiary.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether an external transfer is pending.
    #[must_use]
    pub fn is_transfer_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of committed transitions.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Read-only view of the ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Gate classification at `now`.
    #[must_use]
    pub fn gate_status(&self, now: Timestamp) -> GateStatus {
        self.gate.classify(now, self.ledger.total())
    }

    /// Lifecycle state at `now`.
    #[must_use]
    pub fn state(&self, now: Timestamp) -> PoolState {
        if self.completed {
            PoolState::Completed
        } else if self.gate.is_expired(now) {
            PoolState::Expired
        } else {
            PoolState::Open
        }
    }

    // =========================================================================
    // DEPOSIT
    // =========================================================================

    /// Escrow `amount` for `participant`.
    pub fn deposit(
        &mut self,
        participant: Address,
        amount: U256,
        now: Timestamp,
    ) -> Result<DepositReceipt, PoolError> {
        self.ensure_idle()?;
        self.ensure_not_completed()?;
        if self.gate.is_expired(now) {
            return Err(PoolError::DeadlineReached);
        }
        if amount.is_zero() {
            return Err(PoolError::InvalidAmount);
        }
        let escrow = self.escrow.checked_add(amount).ok_or(PoolError::Overflow)?;

        let balance = self.ledger.credit(participant, amount)?;
        self.escrow = escrow;
        self.sequence += 1;

        debug!(
            participant = %participant,
            amount = %amount,
            total = %self.ledger.total(),
            "[qc-18] Stake accepted"
        );

        Ok(DepositReceipt {
            receipt_id: Uuid::new_v4(),
            sequence: self.sequence,
            participant,
            amount,
            balance,
            total_deposited: self.ledger.total(),
        })
    }

    // =========================================================================
    // FINALIZE
    // =========================================================================

    /// Validate a finalize and, if the threshold is met, lock the pool for
    /// the beneficiary transfer.
    pub fn begin_finalize(&mut self, now: Timestamp) -> Result<FinalizeStep, PoolError> {
        self.ensure_idle()?;
        self.ensure_not_completed()?;
        if self.gate.is_expired(now) {
            return Err(PoolError::DeadlineReached);
        }

        let total = self.ledger.total();
        if !self.gate.threshold_met(total) {
            let threshold = self.gate.threshold();
            return match self.finalize_policy {
                FinalizePolicy::RejectBelowThreshold => {
                    Err(PoolError::ThresholdNotMet { total, threshold })
                }
                FinalizePolicy::NoOpBelowThreshold => {
                    Ok(FinalizeStep::BelowThreshold { total, threshold })
                }
            };
        }

        self.in_flight = Some(InFlight::Finalize);
        Ok(FinalizeStep::Transfer(PendingFinalize {
            amount: self.escrow,
        }))
    }

    /// Commit a finalize after the beneficiary acknowledged the transfer.
    ///
    /// An acknowledgment that does not confirm the exact amount is a decline:
    /// no value moved, the escrow stays refundable and the finalize fails
    /// with `TransferFailed`.
    pub fn complete_finalize(
        &mut self,
        pending: PendingFinalize,
        ack: CompletionAck,
    ) -> Result<FinalizeReceipt, PoolError> {
        debug_assert_eq!(self.in_flight, Some(InFlight::Finalize));
        self.in_flight = None;

        if !ack.confirms(pending.amount) {
            return Err(PoolError::TransferFailed {
                reason: format!(
                    "beneficiary acknowledged {} (completed={}), expected {}",
                    ack.amount_received, ack.completed, pending.amount
                ),
            });
        }

        self.escrow = U256::zero();
        self.completed = true;
        self.sequence += 1;

        info!(
            beneficiary = %self.beneficiary,
            amount = %pending.amount,
            "[qc-18] Pool completed, funds forwarded"
        );

        Ok(FinalizeReceipt {
            receipt_id: Uuid::new_v4(),
            sequence: self.sequence,
            beneficiary: self.beneficiary,
            amount: pending.amount,
            ack,
        })
    }

    /// Release the lock taken by `begin_finalize` without changing anything.
    pub fn abort_finalize(&mut self, pending: PendingFinalize) {
        debug_assert_eq!(self.in_flight, Some(InFlight::Finalize));
        self.in_flight = None;
        debug!(amount = %pending.amount, "[qc-18] Finalize aborted");
    }

    /// Run a whole finalize with `transfer` as the beneficiary call.
    pub fn finalize<F>(&mut self, now: Timestamp, transfer: F) -> Result<FinalizeOutcome, PoolError>
    where
        F: FnOnce(U256) -> Result<CompletionAck, PoolError>,
    {
        let pending = match self.begin_finalize(now)? {
            FinalizeStep::Transfer(pending) => pending,
            FinalizeStep::BelowThreshold { total, threshold } => {
                return Ok(FinalizeOutcome::BelowThreshold { total, threshold });
            }
        };

        match transfer(pending.amount()) {
            Ok(ack) => self
                .complete_finalize(pending, ack)
                .map(FinalizeOutcome::Completed),
            Err(err) => {
                self.abort_finalize(pending);
                Err(into_transfer_failed(err))
            }
        }
    }

    // =========================================================================
    // REFUND
    // =========================================================================

    /// Validate a refund and lock the pool for the participant payout.
    pub fn begin_refund(
        &mut self,
        participant: Address,
        now: Timestamp,
    ) -> Result<PendingRefund, PoolError> {
        self.ensure_idle()?;
        self.ensure_not_completed()?;
        if !self.gate.is_expired(now) {
            return Err(PoolError::DeadlineNotReached);
        }
        let amount = self.ledger.balance_of(&participant);
        if amount.is_zero() {
            return Err(PoolError::NoBalance { participant });
        }

        self.in_flight = Some(InFlight::Refund(participant));
        Ok(PendingRefund {
            participant,
            amount,
        })
    }

    /// Commit a refund after the payout succeeded.
    pub fn complete_refund(&mut self, pending: PendingRefund) -> Result<TransferReceipt, PoolError> {
        debug_assert_eq!(self.in_flight, Some(InFlight::Refund(pending.participant)));
        self.in_flight = None;

        let escrow = self
            .escrow
            .checked_sub(pending.amount)
            .ok_or(PoolError::Overflow)?;
        let amount = self.ledger.take(&pending.participant)?;
        self.escrow = escrow;
        self.sequence += 1;

        info!(
            participant = %pending.participant,
            amount = %amount,
            remaining = %self.ledger.total(),
            "[qc-18] Refund paid"
        );

        Ok(TransferReceipt {
            receipt_id: Uuid::new_v4(),
            sequence: self.sequence,
            participant: pending.participant,
            amount,
        })
    }

    /// Release the lock taken by `begin_refund` without changing anything.
    pub fn abort_refund(&mut self, pending: PendingRefund) {
        debug_assert_eq!(self.in_flight, Some(InFlight::Refund(pending.participant)));
        self.in_flight = None;
        debug!(participant = %pending.participant, "[qc-18] Refund aborted");
    }

    /// Run a whole refund with `payout` as the participant transfer.
    pub fn refund<F>(
        &mut self,
        participant: Address,
        now: Timestamp,
        payout: F,
    ) -> Result<TransferReceipt, PoolError>
    where
        F: FnOnce(Address, U256) -> Result<(), PoolError>,
    {
        let pending = self.begin_refund(participant, now)?;
        match payout(pending.participant(), pending.amount()) {
            Ok(()) => self.complete_refund(pending),
            Err(err) => {
                self.abort_refund(pending);
                Err(into_transfer_failed(err))
            }
        }
    }

    // =========================================================================
    // GUARDS
    // =========================================================================

    fn ensure_idle(&self) -> Result<(), PoolError> {
        if self.in_flight.is_some() {
            return Err(PoolError::TransactionInProgress);
        }
        Ok(())
    }

    fn ensure_not_completed(&self) -> Result<(), PoolError> {
        if self.completed {
            return Err(PoolError::AlreadyCompleted);
        }
        Ok(())
    }
}

fn into_transfer_failed(err: PoolError) -> PoolError {
    match err {
        PoolError::TransferFailed { .. } => err,
        other => PoolError::TransferFailed {
            reason: other.to_string(),
        },
    }
}
