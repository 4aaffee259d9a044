//! # Driving Ports (API - Inbound)
//!
//! Operations exposed to participants and to any finalize caller.
//! Caller identity is supplied by the transport layer.

use crate::domain::entities::{DepositReceipt, FinalizeOutcome, TransferReceipt};
use crate::domain::errors::PoolError;
use crate::domain::value_objects::{Address, PoolState, Timestamp, U256};

/// Staking pool API.
///
/// Mutating calls are atomic: they either commit completely or return an
/// error with the pool unchanged. While a transfer is in flight, mutating
/// calls from other callers wait for it to resolve. Only a call nested inside
/// the transfer itself is refused with `TransactionInProgress`.
pub trait StakingPoolApi: Send + Sync {
    /// Escrow `amount` for `participant`.
    ///
    /// Errors: `AlreadyCompleted`, `DeadlineReached`, `InvalidAmount`.
    fn deposit(&self, participant: Address, amount: U256) -> Result<DepositReceipt, PoolError>;

    /// Forward the pool to the beneficiary if the threshold is met.
    /// Permissionless.
    ///
    /// Errors: `AlreadyCompleted`, `DeadlineReached`, `ThresholdNotMet`,
    /// `TransferFailed`.
    fn finalize(&self) -> Result<FinalizeOutcome, PoolError>;

    /// Return `participant`'s deposit after an unsuccessful round.
    ///
    /// Errors: `AlreadyCompleted`, `DeadlineNotReached`, `NoBalance`,
    /// `TransferFailed`.
    fn refund(&self, participant: Address) -> Result<TransferReceipt, PoolError>;

    /// Seconds until the deadline, zero once passed.
    fn time_left(&self) -> u64;

    /// Deposit currently held for `participant`.
    fn balance_of(&self, participant: &Address) -> U256;

    /// Sum of active deposits.
    fn total_deposited(&self) -> U256;

    /// Value held by the pool.
    fn escrow_balance(&self) -> U256;

    /// Whether funds were forwarded.
    fn is_completed(&self) -> bool;

    /// Absolute deadline.
    fn deadline(&self) -> Timestamp;

    /// Completion threshold.
    fn threshold(&self) -> U256;

    /// Lifecycle state now.
    fn state(&self) -> PoolState;
}
