//! # Domain Errors
//!
//! Error types for the staking pool. Every `PoolError` is a rejection of the
//! attempted operation; the ledger is left exactly as it was.

use super::value_objects::{Address, U256};
use thiserror::Error;

/// Pool operation errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Operation requires the pre-deadline window.
    #[error("Deadline is already reached")]
    DeadlineReached,

    /// Operation requires the post-deadline window.
    #[error("Deadline is not yet reached")]
    DeadlineNotReached,

    /// Pool already forwarded its funds.
    #[error("Staking process already completed")]
    AlreadyCompleted,

    /// Deposit amount is zero.
    #[error("Invalid amount: deposits must be greater than zero")]
    InvalidAmount,

    /// Refund requested by a participant holding nothing.
    #[error("No balance to refund for {participant}")]
    NoBalance {
        /// Participant that asked for the refund
        participant: Address,
    },

    /// Finalize called before the threshold was met.
    #[error("Threshold not met: {total} < {threshold}")]
    ThresholdNotMet {
        /// Current pool total
        total: U256,
        /// Required threshold
        threshold: U256,
    },

    /// Beneficiary or participant transfer failed. Nothing was applied.
    #[error("Transfer failed: {reason}")]
    TransferFailed {
        /// Adapter-supplied reason
        reason: String,
    },

    /// Mutating call made from inside an in-flight transfer.
    #[error("Transaction in progress (re-entrant call rejected)")]
    TransactionInProgress,

    /// Arithmetic overflow while crediting.
    #[error("Calculation resulted in overflow")]
    Overflow,
}

impl PoolError {
    /// Returns true if retrying the same call later can succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TransferFailed { .. }
                | Self::TransactionInProgress
                | Self::DeadlineNotReached
                | Self::ThresholdNotMet { .. }
        )
    }
}

/// Errors reported by the beneficiary when accepting funds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BeneficiaryError {
    /// Beneficiary already received its one-time transfer.
    #[error("Beneficiary already completed")]
    AlreadyCompleted,

    /// Beneficiary refused the transfer.
    #[error("Beneficiary rejected funds: {0}")]
    Rejected(String),
}

/// Errors reported when paying a participant back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayoutError {
    /// Recipient cannot receive value.
    #[error("Recipient {0} rejected payout")]
    Rejected(Address),

    /// Recipient balance would overflow.
    #[error("Recipient balance overflow")]
    Overflow,
}

impl From<BeneficiaryError> for PoolError {
    fn from(err: BeneficiaryError) -> Self {
        PoolError::TransferFailed {
            reason: err.to_string(),
        }
    }
}

impl From<PayoutError> for PoolError {
    fn from(err: PayoutError) -> Self {
        PoolError::TransferFailed {
            reason: err.to_string(),
        }
    }
}
