//! # Event Schema
//!
//! Events emitted by the staking pool after each committed transition.
//! Every event carries the pool `sequence` of the transition, so consumers
//! can restore commit order even if publication interleaves across threads.

use crate::domain::entities::{DepositReceipt, FinalizeReceipt, TransferReceipt};
use crate::domain::value_objects::{Address, U256};
use serde::{Deserialize, Serialize};

/// Event topics.
pub mod topics {
    /// Deposit accepted.
    pub const STAKE: &str = "Stake";
    /// Funds forwarded to the beneficiary.
    pub const COMPLETED: &str = "Completed";
    /// Deposit returned to a participant.
    pub const REFUND: &str = "Refund";
}

/// Pool event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum PoolEvent {
    /// `Stake(participant, amount)`.
    Stake {
        /// Commit position
        sequence: u64,
        /// Depositor
        participant: Address,
        /// Deposited amount
        amount: U256,
    },
    /// Pool completed.
    Completed {
        /// Commit position
        sequence: u64,
        /// Beneficiary paid
        beneficiary: Address,
        /// Forwarded amount
        amount: U256,
    },
    /// Participant refunded.
    Refund {
        /// Commit position
        sequence: u64,
        /// Refunded participant
        participant: Address,
        /// Returned amount
        amount: U256,
    },
}

impl PoolEvent {
    /// Topic of this event.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Stake { .. } => topics::STAKE,
            Self::Completed { .. } => topics::COMPLETED,
            Self::Refund { .. } => topics::REFUND,
        }
    }

    /// Commit position of the transition that produced this event.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Stake { sequence, .. }
            | Self::Completed { sequence, .. }
            | Self::Refund { sequence, .. } => *sequence,
        }
    }

    /// JSON encoding for log sinks.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&DepositReceipt> for PoolEvent {
    fn from(receipt: &DepositReceipt) -> Self {
        Self::Stake {
            sequence: receipt.sequence,
            participant: receipt.participant,
            amount: receipt.amount,
        }
    }
}

impl From<&FinalizeReceipt> for PoolEvent {
    fn from(receipt: &FinalizeReceipt) -> Self {
        Self::Completed {
            sequence: receipt.sequence,
            beneficiary: receipt.beneficiary,
            amount: receipt.amount,
        }
    }
}

impl From<&TransferReceipt> for PoolEvent {
    fn from(receipt: &TransferReceipt) -> Self {
        Self::Refund {
            sequence: receipt.sequence,
            participant: receipt.participant,
            amount: receipt.amount,
        }
    }
}
