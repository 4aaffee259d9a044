//! # Deadline/Threshold Gate
//!
//! Pure classification of the pool from `(now, total)`. No side effects.

use super::value_objects::{Timestamp, U256};
use serde::{Deserialize, Serialize};

/// Gate classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateStatus {
    /// Before the deadline, threshold not yet met.
    Open,
    /// Before the deadline, threshold met: finalize may forward funds.
    ThresholdReached,
    /// At or past the deadline.
    Expired,
}

/// Immutable deadline and threshold of a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    deadline: Timestamp,
    threshold: U256,
}

impl Gate {
    /// Create a gate.
    #[must_use]
    pub const fn new(deadline: Timestamp, threshold: U256) -> Self {
        Self {
            deadline,
            threshold,
        }
    }

    /// Absolute deadline (unix seconds).
    #[must_use]
    pub const fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Minimum total that allows finalize.
    #[must_use]
    pub const fn threshold(&self) -> U256 {
        self.threshold
    }

    /// Seconds until the deadline, saturating at zero.
    #[must_use]
    pub const fn time_left(&self, now: Timestamp) -> u64 {
        self.deadline.saturating_sub(now)
    }

    /// `now >= deadline`.
    #[must_use]
    pub const fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.deadline
    }

    /// `total >= threshold`.
    #[must_use]
    pub fn threshold_met(&self, total: U256) -> bool {
        total >= self.threshold
    }

    /// Classify the pool.
    #[must_use]
    pub fn classify(&self, now: Timestamp, total: U256) -> GateStatus {
        if self.is_expired(now) {
            GateStatus::Expired
        } else if self.threshold_met(total) {
            GateStatus::ThresholdReached
        } else {
            GateStatus::Open
        }
    }
}
