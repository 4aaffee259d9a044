//! # Staking Configuration
//!
//! Pool parameters with defaults and environment overrides.
//!
//! ## Environment Variables
//!
//! - `QC_STAKER_DEADLINE_SECS`: deposit window after deployment (default: 30)
//! - `QC_STAKER_THRESHOLD_WEI`: completion threshold in wei, decimal (default: 1 ether)
//! - `QC_STAKER_FINALIZE_POLICY`: `reject` or `noop` (default: reject)

use crate::domain::entities::PoolParams;
use crate::domain::value_objects::{ether, Address, FinalizePolicy, Timestamp, U256};
use std::env;
use thiserror::Error;

/// Default deposit window in seconds.
pub const DEFAULT_DEADLINE_WINDOW_SECS: u64 = 30;

/// Staking pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakingConfig {
    /// Seconds between deployment and the deadline.
    pub deadline_window_secs: u64,
    /// Minimum total that allows finalize.
    pub threshold: U256,
    /// Behavior of finalize below threshold.
    pub finalize_policy: FinalizePolicy,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            deadline_window_secs: DEFAULT_DEADLINE_WINDOW_SECS,
            threshold: ether(1),
            finalize_policy: FinalizePolicy::RejectBelowThreshold,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// A zero window would make the pool expire at deployment.
    #[error("Deadline window must be greater than zero")]
    ZeroDeadlineWindow,

    /// A zero threshold would allow finalizing an empty pool.
    #[error("Threshold must be greater than zero")]
    ZeroThreshold,

    /// `deployed_at + window` does not fit in a timestamp.
    #[error("Deadline overflows: {deployed_at} + {window}")]
    DeadlineOverflow {
        /// Deployment time
        deployed_at: Timestamp,
        /// Window length
        window: u64,
    },
}

impl StakingConfig {
    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("QC_STAKER_DEADLINE_SECS") {
            config.deadline_window_secs =
                value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "QC_STAKER_DEADLINE_SECS",
                    value: value.clone(),
                })?;
        }

        if let Ok(value) = env::var("QC_STAKER_THRESHOLD_WEI") {
            config.threshold =
                U256::from_dec_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
                    var: "QC_STAKER_THRESHOLD_WEI",
                    value: value.clone(),
                })?;
        }

        if let Ok(value) = env::var("QC_STAKER_FINALIZE_POLICY") {
            config.finalize_policy = value.parse().map_err(|_| ConfigError::InvalidValue {
                var: "QC_STAKER_FINALIZE_POLICY",
                value: value.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a usable pool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deadline_window_secs == 0 {
            return Err(ConfigError::ZeroDeadlineWindow);
        }
        if self.threshold.is_zero() {
            return Err(ConfigError::ZeroThreshold);
        }
        Ok(())
    }

    /// Pool parameters for a pool deployed at `deployed_at`.
    pub fn pool_params(
        &self,
        address: Address,
        beneficiary: Address,
        deployed_at: Timestamp,
    ) -> Result<PoolParams, ConfigError> {
        self.validate()?;
        let deadline = deployed_at
            .checked_add(self.deadline_window_secs)
            .ok_or(ConfigError::DeadlineOverflow {
                deployed_at,
                window: self.deadline_window_secs,
            })?;

        Ok(PoolParams {
            address,
            beneficiary,
            deadline,
            threshold: self.threshold,
            finalize_policy: self.finalize_policy,
        })
    }
}
