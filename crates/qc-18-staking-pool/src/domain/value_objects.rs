//! # Value Objects
//!
//! Immutable domain primitives for the staking pool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for wei arithmetic
pub use primitive_types::U256;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Wei per ether (10^18).
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// Wei per milliether (10^15).
pub const WEI_PER_MILLI_ETHER: u64 = 1_000_000_000_000_000;

/// Converts whole ether to wei.
#[must_use]
pub fn ether(whole: u64) -> U256 {
    U256::from(whole) * U256::from(WEI_PER_ETHER)
}

/// Converts milliether to wei (`milli_ether(500)` is 0.5 ether).
#[must_use]
pub fn milli_ether(milli: u64) -> U256 {
    U256::from(milli) * U256::from(WEI_PER_MILLI_ETHER)
}

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account address identifying a participant, the pool or the
/// beneficiary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 20] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Creates an address whose low 8 bytes hold `value` (big-endian).
    ///
    /// Handy for fixtures: `Address::from_low_u64(1)` is `0x00..01`.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// FINALIZE POLICY
// =============================================================================

/// What `finalize` does when called before the threshold is met.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalizePolicy {
    /// Reject with `PoolError::ThresholdNotMet`.
    #[default]
    RejectBelowThreshold,
    /// Succeed without touching the pool.
    NoOpBelowThreshold,
}

impl FromStr for FinalizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::RejectBelowThreshold),
            "noop" | "no-op" => Ok(Self::NoOpBelowThreshold),
            other => Err(format!("unknown finalize policy: {other}")),
        }
    }
}

// =============================================================================
// POOL STATE
// =============================================================================

/// Observable lifecycle state of the pool.
///
/// Only `Completed` is stored; `Expired` is derived from the clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolState {
    /// Accepting deposits, finalize allowed once the threshold is met.
    Open,
    /// Funds forwarded to the beneficiary. Terminal.
    Completed,
    /// Deadline passed without completion; refunds available.
    Expired,
}

impl PoolState {
    /// Check if terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
