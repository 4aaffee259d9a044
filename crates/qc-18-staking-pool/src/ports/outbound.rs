//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the staking pool depends on:
//! - `Beneficiary`: receives the one-time transfer on finalize
//! - `Payout`: returns deposits to participants on refund
//! - `Clock`: current unix time
//! - `EventPublisher`: sink for pool events
//!
//! Implementations MUST NOT assume the pool is locked while they run; a
//! call back into the pool from inside `accept_funds` or `pay` is rejected
//! with `PoolError::TransactionInProgress`.

use crate::domain::entities::CompletionAck;
use crate::domain::errors::{BeneficiaryError, PayoutError};
use crate::domain::value_objects::{Address, Timestamp, U256};
use crate::events::PoolEvent;

// =============================================================================
// BENEFICIARY
// =============================================================================

/// Downstream recipient of the pooled funds.
///
/// Opaque to the pool: it accepts a single value transfer and reports a
/// completion flag.
pub trait Beneficiary: Send + Sync {
    /// Address the funds are sent to.
    fn address(&self) -> Address;

    /// Accept the pool's entire balance.
    ///
    /// Called at most once per successful finalize. Returning an error leaves
    /// the pool open.
    ///
    /// `Ok(ack)` with `ack.completed` set and `ack.amount_received == amount`
    /// is the only outcome in which value moves. Any other acknowledgment is
    /// a decline: the implementation must not have kept any of `amount`, and
    /// the pool keeps the escrow refundable.
    fn accept_funds(&self, amount: U256) -> Result<CompletionAck, BeneficiaryError>;

    /// Beneficiary's own completion flag.
    fn is_completed(&self) -> bool;
}

// =============================================================================
// PAYOUT
// =============================================================================

/// Moves value from the pool back to a participant.
pub trait Payout: Send + Sync {
    /// Credit `amount` to `to`.
    fn pay(&self, to: Address, amount: U256) -> Result<(), PayoutError>;
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current unix timestamp in seconds.
    fn now(&self) -> Timestamp;
}

// =============================================================================
// EVENTS
// =============================================================================

/// Sink for pool events.
pub trait EventPublisher: Send + Sync {
    /// Publish one event.
    fn publish(&self, event: PoolEvent);
}
