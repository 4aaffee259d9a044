//! # QC-18 Staking Pool - Deadline-Gated Pooled Funding
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Participants stake value into a shared pool before a fixed deadline. If the
//! pool reaches its threshold before the deadline, anyone may finalize it and
//! the whole balance is forwarded to the beneficiary in a single transfer.
//! Otherwise, once the deadline passes, each participant can reclaim exactly
//! what they deposited.
//!
//! ## State Machine
//!
//! ```text
//!            deposit (now < deadline)
//!              ┌──────┐
//!              ↓      │
//!   ──────→  [Open] ──┘
//!              │   │
//!   finalize   │   │  now >= deadline
//!   (total >=  │   ↓
//!   threshold) │ [Expired] ── refund(participant) ──→ balance zeroed
//!              ↓
//!         [Completed]   (terminal, escrow forwarded)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Ledger Conservation | `domain/ledger.rs` - `Ledger::credit()` / `Ledger::take()` |
//! | INVARIANT-2 | Escrow Backing | `domain/entities.rs` - `Pool::deposit()` / `Pool::complete_refund()` |
//! | INVARIANT-3 | Completion Drains Escrow | `domain/entities.rs` - `Pool::complete_finalize()` |
//! | INVARIANT-4 | No Re-entry During Transfer | `domain/entities.rs` - `Pool::ensure_idle()` |
//!
//! ## Outbound Dependencies
//!
//! | Port | Purpose |
//! |------|---------|
//! | `Beneficiary` | One-time receiver of the pooled funds |
//! | `Payout` | Returns deposits on refund |
//! | `Clock` | Current unix time |
//! | `EventPublisher` | `Stake` / `Completed` / `Refund` events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use qc_18_staking_pool::prelude::*;
//!
//! let service = create_test_service(&StakingConfig::default(), 1_700_000_000)?;
//! service.deposit(alice, ether(1))?;
//! service.finalize()?;
//! assert!(service.beneficiary().is_completed());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        CompletionAck, DepositReceipt, FinalizeOutcome, FinalizeReceipt, FinalizeStep,
        PendingFinalize, PendingRefund, Pool, PoolParams, TransferReceipt,
    };
    pub use crate::domain::errors::{BeneficiaryError, PayoutError, PoolError};
    pub use crate::domain::gate::{Gate, GateStatus};
    pub use crate::domain::invariants::{check_all_invariants, InvariantCheckResult, InvariantViolation};
    pub use crate::domain::ledger::Ledger;
    pub use crate::domain::services::{derive_contract_address, keccak256};
    pub use crate::domain::value_objects::{
        ether, milli_ether, Address, FinalizePolicy, PoolState, Timestamp, U256,
    };

    pub use crate::ports::inbound::StakingPoolApi;
    pub use crate::ports::outbound::{Beneficiary, Clock, EventPublisher, Payout};

    pub use crate::events::{topics, PoolEvent};

    pub use crate::adapters::{
        InMemoryBeneficiary, InMemoryEventLog, InMemoryWallets, ManualClock, SystemClock,
        TracingEventPublisher,
    };

    pub use crate::config::{ConfigError, StakingConfig};

    pub use crate::service::{
        create_test_service, InMemoryStakingService, ServiceStats, StakingPoolService,
        TEST_DEPLOYER,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 18;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Staking Pool";
