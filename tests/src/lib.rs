//! # Staking Pool Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared setup (participants, clocks, services)
//! │
//! ├── integration/      # End-to-end lifecycle through the service
//! │   ├── scenarios.rs  # Stake / countdown / complete / refund flows
//! │   ├── model.rs      # Randomized operations against a reference model
//! │   └── concurrency.rs# Threads racing deposits, finalize and refunds
//! │
//! └── exploits/         # Attack simulations
//!     ├── reentrancy.rs # Callbacks from beneficiary / payout adapters
//!     └── accounting.rs # Double refunds, late deposits, dust
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p qc-tests
//! cargo test -p qc-tests integration::
//! cargo test -p qc-tests exploits::
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
