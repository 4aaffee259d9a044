//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports.

pub mod beneficiary;
pub mod clock;
pub mod event_log;
pub mod wallets;

pub use beneficiary::InMemoryBeneficiary;
pub use clock::{ManualClock, SystemClock};
pub use event_log::{InMemoryEventLog, TracingEventPublisher};
pub use wallets::InMemoryWallets;
