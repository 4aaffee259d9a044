//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Ports (Inbound)**: `StakingPoolApi`
//! - **Driven Ports (Outbound)**: `Beneficiary`, `Payout`, `Clock`, `EventPublisher`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
