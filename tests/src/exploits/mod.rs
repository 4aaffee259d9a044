//! # Exploit Simulations
//!
//! Adversarial adapters and call sequences aimed at draining or
//! double-spending the pool.
//!
//! | Attack | Expected defense |
//! |--------|------------------|
//! | Beneficiary calls back into the pool | `TransactionInProgress` |
//! | Payout recipient re-enters `refund` | `TransactionInProgress`, single credit |
//! | Beneficiary acknowledges a wrong amount | `TransferFailed`, pool stays open |
//! | Refund twice | `NoBalance` |
//! | Deposit after deadline or completion | Rejected, nothing escrowed |

pub mod accounting;
