//! # Domain Layer (Inner Hexagon)
//!
//! Pure staking pool logic: ledger, gate, pool aggregate, invariants.
//! NO I/O, NO locking. Time is passed in as `now`.

pub mod entities;
pub mod errors;
pub mod gate;
pub mod invariants;
pub mod ledger;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use gate::*;
pub use invariants::*;
pub use ledger::*;
pub use services::*;
pub use value_objects::*;
