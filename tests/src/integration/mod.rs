//! # Integration Tests
//!
//! Full pool lifecycles driven through `StakingPoolApi`.

pub mod model;
