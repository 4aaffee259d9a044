//! # Test Fixtures

use qc_18_staking_pool::prelude::*;
use std::sync::Arc;

/// Deployment time used across the suite.
pub const START: Timestamp = 1_700_000_000;

/// Deterministic participant address.
pub fn participant(n: u64) -> Address {
    Address::from_low_u64(0x1000 + n)
}

/// Service with the default config (30 s window, 1 ether threshold).
pub fn default_service() -> InMemoryStakingService {
    service_with(StakingConfig::default())
}

/// Service with `window` seconds and `threshold` wei.
pub fn service_with_window(window: u64, threshold: U256) -> InMemoryStakingService {
    service_with(StakingConfig {
        deadline_window_secs: window,
        threshold,
        ..Default::default()
    })
}

/// Service built from `config`, deployed at `START`.
pub fn service_with(config: StakingConfig) -> InMemoryStakingService {
    create_test_service(&config, START).expect("test config must be valid")
}

/// Service with the default config on custom beneficiary and payout adapters.
pub type CustomService<B, P> = StakingPoolService<B, P, ManualClock, InMemoryEventLog>;

/// Address the default beneficiary is deployed at.
pub fn beneficiary_address() -> Address {
    derive_contract_address(TEST_DEPLOYER, 0)
}

/// Deploy a default-config pool at `START` paying out through the given adapters.
pub fn deploy_with<B: Beneficiary, P: Payout>(beneficiary: B, payout: P) -> CustomService<B, P> {
    let params = StakingConfig::default()
        .pool_params(
            derive_contract_address(TEST_DEPLOYER, 1),
            beneficiary.address(),
            START,
        )
        .expect("default config must be valid");
    StakingPoolService::new(
        Pool::new(params),
        Arc::new(beneficiary),
        Arc::new(payout),
        Arc::new(ManualClock::new(START)),
        Arc::new(InMemoryEventLog::new()),
    )
}
