//! # Staking Node
//!
//! Deploys a beneficiary and a staking pool, in that order, and prints their
//! addresses.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load `StakingConfig` from the environment
//! 3. Resolve the deployer (`QC_DEPLOYER`, 20 bytes hex)
//! 4. Derive addresses: beneficiary at nonce 0, pool at nonce 1
//! 5. Create the pool with `deadline = now + window`
//! 6. With `--watch`, log the countdown until the deadline or Ctrl+C

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use qc_18_staking_pool::prelude::*;

type NodeService =
    StakingPoolService<InMemoryBeneficiary, InMemoryWallets, SystemClock, TracingEventPublisher>;

/// Resolve the deployer address from `QC_DEPLOYER`.
fn load_deployer() -> Result<Address> {
    match std::env::var("QC_DEPLOYER") {
        Ok(raw) => {
            let bytes = hex::decode(raw.trim().trim_start_matches("0x"))
                .context("QC_DEPLOYER must be hex encoded")?;
            Address::from_slice(&bytes).context("QC_DEPLOYER must be 20 bytes (40 hex chars)")
        }
        Err(_) => {
            warn!("QC_DEPLOYER not set, using the test deployer");
            Ok(TEST_DEPLOYER)
        }
    }
}

/// Deploy the beneficiary and the pool.
fn deploy(config: &StakingConfig, deployer: Address) -> Result<NodeService> {
    let clock = Arc::new(SystemClock);
    let beneficiary_address = derive_contract_address(deployer, 0);
    let pool_address = derive_contract_address(deployer, 1);

    let params = config
        .pool_params(pool_address, beneficiary_address, clock.now())
        .context("cannot derive pool parameters")?;

    Ok(StakingPoolService::new(
        Pool::new(params),
        Arc::new(InMemoryBeneficiary::new(beneficiary_address)),
        Arc::new(InMemoryWallets::new()),
        clock,
        Arc::new(TracingEventPublisher),
    ))
}

/// Log the remaining time every second until the deadline.
async fn watch(service: &NodeService) {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let left = service.time_left();
                info!(
                    time_left = left,
                    total = %service.total_deposited(),
                    "[qc-18] Countdown"
                );
                if left == 0 {
                    info!(state = ?service.state(), "[qc-18] Deadline reached");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = StakingConfig::from_env().context("invalid staking configuration")?;
    let deployer = load_deployer()?;
    let service = deploy(&config, deployer)?;

    println!("External deployed at: {:?}", service.beneficiary().address());
    println!("Staker deployed at: {:?}", service.address());

    info!(
        deadline = service.deadline(),
        threshold = %service.threshold(),
        policy = ?config.finalize_policy,
        "[qc-18] Pool ready"
    );

    if std::env::args().any(|arg| arg == "--watch") {
        watch(&service).await;
    }

    Ok(())
}
