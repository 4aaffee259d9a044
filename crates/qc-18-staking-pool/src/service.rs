//! # Staking Pool Service
//!
//! Thread-safe front of the `Pool` aggregate, wired to the outbound ports.
//!
//! ## Transaction Model
//!
//! - Every call reads the clock and mutates the pool under one lock, so the
//!   gate check and the commit see the same state.
//! - Transfers (beneficiary on finalize, participant on refund) run with the
//!   lock released but the pool's transfer guard set. Mutating calls from
//!   other threads wait until the transfer resolves, then re-check the gate.
//!   A mutating call from inside the adapter (same thread) is refused with
//!   `PoolError::TransactionInProgress`.
//! - Queries never wait; during a transfer they see the pre-transfer state.
//! - Events are published after the commit and carry the commit sequence.

use crate::adapters::{InMemoryBeneficiary, InMemoryEventLog, InMemoryWallets, ManualClock};
use crate::config::{ConfigError, StakingConfig};
use crate::domain::entities::{
    DepositReceipt, FinalizeOutcome, FinalizeStep, Pool, TransferReceipt,
};
use crate::domain::errors::PoolError;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::services::derive_contract_address;
use crate::domain::value_objects::{Address, PoolState, Timestamp, U256};
use crate::events::PoolEvent;
use crate::ports::inbound::StakingPoolApi;
use crate::ports::outbound::{Beneficiary, Clock, EventPublisher, Payout};

use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, info, instrument, warn};

/// Statistics for the Staking Pool Service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Deposits committed.
    pub deposits_accepted: u64,
    /// Finalize calls that completed the pool.
    pub finalizations: u64,
    /// Finalize calls that were no-ops below threshold.
    pub finalize_noops: u64,
    /// Refunds paid.
    pub refunds_paid: u64,
    /// Calls rejected by a precondition.
    pub rejected_requests: u64,
    /// Beneficiary or payout transfers that failed.
    pub transfer_failures: u64,
    /// Nested calls rejected because their own transfer was in flight.
    pub reentrant_rejections: u64,
    /// Calls that waited for another thread's transfer.
    pub transfer_waits: u64,
}

/// The pool and the thread driving its in-flight transfer.
struct PoolSlot {
    pool: Pool,
    transfer_owner: Option<ThreadId>,
}

/// The staking pool service.
pub struct StakingPoolService<B, P, C, E>
where
    B: Beneficiary,
    P: Payout,
    C: Clock,
    E: EventPublisher,
{
    slot: Mutex<PoolSlot>,
    /// Signalled whenever a transfer resolves.
    transfer_done: Condvar,
    beneficiary: Arc<B>,
    payout: Arc<P>,
    clock: Arc<C>,
    events: Arc<E>,
    stats: Mutex<ServiceStats>,
}

impl<B, P, C, E> StakingPoolService<B, P, C, E>
where
    B: Beneficiary,
    P: Payout,
    C: Clock,
    E: EventPublisher,
{
    /// Create a service around `pool`.
    pub fn new(
        pool: Pool,
        beneficiary: Arc<B>,
        payout: Arc<P>,
        clock: Arc<C>,
        events: Arc<E>,
    ) -> Self {
        if pool.beneficiary() != beneficiary.address() {
            warn!(
                expected = %pool.beneficiary(),
                actual = %beneficiary.address(),
                "[qc-18] Beneficiary adapter address differs from pool parameters"
            );
        }

        info!(
            pool = %pool.address(),
            beneficiary = %pool.beneficiary(),
            deadline = pool.deadline(),
            threshold = %pool.threshold(),
            "[qc-18] Staking pool created"
        );

        Self {
            slot: Mutex::new(PoolSlot {
                pool,
                transfer_owner: None,
            }),
            transfer_done: Condvar::new(),
            beneficiary,
            payout,
            clock,
            events,
            stats: Mutex::new(ServiceStats::default()),
        }
    }

    /// Current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.lock().clone()
    }

    /// Run the accounting invariants against the current pool.
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(&self.slot.lock().pool)
    }

    /// Pool address.
    pub fn address(&self) -> Address {
        self.slot.lock().pool.address()
    }

    /// Number of committed transitions.
    pub fn sequence(&self) -> u64 {
        self.slot.lock().pool.sequence()
    }

    /// Beneficiary adapter.
    pub fn beneficiary(&self) -> &Arc<B> {
        &self.beneficiary
    }

    /// Payout adapter.
    pub fn payout(&self) -> &Arc<P> {
        &self.payout
    }

    /// Clock adapter.
    pub fn clock(&self) -> &Arc<C> {
        &self.clock
    }

    /// Event publisher.
    pub fn events(&self) -> &Arc<E> {
        &self.events
    }

    /// Lock the pool for a mutating call.
    ///
    /// Waits while a transfer started by another thread is in flight. The
    /// thread that owns the transfer gets the lock at once, so the pool
    /// refuses its nested call instead of deadlocking.
    fn lock_for_update(&self) -> MutexGuard<'_, PoolSlot> {
        let me = thread::current().id();
        let mut slot = self.slot.lock();
        let mut waited = false;
        while slot.pool.is_transfer_in_flight() && slot.transfer_owner != Some(me) {
            waited = true;
            self.transfer_done.wait(&mut slot);
        }
        if waited {
            self.stats.lock().transfer_waits += 1;
        }
        slot
    }

    /// Clear the transfer owner and wake waiting callers.
    fn release_transfer(&self, mut slot: MutexGuard<'_, PoolSlot>) {
        slot.transfer_owner = None;
        debug_assert!(check_all_invariants(&slot.pool).is_ok());
        drop(slot);
        self.transfer_done.notify_all();
    }

    fn record_rejection(&self, err: &PoolError) {
        let mut stats = self.stats.lock();
        match err {
            PoolError::TransactionInProgress => stats.reentrant_rejections += 1,
            PoolError::TransferFailed { .. } => stats.transfer_failures += 1,
            _ => stats.rejected_requests += 1,
        }
        debug!(error = %err, "[qc-18] Request rejected");
    }
}

impl<B, P, C, E> StakingPoolApi for StakingPoolService<B, P, C, E>
where
    B: Beneficiary,
    P: Payout,
    C: Clock,
    E: EventPublisher,
{
    #[instrument(skip(self))]
    fn deposit(&self, participant: Address, amount: U256) -> Result<DepositReceipt, PoolError> {
        let result = {
            let mut slot = self.lock_for_update();
            let now = self.clock.now();
            let result = slot.pool.deposit(participant, amount, now);
            debug_assert!(check_all_invariants(&slot.pool).is_ok());
            result
        };

        match &result {
            Ok(receipt) => {
                self.stats.lock().deposits_accepted += 1;
                self.events.publish(PoolEvent::from(receipt));
            }
            Err(e) => self.record_rejection(e),
        }
        result
    }

    #[instrument(skip(self))]
    fn finalize(&self) -> Result<FinalizeOutcome, PoolError> {
        let step = {
            let mut slot = self.lock_for_update();
            let now = self.clock.now();
            let step = slot.pool.begin_finalize(now);
            if let Ok(FinalizeStep::Transfer(_)) = &step {
                slot.transfer_owner = Some(thread::current().id());
            }
            step
        };

        let pending = match step {
            Ok(FinalizeStep::Transfer(pending)) => pending,
            Ok(FinalizeStep::BelowThreshold { total, threshold }) => {
                self.stats.lock().finalize_noops += 1;
                debug!(total = %total, threshold = %threshold, "[qc-18] Finalize below threshold, no-op");
                return Ok(FinalizeOutcome::BelowThreshold { total, threshold });
            }
            Err(e) => {
                self.record_rejection(&e);
                return Err(e);
            }
        };

        // Pool lock released, transfer guard held
        let transfer = self.beneficiary.accept_funds(pending.amount());

        let result = {
            let mut slot = self.slot.lock();
            let result = match transfer {
                Ok(ack) => slot.pool.complete_finalize(pending, ack),
                Err(e) => {
                    slot.pool.abort_finalize(pending);
                    Err(PoolError::from(e))
                }
            };
            self.release_transfer(slot);
            result
        };

        match &result {
            Ok(receipt) => {
                self.stats.lock().finalizations += 1;
                self.events.publish(PoolEvent::from(receipt));
            }
            Err(e) => {
                warn!(error = %e, "[qc-18] Finalize transfer failed, pool remains open");
                self.record_rejection(e);
            }
        }
        result.map(FinalizeOutcome::Completed)
    }

    #[instrument(skip(self))]
    fn refund(&self, participant: Address) -> Result<TransferReceipt, PoolError> {
        let pending = {
            let mut slot = self.lock_for_update();
            let now = self.clock.now();
            let pending = slot.pool.begin_refund(participant, now);
            if pending.is_ok() {
                slot.transfer_owner = Some(thread::current().id());
            }
            pending
        };
        let pending = match pending {
            Ok(pending) => pending,
            Err(e) => {
                self.record_rejection(&e);
                return Err(e);
            }
        };

        // Pool lock released, transfer guard held
        let transfer = self.payout.pay(pending.participant(), pending.amount());

        let result = {
            let mut slot = self.slot.lock();
            let result = match transfer {
                Ok(()) => slot.pool.complete_refund(pending),
                Err(e) => {
                    slot.pool.abort_refund(pending);
                    Err(PoolError::from(e))
                }
            };
            self.release_transfer(slot);
            result
        };

        match &result {
            Ok(receipt) => {
                self.stats.lock().refunds_paid += 1;
                self.events.publish(PoolEvent::from(receipt));
            }
            Err(e) => {
                warn!(error = %e, "[qc-18] Refund payout failed, balance kept");
                self.record_rejection(e);
            }
        }
        result
    }

    fn time_left(&self) -> u64 {
        let slot = self.slot.lock();
        slot.pool.time_left(self.clock.now())
    }

    fn balance_of(&self, participant: &Address) -> U256 {
        self.slot.lock().pool.balance_of(participant)
    }

    fn total_deposited(&self) -> U256 {
        self.slot.lock().pool.total_deposited()
    }

    fn escrow_balance(&self) -> U256 {
        self.slot.lock().pool.escrow_balance()
    }

    fn is_completed(&self) -> bool {
        self.slot.lock().pool.is_completed()
    }

    fn deadline(&self) -> Timestamp {
        self.slot.lock().pool.deadline()
    }

    fn threshold(&self) -> U256 {
        self.slot.lock().pool.threshold()
    }

    fn state(&self) -> PoolState {
        let slot = self.slot.lock();
        slot.pool.state(self.clock.now())
    }
}

/// Service wired to in-memory adapters.
pub type InMemoryStakingService =
    StakingPoolService<InMemoryBeneficiary, InMemoryWallets, ManualClock, InMemoryEventLog>;

/// Deployer used by `create_test_service`.
pub const TEST_DEPLOYER: Address = Address::new([0xDE; 20]);

/// Create a service on in-memory adapters with a manual clock at `start`.
///
/// Beneficiary and pool addresses are derived from `TEST_DEPLOYER` at
/// nonces 0 and 1, matching a beneficiary-then-pool deployment.
pub fn create_test_service(
    config: &StakingConfig,
    start: Timestamp,
) -> Result<InMemoryStakingService, ConfigError> {
    let beneficiary_address = derive_contract_address(TEST_DEPLOYER, 0);
    let pool_address = derive_contract_address(TEST_DEPLOYER, 1);
    let params = config.pool_params(pool_address, beneficiary_address, start)?;

    Ok(StakingPoolService::new(
        Pool::new(params),
        Arc::new(InMemoryBeneficiary::new(beneficiary_address)),
        Arc::new(InMemoryWallets::new()),
        Arc::new(ManualClock::new(start)),
        Arc::new(InMemoryEventLog::new()),
    ))
}
