//! # Accounting Attacks
//!
//! Call sequences that try to extract more than was deposited or to get
//! value stuck in the pool.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use qc_18_staking_pool::prelude::*;

    // =============================================================================
    // DOUBLE SPEND
    // =============================================================================

    #[test]
    fn test_double_refund_blocked() {
        let service = default_service();
        let attacker = participant(66);
        service.deposit(attacker, milli_ether(100)).unwrap();
        service.deposit(participant(1), milli_ether(300)).unwrap();
        service.clock().advance(60);

        service.refund(attacker).unwrap();
        for _ in 0..5 {
            assert_eq!(
                service.refund(attacker),
                Err(PoolError::NoBalance {
                    participant: attacker
                })
            );
        }

        assert_eq!(service.payout().balance_of(&attacker), milli_ether(100));
        assert_eq!(service.escrow_balance(), milli_ether(300));
        assert_eq!(service.balance_of(&participant(1)), milli_ether(300));
    }

    #[test]
    fn test_refund_cannot_claim_another_participants_deposit() {
        let service = default_service();
        service.deposit(participant(1), ether(1)).unwrap();
        service.clock().advance(30);

        let stranger = participant(2);
        assert_eq!(
            service.refund(stranger),
            Err(PoolError::NoBalance {
                participant: stranger
            })
        );
        assert_eq!(service.payout().balance_of(&stranger), U256::zero());
        assert_eq!(service.balance_of(&participant(1)), ether(1));
    }

    #[test]
    fn test_finalize_twice_pays_beneficiary_once() {
        let service = default_service();
        service.deposit(participant(1), ether(2)).unwrap();
        service.finalize().unwrap();

        assert_eq!(service.finalize(), Err(PoolError::AlreadyCompleted));
        assert_eq!(service.beneficiary().balance(), ether(2));
        assert_eq!(service.events().by_topic(topics::COMPLETED).len(), 1);
    }

    #[test]
    fn test_refund_after_completion_cannot_reclaim() {
        let service = default_service();
        let p = participant(1);
        service.deposit(p, ether(1)).unwrap();
        service.finalize().unwrap();
        service.clock().advance(1_000);

        assert_eq!(service.refund(p), Err(PoolError::AlreadyCompleted));
        assert_eq!(service.payout().balance_of(&p), U256::zero());
        // Completed pools keep the ledger as history but hold no value
        assert_eq!(service.balance_of(&p), ether(1));
        assert_eq!(service.escrow_balance(), U256::zero());
    }

    // =============================================================================
    // LATE AND DUST DEPOSITS
    // =============================================================================

    #[test]
    fn test_deposit_at_deadline_rejected() {
        let service = default_service();
        service.clock().set(service.deadline());

        assert_eq!(
            service.deposit(participant(1), ether(5)),
            Err(PoolError::DeadlineReached)
        );
        assert_eq!(service.escrow_balance(), U256::zero());
        assert_eq!(service.state(), PoolState::Expired);
    }

    #[test]
    fn test_late_deposit_cannot_block_refunds() {
        let service = default_service();
        let p = participant(1);
        service.deposit(p, milli_ether(10)).unwrap();
        service.clock().advance(30);

        assert!(service.deposit(participant(2), ether(10)).is_err());
        assert!(service.finalize().is_err());
        service.refund(p).unwrap();
        assert_eq!(service.payout().balance_of(&p), milli_ether(10));
    }

    #[test]
    fn test_zero_deposit_rejected() {
        let service = default_service();
        assert_eq!(
            service.deposit(participant(1), U256::zero()),
            Err(PoolError::InvalidAmount)
        );
        assert_eq!(service.sequence(), 0);
        assert!(service.events().is_empty());
        assert_eq!(service.stats().rejected_requests, 1);
    }

    #[test]
    fn test_one_wei_deposits_refund_exactly() {
        let service = default_service();
        let p = participant(1);
        for _ in 0..1_000 {
            service.deposit(p, U256::one()).unwrap();
        }
        service.clock().advance(30);

        let receipt = service.refund(p).unwrap();
        assert_eq!(receipt.amount, U256::from(1_000));
        assert_eq!(service.payout().balance_of(&p), U256::from(1_000));
    }

    #[test]
    fn test_threshold_missed_by_one_wei() {
        let service = default_service();
        service
            .deposit(participant(1), ether(1) - U256::one())
            .unwrap();

        assert_eq!(
            service.finalize(),
            Err(PoolError::ThresholdNotMet {
                total: ether(1) - U256::one(),
                threshold: ether(1),
            })
        );

        service.deposit(participant(2), U256::one()).unwrap();
        assert!(service.finalize().unwrap().is_completed());
        assert_eq!(service.beneficiary().balance(), ether(1));
    }

    // =============================================================================
    // OVERFLOW
    // =============================================================================

    #[test]
    fn test_overflowing_deposit_rejected_without_side_effects() {
        let service = service_with_window(30, U256::MAX);
        service.deposit(participant(1), U256::MAX).unwrap();

        assert_eq!(
            service.deposit(participant(2), U256::one()),
            Err(PoolError::Overflow)
        );
        assert_eq!(service.balance_of(&participant(2)), U256::zero());
        assert_eq!(service.total_deposited(), U256::MAX);
        assert!(service.check_invariants().is_ok());
    }

    // =============================================================================
    // FAILED PAYOUTS
    // =============================================================================

    #[test]
    fn test_frozen_recipient_keeps_balance_for_retry() {
        let service = default_service();
        let p = participant(1);
        service.deposit(p, ether(1)).unwrap();
        service.clock().advance(30);
        service.payout().freeze(p);

        let err = service.refund(p).unwrap_err();
        assert!(matches!(err, PoolError::TransferFailed { .. }));
        assert!(err.is_retryable());
        assert_eq!(service.balance_of(&p), ether(1));

        service.payout().unfreeze(&p);
        service.refund(p).unwrap();
        assert_eq!(service.payout().balance_of(&p), ether(1));
        assert_eq!(service.stats().transfer_failures, 1);
    }
}
