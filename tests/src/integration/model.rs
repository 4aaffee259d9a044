//! # Reference Model
//!
//! Random operation sequences are applied both to the service and to a
//! plain in-test model of the pool. After every step the two must agree on
//! the result and on every observable balance.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use proptest::prelude::*;
    use qc_18_staking_pool::prelude::*;
    use std::collections::HashMap;

    const WINDOW: u64 = 30;
    const PARTICIPANTS: u8 = 4;

    fn threshold() -> U256 {
        milli_ether(8)
    }

    #[derive(Clone, Debug)]
    enum Op {
        Deposit(u8, u64),
        Finalize,
        Refund(u8),
        Advance(u64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..PARTICIPANTS, 0u64..5).prop_map(|(p, m)| Op::Deposit(p, m)),
            1 => Just(Op::Finalize),
            2 => (0..PARTICIPANTS).prop_map(Op::Refund),
            2 => (0u64..15).prop_map(Op::Advance),
        ]
    }

    #[derive(Default)]
    struct Model {
        elapsed: u64,
        balances: HashMap<Address, U256>,
        completed: bool,
        forwarded: U256,
        refunded: HashMap<Address, U256>,
    }

    impl Model {
        fn expired(&self) -> bool {
            self.elapsed >= WINDOW
        }

        fn total(&self) -> U256 {
            self.balances
                .values()
                .fold(U256::zero(), |acc, v| acc + *v)
        }

        fn deposit(&mut self, p: Address, amount: U256) -> Result<(), PoolError> {
            if self.completed {
                return Err(PoolError::AlreadyCompleted);
            }
            if self.expired() {
                return Err(PoolError::DeadlineReached);
            }
            if amount.is_zero() {
                return Err(PoolError::InvalidAmount);
            }
            *self.balances.entry(p).or_default() += amount;
            Ok(())
        }

        fn finalize(&mut self) -> Result<(), PoolError> {
            if self.completed {
                return Err(PoolError::AlreadyCompleted);
            }
            if self.expired() {
                return Err(PoolError::DeadlineReached);
            }
            let total = self.total();
            if total < threshold() {
                return Err(PoolError::ThresholdNotMet {
                    total,
                    threshold: threshold(),
                });
            }
            self.forwarded = total;
            self.completed = true;
            Ok(())
        }

        fn refund(&mut self, p: Address) -> Result<(), PoolError> {
            if self.completed {
                return Err(PoolError::AlreadyCompleted);
            }
            if !self.expired() {
                return Err(PoolError::DeadlineNotReached);
            }
            match self.balances.remove(&p) {
                Some(amount) => {
                    *self.refunded.entry(p).or_default() += amount;
                    Ok(())
                }
                None => Err(PoolError::NoBalance { participant: p }),
            }
        }

        fn escrow(&self) -> U256 {
            if self.completed {
                U256::zero()
            } else {
                self.total()
            }
        }
    }

    fn run(ops: Vec<Op>) -> Result<(), TestCaseError> {
        let service = service_with_window(WINDOW, threshold());
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Deposit(p, m) => {
                    let p = participant(u64::from(p));
                    let amount = milli_ether(m);
                    let expected = model.deposit(p, amount);
                    let actual = service.deposit(p, amount).map(|_| ());
                    prop_assert_eq!(actual, expected);
                }
                Op::Finalize => {
                    let expected = model.finalize();
                    let actual = service.finalize().map(|_| ());
                    prop_assert_eq!(actual, expected);
                }
                Op::Refund(p) => {
                    let p = participant(u64::from(p));
                    let expected = model.refund(p);
                    let actual = service.refund(p).map(|_| ());
                    prop_assert_eq!(actual, expected);
                }
                Op::Advance(secs) => {
                    model.elapsed += secs;
                    service.clock().advance(secs);
                }
            }

            prop_assert!(service.check_invariants().is_ok());
            prop_assert_eq!(service.is_completed(), model.completed);
            prop_assert_eq!(service.escrow_balance(), model.escrow());
            prop_assert_eq!(service.time_left(), WINDOW.saturating_sub(model.elapsed));
            prop_assert_eq!(service.beneficiary().balance(), model.forwarded);
            for i in 0..PARTICIPANTS {
                let p = participant(u64::from(i));
                prop_assert_eq!(
                    service.balance_of(&p),
                    model.balances.get(&p).copied().unwrap_or_default()
                );
                prop_assert_eq!(
                    service.payout().balance_of(&p),
                    model.refunded.get(&p).copied().unwrap_or_default()
                );
            }
        }

        // Conservation: everything deposited is escrowed, forwarded or refunded
        let deposited: U256 = service
            .events()
            .by_topic(topics::STAKE)
            .iter()
            .fold(U256::zero(), |acc, e| match e {
                PoolEvent::Stake { amount, .. } => acc + *amount,
                _ => acc,
            });
        let refunded = model
            .refunded
            .values()
            .fold(U256::zero(), |acc, v| acc + *v);
        prop_assert_eq!(deposited, service.escrow_balance() + model.forwarded + refunded);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_service_matches_model(ops in prop::collection::vec(op_strategy(), 1..60)) {
            run(ops)?;
        }
    }

    #[test]
    fn test_model_threshold_then_refund_blocked() {
        run(vec![
            Op::Deposit(0, 4),
            Op::Deposit(1, 4),
            Op::Finalize,
            Op::Advance(40),
            Op::Refund(0),
            Op::Deposit(2, 1),
        ])
        .unwrap();
    }
}
