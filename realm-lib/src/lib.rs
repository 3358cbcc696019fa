mod constant;
pub mod dice;
pub mod error;
mod evaluator;
mod parser;
pub mod roll;
pub mod segment;
pub mod solver;

pub use constant::ConstantModifier;
pub use dice::DiceRoll;
pub use evaluator::evaluate;
pub use parser::parse;
pub use segment::Batch;
pub use segment::RollSegment;
pub use solver::evaluate_all;
pub use solver::evaluate_all_seeded;
pub use solver::evaluate_batch;

#[cfg(test)]
mod tests {
    use crate::dice::Critic;
    use crate::dice::DiceRoll;
    use crate::dice::Modifier;
    use crate::error::Error;
    use crate::evaluate;
    use crate::evaluate_all;
    use crate::evaluate_all_seeded;
    use crate::evaluate_batch;
    use crate::parse;
    use crate::roll::Source;
    use crate::roll::Thresholds;
    use crate::roll::Verdict;
    use crate::solver::RandomSource;
    use crate::solver::Solver;
    use crate::ConstantModifier;
    use crate::RollSegment;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub struct MockIter<'a, T: Iterator<Item = u64>> {
        pub iter: &'a mut T,
    }

    impl<T: Iterator<Item = u64>> Source for MockIter<'_, T> {
        fn throw(&mut self, faces: u64) -> u64 {
            match self.iter.next() {
                Some(value) => {
                    if value > faces {
                        panic!("Tried to return {} for a {} sided dice", value, faces)
                    }
                    value
                }
                None => panic!("Iterator out of values"),
            }
        }
    }

    fn values(rolls: Option<&[crate::dice::Outcome]>) -> Vec<u64> {
        rolls.unwrap().iter().map(|r| r.value).collect()
    }

    #[test]
    fn one_dice_test() {
        let r = Solver::new("d20").unwrap();
        let roll_mock = vec![8];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        assert_eq!(1, res.len());
        let batch = &res[0];
        assert_eq!(1, batch.len());
        assert_eq!(vec![8], values(batch[0].get_rolls()));
        assert_eq!(8, batch[0].get_total());
        assert_eq!(8, batch.get_grand_total());
        assert_eq!(None, batch.get_verdict());
    }

    #[test]
    fn plain_dice_in_range_test() {
        let mut rng = StdRng::seed_from_u64(7);
        let segment = RollSegment::Dice(DiceRoll::new(12, 8));
        for _ in 0..100 {
            let res = evaluate(&segment, &mut RandomSource { generator: &mut rng }).unwrap();
            let rolls = values(res.get_rolls());
            assert_eq!(12, rolls.len());
            assert!(rolls.iter().all(|v| (1..=8).contains(v)));
            assert_eq!(rolls.iter().sum::<u64>() as i64, res.get_total());
        }
    }

    #[test]
    fn keep_high_default_test() {
        let r = Solver::new("2d20kh").unwrap();
        let roll_mock = vec![4, 17];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        let segment = &res[0][0];
        assert_eq!(17, segment.get_total());
        assert_eq!(vec![4, 17], values(segment.get_rolls()));
        assert_eq!(Some("[4, 17] = **17**"), segment.get_trace());
    }

    #[test]
    fn keep_low_with_constant_test() {
        let r = Solver::new("4d20kl2+1").unwrap();
        let roll_mock = vec![12, 3, 19, 7];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        let batch = &res[0];
        assert_eq!(2, batch.len());
        assert_eq!(10, batch[0].get_total());
        assert_eq!(4, batch[0].get_rolls().unwrap().len());
        assert_eq!(1, batch[1].get_total());
        assert_eq!(None, batch[1].get_rolls());
        assert_eq!(None, batch[1].get_trace());
        assert_eq!(11, batch.get_grand_total());
        assert_eq!(vec![10, 1], batch.totals());
    }

    #[test]
    fn keep_two_of_four_test() {
        let mut rng = StdRng::seed_from_u64(42);
        let high = RollSegment::Dice(DiceRoll::new(4, 20).with_modifier(Modifier::KeepHigh(2)));
        let low = RollSegment::Dice(DiceRoll::new(4, 20).with_modifier(Modifier::KeepLow(2)));
        for _ in 0..50 {
            let mut source = RandomSource { generator: &mut rng };
            let res = evaluate(&high, &mut source).unwrap();
            let mut rolls = values(res.get_rolls());
            rolls.sort_unstable();
            assert_eq!((rolls[2] + rolls[3]) as i64, res.get_total());

            let res = evaluate(&low, &mut source).unwrap();
            let mut rolls = values(res.get_rolls());
            rolls.sort_unstable();
            assert_eq!((rolls[0] + rolls[1]) as i64, res.get_total());
        }
    }

    #[test]
    fn explode_unlimited_test() {
        let r = Solver::new("3d6!").unwrap();
        let roll_mock = vec![6, 6, 2, 3, 6, 1];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        let segment = &res[0][0];
        assert_eq!(vec![6, 6, 2, 3, 6, 1], values(segment.get_rolls()));
        assert_eq!(24, segment.get_total());
    }

    #[test]
    fn explode_limit_and_sub_test() {
        let r = Solver::new("4d6!3-1d4").unwrap();
        // first die explodes three times and is cut off on a fourth six
        let roll_mock = vec![6, 6, 6, 6, 2, 6, 1, 5, 3];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        let batch = &res[0];
        assert_eq!(vec![6, 6, 6, 6, 2, 6, 1, 5], values(batch[0].get_rolls()));
        assert_eq!(38, batch[0].get_total());
        assert_eq!(-3, batch[1].get_total());
        assert_eq!(Some("[3] = **-3**"), batch[1].get_trace());
        assert_eq!(35, batch.get_grand_total());
    }

    #[test]
    fn explode_limit_property_test() {
        let mut rng = StdRng::seed_from_u64(3);
        let segment = RollSegment::Dice(
            DiceRoll::new(20, 6).with_modifier(Modifier::Explode { limit: 3 }),
        );
        for _ in 0..200 {
            let res = evaluate(&segment, &mut RandomSource { generator: &mut rng }).unwrap();
            let rolls = values(res.get_rolls());
            let mut dice = 0;
            let mut run = 0;
            for value in rolls {
                if value == 6 && run < 3 {
                    run += 1;
                } else {
                    dice += 1;
                    run = 0;
                }
            }
            assert_eq!(20, dice);
            assert_eq!(0, run);
        }
    }

    #[test]
    fn explode_counter_reset_test() {
        let segment = RollSegment::Dice(
            DiceRoll::new(2, 4).with_modifier(Modifier::Explode { limit: 1 }),
        );
        let roll_mock = vec![4, 4, 4, 2];
        let res = evaluate(
            &segment,
            &mut MockIter {
                iter: &mut roll_mock.into_iter(),
            },
        )
        .unwrap();
        assert_eq!(vec![4, 4, 4, 2], values(res.get_rolls()));
        assert_eq!(14, res.get_total());
    }

    #[test]
    fn explode_one_sided_test() {
        let r = Solver::new("d1!").unwrap();
        assert!(matches!(r.solve(), Err(Error::Evaluation(_))));
        let r = Solver::new("2d1!2").unwrap();
        let res = r.solve().unwrap();
        assert_eq!(vec![1; 6], values(res[0][0].get_rolls()));
    }

    #[test]
    fn sign_test() {
        let positive = RollSegment::Dice(DiceRoll::new(3, 6));
        let negative = RollSegment::Dice(DiceRoll::new(3, 6).subtracted());
        let res_pos = evaluate(
            &positive,
            &mut MockIter {
                iter: &mut vec![2, 5, 4].into_iter(),
            },
        )
        .unwrap();
        let res_neg = evaluate(
            &negative,
            &mut MockIter {
                iter: &mut vec![2, 5, 4].into_iter(),
            },
        )
        .unwrap();
        assert_eq!(11, res_pos.get_total());
        assert_eq!(-11, res_neg.get_total());
        assert_eq!(res_pos.get_rolls(), res_neg.get_rolls());
        assert_eq!(Some("[2, 5, 4] = **11**"), res_pos.get_trace());
        assert_eq!(Some("[2, 5, 4] = **-11**"), res_neg.get_trace());
    }

    #[test]
    fn negative_keep_test() {
        let segment = RollSegment::Dice(
            DiceRoll::new(3, 6)
                .with_modifier(Modifier::KeepHigh(1))
                .subtracted(),
        );
        let res = evaluate(
            &segment,
            &mut MockIter {
                iter: &mut vec![2, 5, 4].into_iter(),
            },
        )
        .unwrap();
        assert_eq!(-5, res.get_total());
        assert_eq!(Some("[2, 5, 4] = **-5**"), res.get_trace());
    }

    #[test]
    fn constant_test() {
        let segment = RollSegment::Constant(ConstantModifier::new(4, true));
        let res = evaluate(
            &segment,
            &mut MockIter {
                iter: &mut std::iter::empty::<u64>(),
            },
        )
        .unwrap();
        assert_eq!(-4, res.get_total());
        assert_eq!(None, res.get_rolls());
        assert_eq!(None, res.get_trace());
        assert_eq!("-4", res.get_segment().raw());
    }

    #[test]
    fn get_repeat_test() {
        let r = Solver::new("2d6+1d4x4").unwrap();
        let roll_mock = vec![3, 5, 1, 6, 6, 2, 2, 2, 1, 1, 4, 4];
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut roll_mock.into_iter(),
            })
            .unwrap();
        assert_eq!(4, res.len());
        assert_eq!(vec![9, 14, 5, 9], res.totals());
        for batch in res.iter() {
            assert_eq!(2, batch.len());
            assert_eq!("2d6", batch[0].get_segment().raw());
            assert_eq!("+1d4", batch[1].get_segment().raw());
        }
    }

    #[test]
    fn seeded_repeat_test() {
        let batches = parse("4d6!+2d20kh-3x5").unwrap();
        let first = evaluate_all_seeded(&batches, Thresholds::default(), 1234).unwrap();
        let second = evaluate_all_seeded(&batches, Thresholds::default(), 1234).unwrap();
        assert_eq!(5, first.len());
        assert_eq!(first, second);

        // each batch only depends on its own index
        let tail = evaluate_all_seeded(&batches[1..], Thresholds::default(), 1235).unwrap();
        assert_eq!(&first[1..], &tail[..]);
    }

    #[test]
    fn seeded_solver_test() {
        let r = Solver::new("3d6 + 2").unwrap();
        assert_eq!(r.solve_seeded(99).unwrap(), r.solve_seeded(99).unwrap());
        let mut lhs = StdRng::seed_from_u64(5);
        let mut rhs = StdRng::seed_from_u64(5);
        assert_eq!(r.solve_with(&mut lhs).unwrap(), r.solve_with(&mut rhs).unwrap());
    }

    #[test]
    fn thresholds_test() {
        let batches = parse("2d10+3").unwrap();
        let bounds = Thresholds::new(Some(10), Some(20));
        let res = evaluate_batch(
            &batches[0],
            bounds,
            &mut MockIter {
                iter: &mut vec![5, 7].into_iter(),
            },
        )
        .unwrap();
        assert_eq!(15, res.get_grand_total());
        assert_eq!(Some(Verdict::Success), res.get_verdict());

        let res = evaluate_batch(
            &batches[0],
            bounds,
            &mut MockIter {
                iter: &mut vec![10, 10].into_iter(),
            },
        )
        .unwrap();
        assert_eq!(23, res.get_grand_total());
        assert_eq!(Some(Verdict::Failure), res.get_verdict());
    }

    #[test]
    fn successes_test() {
        let r = Solver::new("d20x3")
            .unwrap()
            .with_thresholds(Thresholds::new(Some(10), None));
        let res = r
            .solve_with_source(&mut MockIter {
                iter: &mut vec![3, 15, 10].into_iter(),
            })
            .unwrap();
        assert_eq!(2, res.successes());
        let verdicts: Vec<_> = res.iter().map(|b| b.get_verdict()).collect();
        assert_eq!(
            vec![
                Some(Verdict::Failure),
                Some(Verdict::Success),
                Some(Verdict::Success)
            ],
            verdicts
        );
    }

    #[test]
    fn keep_out_of_range_test() {
        for formula in ["2d6kh3", "2d6kl2", "3d6kh0", "d20kh"] {
            let r = Solver::new(formula).unwrap();
            match r.solve() {
                Err(Error::Evaluation(error)) => {
                    assert!(error.message.starts_with("keep count out of range"))
                }
                other => panic!("{formula}: {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_dice_test() {
        for formula in ["d0", "0d6", "5001d6", "d5001"] {
            let r = Solver::new(formula).unwrap();
            assert!(matches!(r.solve(), Err(Error::Evaluation(_))), "{formula}");
        }
    }

    #[test]
    fn parse_failure_test() {
        assert!(matches!(Solver::new("foo"), Err(Error::Parse(_))));
    }

    #[test]
    fn fail_fast_test() {
        let batches = parse("2d6+1d6kh1").unwrap();
        let res = evaluate_all(
            &batches,
            Thresholds::default(),
            &mut MockIter {
                iter: &mut vec![1, 2].into_iter(),
            },
        );
        assert!(res.is_err());
    }

    #[test]
    fn bad_source_test() {
        struct Zero;
        impl Source for Zero {
            fn throw(&mut self, _: u64) -> u64 {
                0
            }
        }
        let segment = RollSegment::Dice(DiceRoll::new(1, 6));
        assert!(evaluate(&segment, &mut Zero).is_err());
    }

    #[test]
    fn critics_test() {
        let segment = RollSegment::Dice(DiceRoll::new(3, 6));
        let res = evaluate(
            &segment,
            &mut MockIter {
                iter: &mut vec![6, 3, 1].into_iter(),
            },
        )
        .unwrap();
        assert_eq!(vec![Critic::Max, Critic::Min], res.critics().collect::<Vec<_>>());
    }

    #[test]
    fn grand_total_overflow_test() {
        let batches = parse("d6+9223372036854775807").unwrap();
        let res = evaluate_all(
            &batches,
            Thresholds::default(),
            &mut MockIter {
                iter: &mut vec![6].into_iter(),
            },
        );
        assert!(res.is_err());
    }

    #[test]
    fn explode_cap_test() {
        struct Highest;
        impl Source for Highest {
            fn throw(&mut self, faces: u64) -> u64 {
                faces
            }
        }
        let r = Solver::new("2d6!").unwrap();
        match r.solve_with_source(&mut Highest) {
            Err(Error::Evaluation(error)) => {
                assert!(error.message.starts_with("too many dice rolled"))
            }
            other => panic!("{other:?}"),
        }
    }

    #[test]
    fn constant_too_large_test() {
        let batches = parse("d6+9223372036854775808").unwrap();
        let res = evaluate(
            &batches[0][1],
            &mut MockIter {
                iter: &mut std::iter::empty::<u64>(),
            },
        );
        assert_eq!("constant too large", res.unwrap_err().message);
    }

    #[test]
    fn solver_query_test() {
        let r = Solver::new("d20 + 5 x3").unwrap();
        assert_eq!("d20 + 5 x3", r.as_str());
        assert_eq!(3, r.batches().len());
        assert_eq!("d20+5", r.batches()[0].to_string());
    }
}
