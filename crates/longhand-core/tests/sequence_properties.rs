//! Property-based invariant tests for the step sequencer.
//!
//! Invariants verified for arbitrary valid problems:
//!
//! 1. The sequence ends with a subtraction whose expected value equals
//!    `dividend % divisor`.
//! 2. Sequence indices equal array positions and step ids are unique.
//! 3. Every quotient digit appears, in order, with its multiply/subtract
//!    round; the concatenated quotient digits equal the true quotient.
//! 4. Each multiply result equals its quotient digit times the divisor,
//!    and each subtraction is non-negative and smaller than the divisor.
//! 5. Bring-down steps reproduce the dividend's digits left to right.
//! 6. Digit positions are non-decreasing and within the dividend's width.
//! 7. Replayed working values stay below divisor * 10.

use longhand_core::{Problem, StepIdGen, StepKind, compute_steps, working_values};
use proptest::prelude::*;
use std::collections::HashSet;

fn valid_problem() -> impl Strategy<Value = Problem> {
    (1u64..=999, 1u64..=999_999u64).prop_filter_map("dividend >= divisor", |(divisor, dividend)| {
        Problem::new(dividend, divisor).ok()
    })
}

proptest! {
    #[test]
    fn terminal_subtraction_equals_remainder(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let last = steps.last().unwrap();
        prop_assert_eq!(last.kind, StepKind::SubtractionResult);
        prop_assert_eq!(last.expected_value, problem.dividend() % problem.divisor());
    }

    #[test]
    fn indices_and_ids_are_well_formed(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let mut seen = HashSet::new();
        for (i, step) in steps.iter().enumerate() {
            prop_assert_eq!(step.sequence_index, i);
            prop_assert!(seen.insert(step.id));
        }
    }

    #[test]
    fn quotient_digits_concatenate_to_quotient(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let mut q = 0u64;
        for step in steps.iter().filter(|s| s.kind == StepKind::QuotientDigit) {
            prop_assert!(step.expected_value <= 9);
            q = q * 10 + step.expected_value;
        }
        prop_assert_eq!(q, problem.quotient());
    }

    #[test]
    fn rounds_are_arithmetically_consistent(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let working = working_values(&problem, &steps);
        for step in &steps {
            let w = working[step.sequence_index];
            match step.kind {
                StepKind::QuotientDigit => {
                    prop_assert_eq!(step.expected_value, w / problem.divisor());
                }
                StepKind::MultiplyResult => {
                    prop_assert_eq!(step.expected_value, (w / problem.divisor()) * problem.divisor());
                }
                StepKind::SubtractionResult => {
                    prop_assert_eq!(step.expected_value, w % problem.divisor());
                    prop_assert!(step.expected_value < problem.divisor());
                }
                StepKind::BringDown => {
                    prop_assert!(step.expected_value <= 9);
                }
            }
        }
    }

    #[test]
    fn bring_downs_replay_dividend_digits(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let digits = problem.dividend_digits();
        let brought: Vec<u64> = steps
            .iter()
            .filter(|s| s.kind == StepKind::BringDown)
            .map(|s| s.expected_value)
            .collect();
        // Every digit after the leading one is brought down exactly once.
        let expected: Vec<u64> = digits[1..].iter().map(|&d| u64::from(d)).collect();
        prop_assert_eq!(brought, expected);
    }

    #[test]
    fn digit_positions_are_monotonic(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let width = problem.dividend_digits().len();
        let mut prev = 0usize;
        for step in &steps {
            prop_assert!(step.digit_position < width);
            prop_assert!(step.digit_position >= prev);
            prev = step.digit_position;
        }
    }

    #[test]
    fn working_values_stay_bounded(problem in valid_problem()) {
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        for w in working_values(&problem, &steps) {
            prop_assert!(w < problem.divisor() * 10);
        }
    }
}
