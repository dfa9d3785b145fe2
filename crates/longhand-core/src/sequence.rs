#![forbid(unsafe_code)]

//! The step sequencer: Problem → ordered step sequence.
//!
//! Mirrors the pencil-and-paper procedure exactly. The working value is
//! seeded with the leading dividend digit; while it is still smaller than
//! the divisor and digits remain, opening bring-down steps fold in further
//! digits. Each round then emits a quotient digit, its product, and the
//! subtraction result, followed by a bring-down whenever dividend digits
//! remain. Quotient digits of value 0 still emit their full round.
//!
//! The final subtraction step's expected value always equals the
//! problem's remainder.

use crate::problem::Problem;
use crate::step::{InputTargetId, Step, StepId, StepIdGen, StepKind};

/// Derive the canonical step sequence for `problem`.
///
/// Correctness depends entirely on the caller-supplied [`Problem`]
/// invariants; there are no error conditions.
pub fn compute_steps(problem: &Problem, ids: &mut StepIdGen) -> Vec<Step> {
    let digits = problem.dividend_digits();
    let divisor = problem.divisor();
    let mut steps: Vec<Step> = Vec::new();

    let mut working = u64::from(digits[0]);
    // Column of the rightmost digit currently folded into the working value.
    let mut position = 0usize;
    let mut next_digit = 1usize;

    let push = |steps: &mut Vec<Step>,
                    ids: &mut StepIdGen,
                    kind: StepKind,
                    expected: u64,
                    position: usize,
                    target: Option<InputTargetId>|
     -> StepId {
        let id = ids.next_id();
        let target = target.unwrap_or(InputTargetId::from_raw(id.raw()));
        steps.push(Step {
            id,
            sequence_index: steps.len(),
            kind,
            expected_value: expected,
            digit_position: position,
            input_target_id: Some(target),
        });
        id
    };

    // Opening bring-downs: the leading digit(s) alone are too small.
    while working < divisor && next_digit < digits.len() {
        let d = u64::from(digits[next_digit]);
        position = next_digit;
        push(&mut steps, ids, StepKind::BringDown, d, position, None);
        working = working * 10 + d;
        next_digit += 1;
    }

    loop {
        let quotient_digit = working / divisor;
        let product = quotient_digit * divisor;
        let difference = working - product;

        push(
            &mut steps,
            ids,
            StepKind::QuotientDigit,
            quotient_digit,
            position,
            None,
        );
        push(
            &mut steps,
            ids,
            StepKind::MultiplyResult,
            product,
            position,
            None,
        );
        let subtraction_target = {
            let id = push(
                &mut steps,
                ids,
                StepKind::SubtractionResult,
                difference,
                position,
                None,
            );
            InputTargetId::from_raw(id.raw())
        };

        if next_digit < digits.len() {
            let d = u64::from(digits[next_digit]);
            position = next_digit;
            // Shares the subtraction's input slot: both land in the
            // combined difference/bring-down row container.
            push(
                &mut steps,
                ids,
                StepKind::BringDown,
                d,
                position,
                Some(subtraction_target),
            );
            working = difference * 10 + d;
            next_digit += 1;
        } else {
            break;
        }
    }

    steps
}

/// Working value in scope at each step, parallel to the sequence.
///
/// For quotient, multiply, and subtraction steps this is the segment
/// currently being divided; for a bring-down it is the working value
/// *after* the digit folds in (what the learner sees slide into place).
pub fn working_values(problem: &Problem, steps: &[Step]) -> Vec<u64> {
    let digits = problem.dividend_digits();
    let divisor = problem.divisor();
    let mut out = Vec::with_capacity(steps.len());

    let mut working = u64::from(digits[0]);
    let mut next_digit = 1usize;
    let mut difference = 0u64;

    for step in steps {
        match step.kind {
            StepKind::BringDown => {
                let d = u64::from(digits[next_digit]);
                let base = if out.is_empty() || steps[step.sequence_index - 1].kind == StepKind::BringDown
                {
                    working
                } else {
                    difference
                };
                working = base * 10 + d;
                next_digit += 1;
                out.push(working);
            }
            StepKind::QuotientDigit => {
                debug_assert_eq!(step.expected_value, working / divisor);
                out.push(working);
            }
            StepKind::MultiplyResult => out.push(working),
            StepKind::SubtractionResult => {
                difference = working - (working / divisor) * divisor;
                out.push(working);
            }
        }
    }
    out
}
