#![forbid(unsafe_code)]

//! Step validation: exact-match comparison with per-kind hints.
//!
//! Stateless and idempotent. There is no partial credit and no numeric
//! tolerance: the submitted text must parse to exactly the expected
//! value. On a mismatch the hint wording is selected by the step's kind
//! so it explains the specific operation being checked.

use crate::step::{Step, StepKind};

/// Whether a submission matched the step's expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Result of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub outcome: Outcome,
    /// Present exactly when the outcome is [`Outcome::Incorrect`].
    pub hint: Option<String>,
}

impl Validation {
    /// Whether the submission was correct.
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.outcome == Outcome::Correct
    }
}

/// Validate `submitted` against `step`.
///
/// Never mutates the step; the same inputs always produce the same
/// result. A submission that is not a plain base-10 number is simply
/// incorrect (callers normally reject those at the input boundary before
/// reaching here).
pub fn validate_step(step: &Step, submitted: &str) -> Validation {
    let matches = submitted
        .parse::<u64>()
        .map(|v| v == step.expected_value)
        .unwrap_or(false);
    if matches {
        Validation {
            outcome: Outcome::Correct,
            hint: None,
        }
    } else {
        Validation {
            outcome: Outcome::Incorrect,
            hint: Some(hint_for(step.kind).to_owned()),
        }
    }
}

/// Hint wording for a mismatch on a step of `kind`.
///
/// Exposed so the typing engine can report digit-level mismatches with
/// the same wording without round-tripping through a whole-value parse.
pub fn hint_for(kind: StepKind) -> &'static str {
    match kind {
        StepKind::QuotientDigit => {
            "Count how many whole times the divisor fits into the working value."
        }
        StepKind::MultiplyResult => "Multiply the quotient digit you just wrote by the divisor.",
        StepKind::SubtractionResult => "Subtract the product from the working value above it.",
        StepKind::BringDown => "Bring down the next digit of the dividend.",
    }
}
