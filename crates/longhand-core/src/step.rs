#![forbid(unsafe_code)]

//! Step types and id generation.
//!
//! A [`Step`] is one slot of the worked solution: a quotient digit, a
//! multiplication result, a subtraction result, or an automatic
//! bring-down. Steps are produced once per problem by
//! [`compute_steps`](crate::compute_steps) and never mutated; they are
//! addressed by [`StepId`] and by `sequence_index` (0-based, equal to
//! array position).
//!
//! Ids come from an injected [`StepIdGen`] threaded explicitly through the
//! sequencer call, never from a shared global counter.

use crate::problem::digits_of;

/// Unique identifier for a step within one problem's sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StepId(u32);

impl StepId {
    /// Raw value for storage or logging.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Reconstruct from a raw value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

/// Identifier of the visual input slot a step writes into.
///
/// Distinct from [`StepId`]: a bring-down shares its predecessor
/// subtraction's target because both land in the same combined row
/// container, so two steps may carry the same target id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct InputTargetId(u32);

impl InputTargetId {
    /// Raw value for storage or logging.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Reconstruct from a raw value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }
}

/// Monotonic id source for one problem's step sequence.
///
/// Created fresh per problem and passed by `&mut` into the sequencer, so
/// id allocation is explicit in the call graph rather than hidden in a
/// module-level counter.
#[derive(Debug, Clone, Default)]
pub struct StepIdGen {
    next: u32,
}

impl StepIdGen {
    /// A generator starting at id 0.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    #[inline]
    pub fn next_id(&mut self) -> StepId {
        let id = StepId(self.next);
        self.next += 1;
        id
    }
}

/// The four kinds of arithmetic step, as a closed, exhaustively-matched
/// union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// One digit of the final quotient.
    QuotientDigit,
    /// Quotient digit times divisor.
    MultiplyResult,
    /// Working value minus multiply result.
    SubtractionResult,
    /// Folding the next dividend digit into the working value. Never
    /// directly editable; auto-commits after a slide delay.
    BringDown,
}

impl StepKind {
    /// Whether the learner types this step's value (bring-downs animate
    /// instead).
    #[inline]
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::BringDown)
    }
}

/// One arithmetic step of the worked solution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    /// Unique id within the problem.
    pub id: StepId,
    /// 0-based position in the sequence; strictly increasing and equal to
    /// array position.
    pub sequence_index: usize,
    /// Which operation this step checks.
    pub kind: StepKind,
    /// The exact value the learner must enter (or that auto-commits, for
    /// bring-downs).
    pub expected_value: u64,
    /// Dividend column the step's rightmost digit displays under.
    pub digit_position: usize,
    /// Visual input slot; `None` would mean the step has no slot, but
    /// every kind currently carries one.
    pub input_target_id: Option<InputTargetId>,
}

impl Step {
    /// Expected value as base-10 digits, most significant first.
    pub fn expected_digits(&self) -> Vec<u8> {
        digits_of(self.expected_value)
    }

    /// Number of digits the learner must enter to commit this step.
    pub fn expected_len(&self) -> usize {
        self.expected_digits().len()
    }

    /// Expected value as text.
    pub fn expected_text(&self) -> String {
        self.expected_value.to_string()
    }
}
