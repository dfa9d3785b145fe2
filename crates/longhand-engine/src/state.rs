#![forbid(unsafe_code)]

//! The immutable typing-state snapshot.
//!
//! One [`TypingState`] exists per active problem. It is never mutated in
//! place: transition functions clone it, apply one change, and return the
//! new snapshot. That makes snapshots safe to hand to concurrent readers
//! (renderers, overlapping save calls) - they always see a fully-applied
//! state, never a partial one.
//!
//! `revealed_step_count` is monotonically non-decreasing for the lifetime
//! of one problem and resets only by constructing a fresh state for the
//! next problem.

use crate::effect::Effect;
use longhand_core::{ProblemId, Step, StepId};
use std::collections::{BTreeMap, BTreeSet};

/// Per-problem typing state. Mutable by replacement only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypingState {
    problem: ProblemId,
    step_count: usize,
    revealed_step_count: usize,
    /// Partial entries per step; a committed step's draft holds its full
    /// expected text.
    drafts: BTreeMap<StepId, String>,
    /// Steps currently showing the lock-in pulse. Transient.
    lock_pulsed: BTreeSet<StepId>,
    /// Steps currently flashing the error pulse. Transient.
    error_pulsed: BTreeSet<StepId>,
    /// Steps refusing input until their retry timer elapses. Transient.
    retry_locked: BTreeSet<StepId>,
}

impl TypingState {
    /// Fresh state for a problem with `step_count` steps: nothing
    /// revealed, nothing drafted.
    pub fn new(problem: ProblemId, step_count: usize) -> Self {
        Self {
            problem,
            step_count,
            revealed_step_count: 0,
            drafts: BTreeMap::new(),
            lock_pulsed: BTreeSet::new(),
            error_pulsed: BTreeSet::new(),
            retry_locked: BTreeSet::new(),
        }
    }

    /// State with the first `revealed` steps already committed, used when
    /// restoring a session mid-problem. Clamped to `step_count`.
    #[must_use]
    pub fn with_revealed(mut self, revealed: usize) -> Self {
        self.revealed_step_count = revealed.min(self.step_count);
        self
    }

    /// The problem this state belongs to.
    #[inline]
    pub fn problem(&self) -> ProblemId {
        self.problem
    }

    /// Total number of steps in the problem.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// How many steps have committed so far.
    #[inline]
    pub fn revealed_step_count(&self) -> usize {
        self.revealed_step_count
    }

    /// Whether every step has committed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.revealed_step_count >= self.step_count
    }

    /// Partial (or committed) entry text for a step.
    pub fn draft(&self, step: StepId) -> Option<&str> {
        self.drafts.get(&step).map(String::as_str)
    }

    /// Digits entered so far for a step.
    pub fn cursor(&self, step: StepId) -> usize {
        self.draft(step).map_or(0, str::len)
    }

    /// Whether the step is showing its lock-in pulse.
    pub fn is_lock_pulsed(&self, step: StepId) -> bool {
        self.lock_pulsed.contains(&step)
    }

    /// Whether the step is flashing its error pulse.
    pub fn is_error_pulsed(&self, step: StepId) -> bool {
        self.error_pulsed.contains(&step)
    }

    /// Whether the step is refusing input until its retry timer elapses.
    pub fn is_retry_locked(&self, step: StepId) -> bool {
        self.retry_locked.contains(&step)
    }

    /// The step at the reveal cursor, committed or not.
    pub fn current_step<'a>(&self, steps: &'a [Step]) -> Option<&'a Step> {
        steps.get(self.revealed_step_count)
    }

    /// The single step currently accepting input: revealed, uncommitted,
    /// editable, and not retry-locked. `None` while a bring-down is
    /// auto-advancing, while the active step is retry-locked, or once the
    /// problem is complete.
    pub fn active_step<'a>(&self, steps: &'a [Step]) -> Option<&'a Step> {
        self.current_step(steps)
            .filter(|s| s.kind.is_editable() && !self.is_retry_locked(s.id))
    }

    /// Effect retiring this problem's timers, for the host to run when
    /// the problem changes.
    pub fn retire(&self) -> Effect {
        Effect::CancelProblem {
            problem: self.problem,
        }
    }

    // Crate-internal accessors for the transition functions.

    pub(crate) fn drafts_mut(&mut self) -> &mut BTreeMap<StepId, String> {
        &mut self.drafts
    }

    pub(crate) fn lock_pulsed_mut(&mut self) -> &mut BTreeSet<StepId> {
        &mut self.lock_pulsed
    }

    pub(crate) fn error_pulsed_mut(&mut self) -> &mut BTreeSet<StepId> {
        &mut self.error_pulsed
    }

    pub(crate) fn retry_locked_mut(&mut self) -> &mut BTreeSet<StepId> {
        &mut self.retry_locked
    }

    pub(crate) fn advance(&mut self) {
        self.revealed_step_count += 1;
    }
}
