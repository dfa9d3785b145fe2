#![forbid(unsafe_code)]

//! Deferred effects: the machine's only contact with time.
//!
//! A transition that needs a timer returns an [`Effect::Schedule`] naming
//! the timer's kind, its delay, and a [`TimerKey`] of
//! `(problem-identity, step-id)`. The host arms the timer and, when it
//! fires, calls [`apply_timer`](crate::apply_timer) with the same key and
//! kind. On a problem change the host cancels everything for the retired
//! problem ([`Effect::CancelProblem`]); even if it fails to, the machine
//! ignores keys whose problem does not match the live snapshot.

use longhand_core::{ProblemId, StepId};
use std::time::Duration;

/// How long a committed step's lock-in pulse shows.
pub const LOCK_PULSE: Duration = Duration::from_millis(350);
/// How long the error flash shows after a wrong digit.
pub const ERROR_PULSE: Duration = Duration::from_millis(250);
/// How long input is refused after a wrong digit.
pub const RETRY_LOCK: Duration = Duration::from_millis(600);
/// Delay before a bring-down digit slides into place and auto-commits.
pub const BRING_DOWN_SLIDE: Duration = Duration::from_millis(450);

/// Identity of one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerKey {
    /// The problem the timer belongs to.
    pub problem: ProblemId,
    /// The step the timer acts on.
    pub step: StepId,
}

impl TimerKey {
    /// Key a timer to `(problem, step)`.
    #[inline]
    pub const fn new(problem: ProblemId, step: StepId) -> Self {
        Self { problem, step }
    }
}

/// What a fired timer means to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// End of the fixed-duration lock-in pulse on a committed step.
    LockPulse,
    /// End of the error flash (visual only).
    ErrorPulse,
    /// End of the retry lock; the step accepts input again.
    RetryUnlock,
    /// The bring-down slide finished; the step auto-commits.
    BringDownSlide,
}

/// A deferred command for the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Arm a timer; when it elapses, feed it back via
    /// [`apply_timer`](crate::apply_timer).
    Schedule {
        key: TimerKey,
        kind: TimerKind,
        after: Duration,
    },
    /// Cancel every pending timer keyed to `problem`. Emitted when a
    /// problem is retired.
    CancelProblem { problem: ProblemId },
}

impl Effect {
    /// Shorthand for a schedule effect.
    #[inline]
    pub const fn schedule(key: TimerKey, kind: TimerKind, after: Duration) -> Self {
        Self::Schedule { key, kind, after }
    }
}
