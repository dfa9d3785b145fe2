#![forbid(unsafe_code)]

//! Live typing state machine for long-division practice.
//!
//! This crate bridges raw per-keystroke and paste events to step
//! commitment while enforcing exactly one editable entry at a time.
//! Every transition is a pure function from an immutable [`TypingState`]
//! snapshot to a [`Transition`] carrying the next snapshot, so concurrent
//! re-reads (renderers, save calls) always observe a fully-applied state.
//!
//! Timed behavior is never executed here. Transitions return
//! [`Effect`]s - deferred commands such as "schedule a bring-down slide in
//! 450ms keyed by (problem, step)" - which a host environment executes and
//! feeds back in via [`apply_timer`]. This keeps the machine fully
//! testable without fake clocks, and lets a problem change cancel stale
//! timers deterministically: a timer keyed to a discarded problem is
//! ignored.
//!
//! # Example
//!
//! ```
//! use longhand_core::{Problem, ProblemId, StepIdGen, compute_steps};
//! use longhand_engine::{TypingState, apply_input};
//!
//! let problem = Problem::new(84, 4).unwrap();
//! let mut ids = StepIdGen::new();
//! let steps = compute_steps(&problem, &mut ids);
//! let state = TypingState::new(ProblemId::new(1), steps.len());
//!
//! // First step expects quotient digit 2.
//! let t = apply_input(&steps, &state, steps[0].id, "2");
//! assert!(t.did_advance);
//! assert_eq!(t.state.revealed_step_count(), 1);
//! ```

pub mod effect;
pub mod state;
pub mod transition;

pub use effect::{
    BRING_DOWN_SLIDE, ERROR_PULSE, Effect, LOCK_PULSE, RETRY_LOCK, TimerKey, TimerKind,
};
pub use state::TypingState;
pub use transition::{Transition, apply_backspace, apply_input, apply_timer, bootstrap};
