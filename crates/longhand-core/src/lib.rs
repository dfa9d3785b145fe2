#![forbid(unsafe_code)]

//! Long-division problem model, step sequencer, and step validator.
//!
//! This crate is the pure heart of the tutoring engine. It knows how to
//! derive the canonical pencil-and-paper step sequence for a division
//! problem and how to judge a submitted value for any one of those steps.
//! It performs no I/O and holds no mutable state: everything here is a
//! value type or a pure function over value types.
//!
//! # Key Components
//!
//! - [`Problem`] - an invariant-checked division problem
//! - [`Step`] / [`StepKind`] - one arithmetic step of the worked solution
//! - [`compute_steps`] - Problem → ordered step sequence
//! - [`validate_step`] - exact-match validation with per-kind hints
//!
//! # Example
//!
//! ```
//! use longhand_core::{Problem, StepIdGen, StepKind, compute_steps};
//!
//! let problem = Problem::new(84, 4).unwrap();
//! let mut ids = StepIdGen::new();
//! let steps = compute_steps(&problem, &mut ids);
//!
//! assert_eq!(steps[0].kind, StepKind::QuotientDigit);
//! assert_eq!(steps[0].expected_value, 2);
//! assert_eq!(steps.last().unwrap().expected_value, problem.remainder());
//! ```

pub mod problem;
pub mod sequence;
pub mod step;
pub mod validate;

pub use problem::{DifficultyMeta, Problem, ProblemError, ProblemId};
pub use sequence::{compute_steps, working_values};
pub use step::{InputTargetId, Step, StepId, StepIdGen, StepKind};
pub use validate::{Outcome, Validation, hint_for, validate_step};
