#![forbid(unsafe_code)]

//! Public facade for the long-division tutoring engine.
//!
//! Re-exports the stable surface from the internal crates and offers a
//! lightweight prelude for day-to-day usage. A host application drives
//! one problem at a time:
//!
//! ```
//! use longhand::prelude::*;
//!
//! let problem = Problem::new(87, 4).unwrap();
//! let mut ids = StepIdGen::new();
//! let steps = compute_steps(&problem, &mut ids);
//! let mut state = TypingState::new(ProblemId::new(1), steps.len());
//!
//! // The learner types the first quotient digit.
//! let t = apply_input(&steps, &state, steps[0].id, "2");
//! state = t.state;
//!
//! let model = build_render_model_live(problem.divisor(), problem.dividend(), &steps, &state);
//! assert_eq!(model.cells().filter(|c| c.is_active).count(), 1);
//! ```

// --- Core re-exports -------------------------------------------------------

pub use longhand_core::{
    DifficultyMeta, InputTargetId, Outcome, Problem, ProblemError, ProblemId, Step, StepId,
    StepIdGen, StepKind, Validation, compute_steps, validate_step, working_values,
};

// --- Engine re-exports -----------------------------------------------------

pub use longhand_engine::{
    BRING_DOWN_SLIDE, ERROR_PULSE, Effect, LOCK_PULSE, RETRY_LOCK, TimerKey, TimerKind, Transition,
    TypingState, apply_backspace, apply_input, apply_timer, bootstrap,
};

// --- Render re-exports -----------------------------------------------------

pub use longhand_render::{
    ActiveStepFocus, ColumnSpan, DigitCell, FocusHighlight, FocusTracker, RenderModel,
    SolvedLayout, SolvedRow, WorkRow, WorkRowKind, build_render_model, build_render_model_live,
    build_solved_layout,
};

/// Everything a host application typically needs.
pub mod prelude {
    pub use crate::{
        Effect, Problem, ProblemId, Step, StepId, StepIdGen, StepKind, TimerKey, TimerKind,
        Transition, TypingState, apply_backspace, apply_input, apply_timer, bootstrap,
        build_render_model, build_render_model_live, build_solved_layout, compute_steps,
        validate_step,
    };
}
