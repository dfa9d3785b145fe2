#![forbid(unsafe_code)]

//! Render-model builders for the long-division board.
//!
//! Turns a step sequence plus a reveal cursor into a grid-ready
//! description of cells, rows, and columns that a display layer can paint
//! without knowing any arithmetic:
//!
//! - [`build_render_model`] / [`build_render_model_live`] - the main
//!   builder, driven by the live typing state's reveal cursor, with a
//!   single resolved active entry cell
//! - [`build_solved_layout`] - the simpler variant over an already
//!   fully-solved problem with an integer shown-up-to cursor
//!
//! Column convention: dividend digit *i* occupies column *i*; a step's
//! multi-digit value is right-aligned so its last digit lands on the
//! step's `digit_position`.
//!
//! # Example
//!
//! ```
//! use longhand_core::{Problem, StepIdGen, compute_steps};
//! use longhand_render::build_render_model;
//!
//! let problem = Problem::new(84, 4).unwrap();
//! let mut ids = StepIdGen::new();
//! let steps = compute_steps(&problem, &mut ids);
//!
//! let model = build_render_model(4, 84, &steps, steps.len());
//! assert_eq!(model.column_count, 2);
//! assert!(model.remainder_label.is_none());
//! ```

pub mod builder;
pub mod focus;
pub mod model;
pub mod solved;

pub use builder::{build_render_model, build_render_model_live};
pub use focus::{ActiveStepFocus, FocusHighlight, FocusTracker};
pub use model::{ColumnSpan, DigitCell, RenderModel, WorkRow, WorkRowKind};
pub use solved::{SolvedLayout, SolvedRow, build_solved_layout};
