#![forbid(unsafe_code)]

//! The main render-model builder.
//!
//! Walks the step sequence once, emitting committed digit cells for every
//! step below the reveal cursor and a single active entry cell for the
//! lowest-sequence revealed-but-uncommitted editable step. Bring-downs
//! that follow their subtraction merge into that subtraction's row
//! (combined-row convention); opening bring-downs get standalone rows so
//! every committed step owns at least one cell.
//!
//! The builder never fails: an empty step list or a divisor/dividend pair
//! that violates the problem invariants degrades to a model with no
//! cells, which the display layer paints as an empty board.

use crate::focus::{ActiveStepFocus, FocusHighlight};
use crate::model::{ColumnSpan, DigitCell, RenderModel, WorkRow, WorkRowKind};
use longhand_core::{Problem, Step, StepKind, working_values};
use longhand_engine::TypingState;

/// Build the render model from a plain reveal cursor.
///
/// The active entry cell's text is empty; use
/// [`build_render_model_live`] to thread the learner's partial drafts
/// and pulse flags in.
pub fn build_render_model(
    divisor: u64,
    dividend: u64,
    steps: &[Step],
    revealed_step_count: usize,
) -> RenderModel {
    build(divisor, dividend, steps, revealed_step_count, None)
}

/// Build the render model from the live typing state: same grid, plus
/// draft text in the active cell and lock/error pulse flags on cells.
pub fn build_render_model_live(
    divisor: u64,
    dividend: u64,
    steps: &[Step],
    state: &TypingState,
) -> RenderModel {
    build(divisor, dividend, steps, state.revealed_step_count(), Some(state))
}

fn build(
    divisor: u64,
    dividend: u64,
    steps: &[Step],
    revealed: usize,
    live: Option<&TypingState>,
) -> RenderModel {
    let divisor_text = divisor.to_string();
    let dividend_text = dividend.to_string();
    let mut model = RenderModel {
        column_count: dividend_text.len(),
        divisor_text,
        dividend_text,
        quotient_cells: Vec::new(),
        work_rows: Vec::new(),
        remainder_label: None,
        active_step_id: None,
        active_target_id: None,
        active_focus: None,
    };
    if steps.is_empty() {
        return model;
    }
    let revealed = revealed.min(steps.len());

    // Active-entry resolution: the lowest-sequence uncommitted editable
    // step, skipping over an auto-advancing bring-down at the cursor.
    // Two steps may share an input target id; identity is by StepId.
    let active = steps[revealed..].iter().find(|s| s.kind.is_editable());
    model.active_step_id = active.map(|s| s.id);
    model.active_target_id = active.and_then(|s| s.input_target_id);

    if let (Some(active), Ok(problem)) = (active, Problem::new(dividend, divisor)) {
        let working = working_values(&problem, steps);
        model.active_focus = Some(ActiveStepFocus {
            step: active.id,
            kind: active.kind,
            working_text: working[active.sequence_index].to_string(),
            divisor_text: model.divisor_text.clone(),
            highlight: FocusHighlight::for_kind(active.kind),
        });
    }

    let mut round = 0usize;
    let mut seen_quotient = false;
    let mut product_span: Option<ColumnSpan> = None;

    for step in steps {
        let committed = step.sequence_index < revealed;
        let is_active = model.active_step_id == Some(step.id);
        if !committed && !is_active {
            continue;
        }

        match step.kind {
            StepKind::QuotientDigit => {
                if seen_quotient {
                    round += 1;
                } else {
                    seen_quotient = true;
                }
                let text = if committed {
                    step.expected_text()
                } else {
                    draft_text(live, step)
                };
                model
                    .quotient_cells
                    .push(make_cell(step, live, step.digit_position, text, is_active));
            }
            StepKind::MultiplyResult => {
                let span = ColumnSpan::aligned(step.digit_position, step.expected_len());
                product_span = Some(span);
                model.work_rows.push(WorkRow {
                    round,
                    kind: WorkRowKind::Product,
                    container: span,
                    cells: value_cells(step, live, span, committed, is_active),
                    rule_after: None,
                });
            }
            StepKind::SubtractionResult => {
                let span = ColumnSpan::aligned(step.digit_position, step.expected_len());
                let bring_down = steps
                    .get(step.sequence_index + 1)
                    .filter(|n| n.kind == StepKind::BringDown);
                let (kind, container) = match bring_down {
                    Some(n) => (
                        WorkRowKind::DifferenceWithBringDown,
                        span.union(ColumnSpan::single(n.digit_position)),
                    ),
                    None => (WorkRowKind::Difference, span),
                };
                model.work_rows.push(WorkRow {
                    round,
                    kind,
                    container,
                    cells: value_cells(step, live, span, committed, is_active),
                    rule_after: Some(product_span.map_or(span, |p| p.union(span))),
                });
            }
            StepKind::BringDown => {
                // Only reachable when committed: bring-downs are never
                // the active entry.
                let follows_subtraction = step.sequence_index > 0
                    && steps[step.sequence_index - 1].kind == StepKind::SubtractionResult;
                let cell = make_cell(
                    step,
                    live,
                    step.digit_position,
                    step.expected_text(),
                    false,
                );
                if follows_subtraction {
                    if let Some(row) = model.work_rows.last_mut() {
                        row.cells.push(cell);
                    }
                } else {
                    model.work_rows.push(WorkRow {
                        round,
                        kind: WorkRowKind::BringDown,
                        container: ColumnSpan::single(step.digit_position),
                        cells: vec![cell],
                        rule_after: None,
                    });
                }
            }
        }
    }

    let last = steps.last().filter(|s| s.kind == StepKind::SubtractionResult);
    if revealed == steps.len()
        && let Some(last) = last
        && last.expected_value != 0
    {
        model.remainder_label = Some(format!("R{}", last.expected_value));
    }

    model
}

fn draft_text(live: Option<&TypingState>, step: &Step) -> String {
    live.and_then(|s| s.draft(step.id)).unwrap_or("").to_owned()
}

fn make_cell(
    step: &Step,
    live: Option<&TypingState>,
    column: usize,
    text: String,
    is_active: bool,
) -> DigitCell {
    DigitCell {
        step: step.id,
        target: step.input_target_id,
        column,
        text,
        is_active,
        lock_pulse: live.is_some_and(|s| s.is_lock_pulsed(step.id)),
        error_pulse: live.is_some_and(|s| s.is_error_pulsed(step.id)),
    }
}

/// Cells for a multi-digit value row: one digit cell per column when
/// committed, or a single entry cell holding the draft when active.
fn value_cells(
    step: &Step,
    live: Option<&TypingState>,
    span: ColumnSpan,
    committed: bool,
    is_active: bool,
) -> Vec<DigitCell> {
    if committed {
        step.expected_digits()
            .iter()
            .enumerate()
            .map(|(i, d)| make_cell(step, live, span.start + i, d.to_string(), false))
            .collect()
    } else {
        vec![make_cell(
            step,
            live,
            span.start,
            draft_text(live, step),
            is_active,
        )]
    }
}
