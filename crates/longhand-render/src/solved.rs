#![forbid(unsafe_code)]

//! The solved-layout variant.
//!
//! Operates over an already fully-solved step sequence with an integer
//! "shown-up-to" cursor instead of live per-digit state: the first
//! `shown_up_to` steps render complete, everything after is absent.
//! Used for worked-example playback and review screens, so there is no
//! active entry, no drafts, and no pulse state - just positioned digit
//! runs.
//!
//! Unlike the main builder, opening bring-downs draw nothing here: on a
//! finished board they are invisible (the digits are already part of the
//! dividend row).

use crate::model::{ColumnSpan, WorkRowKind};
use longhand_core::{Step, StepKind};

/// One positioned digit run under the dividend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedRow {
    pub kind: WorkRowKind,
    /// Board column of the run's first digit.
    pub column: usize,
    /// The digits, left to right.
    pub text: String,
    /// Rule drawn after this row, spanning the round's product and
    /// difference columns.
    pub rule_after: Option<ColumnSpan>,
}

/// Layout-ready description of a (partially) shown solved board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedLayout {
    pub divisor_text: String,
    pub dividend_text: String,
    pub column_count: usize,
    /// Quotient digits by column; unshown columns hold a space.
    pub quotient_text: String,
    pub rows: Vec<SolvedRow>,
    pub remainder_label: Option<String>,
}

impl SolvedLayout {
    /// Plain-text picture of the board, one line per row, for logs and
    /// tests.
    pub fn to_text(&self) -> String {
        let margin = self.divisor_text.len() + 1;
        let mut lines = Vec::new();
        lines.push(format!("{}{}", " ".repeat(margin), self.quotient_text.trim_end()));
        lines.push(format!("{}){}", self.divisor_text, self.dividend_text));
        for row in &self.rows {
            lines.push(format!("{}{}", " ".repeat(margin + row.column), row.text));
            if let Some(rule) = row.rule_after {
                lines.push(format!(
                    "{}{}",
                    " ".repeat(margin + rule.start),
                    "-".repeat(rule.width())
                ));
            }
        }
        if let Some(label) = &self.remainder_label {
            lines.push(format!("{}{}", " ".repeat(margin), label));
        }
        lines.join("\n")
    }
}

/// Build the solved layout showing the first `shown_up_to` steps.
pub fn build_solved_layout(
    divisor: u64,
    dividend: u64,
    steps: &[Step],
    shown_up_to: usize,
) -> SolvedLayout {
    let divisor_text = divisor.to_string();
    let dividend_text = dividend.to_string();
    let column_count = dividend_text.len();
    let shown = shown_up_to.min(steps.len());

    let mut quotient = vec![' '; column_count];
    let mut rows: Vec<SolvedRow> = Vec::new();
    let mut product_span: Option<ColumnSpan> = None;

    for step in &steps[..shown] {
        match step.kind {
            StepKind::QuotientDigit => {
                if let Some(slot) = quotient.get_mut(step.digit_position) {
                    *slot = (b'0' + step.expected_digits()[0]) as char;
                }
            }
            StepKind::MultiplyResult => {
                let span = ColumnSpan::aligned(step.digit_position, step.expected_len());
                product_span = Some(span);
                rows.push(SolvedRow {
                    kind: WorkRowKind::Product,
                    column: span.start,
                    text: step.expected_text(),
                    rule_after: None,
                });
            }
            StepKind::SubtractionResult => {
                let span = ColumnSpan::aligned(step.digit_position, step.expected_len());
                let kind = match steps.get(step.sequence_index + 1) {
                    Some(n) if n.kind == StepKind::BringDown => {
                        WorkRowKind::DifferenceWithBringDown
                    }
                    _ => WorkRowKind::Difference,
                };
                rows.push(SolvedRow {
                    kind,
                    column: span.start,
                    text: step.expected_text(),
                    rule_after: Some(product_span.map_or(span, |p| p.union(span))),
                });
            }
            StepKind::BringDown => {
                // Trailing bring-downs extend the difference run beside
                // them; opening ones draw nothing.
                let follows_subtraction = step.sequence_index > 0
                    && steps[step.sequence_index - 1].kind == StepKind::SubtractionResult;
                if follows_subtraction && let Some(row) = rows.last_mut() {
                    row.text.push((b'0' + step.expected_digits()[0]) as char);
                }
            }
        }
    }

    let remainder_label = match steps.last() {
        Some(last)
            if shown == steps.len()
                && last.kind == StepKind::SubtractionResult
                && last.expected_value != 0 =>
        {
            Some(format!("R{}", last.expected_value))
        }
        _ => None,
    };

    SolvedLayout {
        divisor_text,
        dividend_text,
        column_count,
        quotient_text: quotient.into_iter().collect(),
        rows,
        remainder_label,
    }
}
