#![forbid(unsafe_code)]

//! Render-model value types.
//!
//! A [`RenderModel`] is derived, never persisted: it is rebuilt from
//! scratch on every typing-state change and handed to the display layer
//! as a plain value.

use crate::focus::ActiveStepFocus;
use longhand_core::{InputTargetId, StepId};

/// An inclusive run of board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: usize,
    pub end: usize,
}

impl ColumnSpan {
    /// A single-column span.
    #[inline]
    pub const fn single(column: usize) -> Self {
        Self {
            start: column,
            end: column,
        }
    }

    /// The span of a `width`-digit value right-aligned on `end`.
    pub const fn aligned(end: usize, width: usize) -> Self {
        Self {
            start: (end + 1).saturating_sub(width),
            end,
        }
    }

    /// Smallest span covering both.
    pub fn union(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of columns covered.
    #[inline]
    pub const fn width(self) -> usize {
        self.end - self.start + 1
    }
}

/// One displayable cell of the board grid.
///
/// Committed cells hold a single digit; the active entry cell holds the
/// learner's partial draft (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitCell {
    /// The step this cell belongs to.
    pub step: StepId,
    /// The visual input slot, shared between a subtraction and the
    /// bring-down that lands beside it.
    pub target: Option<InputTargetId>,
    /// Leftmost board column of the cell's text.
    pub column: usize,
    /// Digit text; the active cell shows the draft entered so far.
    pub text: String,
    /// Exactly one cell per model carries this flag.
    pub is_active: bool,
    /// The committed step is showing its lock-in pulse.
    pub lock_pulse: bool,
    /// The step is flashing its wrong-digit pulse.
    pub error_pulse: bool,
}

/// What a work row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkRowKind {
    /// An opening bring-down with no subtraction above it.
    BringDown,
    /// A multiply result.
    Product,
    /// A subtraction result with no bring-down following it.
    Difference,
    /// A subtraction result and the bring-down folded in beside it,
    /// combined into one visual row sharing a column-spanning container.
    DifferenceWithBringDown,
}

/// One work row under the dividend.
///
/// Rows are emitted in display order; `round` groups the rows belonging
/// to one quotient digit's arithmetic and is monotonically increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkRow {
    pub round: usize,
    pub kind: WorkRowKind,
    /// Columns the row's container spans (covers the bring-down column
    /// for combined rows, even before that digit commits).
    pub container: ColumnSpan,
    pub cells: Vec<DigitCell>,
    /// Horizontal rule drawn after this row, spanning the union of the
    /// round's product and difference columns.
    pub rule_after: Option<ColumnSpan>,
}

/// Grid-ready description of the whole board at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub divisor_text: String,
    pub dividend_text: String,
    /// One column per dividend digit.
    pub column_count: usize,
    /// The fixed quotient row above the dividend.
    pub quotient_cells: Vec<DigitCell>,
    /// Work rows in display order.
    pub work_rows: Vec<WorkRow>,
    /// "R{n}" after the final work row, only for a non-zero terminal
    /// subtraction with nothing left to bring down.
    pub remainder_label: Option<String>,
    /// The single step currently accepting input, if any.
    pub active_step_id: Option<StepId>,
    /// That step's visual input slot.
    pub active_target_id: Option<InputTargetId>,
    /// Human-readable snapshot of the active step for the helper panel.
    pub active_focus: Option<ActiveStepFocus>,
}

impl RenderModel {
    /// All digit cells, quotient row first then work rows in order.
    pub fn cells(&self) -> impl Iterator<Item = &DigitCell> {
        self.quotient_cells
            .iter()
            .chain(self.work_rows.iter().flat_map(|row| row.cells.iter()))
    }

    /// Whether nothing has been revealed or drafted yet.
    pub fn is_empty(&self) -> bool {
        self.cells().next().is_none()
    }
}
