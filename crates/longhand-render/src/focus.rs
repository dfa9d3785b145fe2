#![forbid(unsafe_code)]

//! The active-step focus snapshot and its change tracker.
//!
//! [`ActiveStepFocus`] is the helper panel's view of the step the learner
//! is working on: the working value being divided, the divisor, and
//! which board regions to highlight. It is recomputed on every model
//! build; [`FocusTracker`] collapses rebuilds that did not change the
//! focus so downstream listeners are only notified when the identity or
//! displayed values actually differ.

use longhand_core::{StepId, StepKind};

bitflags::bitflags! {
    /// Board regions the helper panel highlights for the active step.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FocusHighlight: u8 {
        /// The dividend segment currently being divided.
        const WORKING_VALUE = 1 << 0;
        /// The divisor to the left of the bracket.
        const DIVISOR = 1 << 1;
        /// The quotient digit written this round.
        const QUOTIENT_ROW = 1 << 2;
        /// The product row being subtracted from.
        const PRODUCT_ROW = 1 << 3;
        /// The dividend digit about to slide down.
        const NEXT_DIVIDEND_DIGIT = 1 << 4;
    }
}

impl FocusHighlight {
    /// Which regions matter for a step of `kind`.
    pub fn for_kind(kind: StepKind) -> Self {
        match kind {
            StepKind::QuotientDigit => Self::WORKING_VALUE | Self::DIVISOR,
            StepKind::MultiplyResult => Self::QUOTIENT_ROW | Self::DIVISOR,
            StepKind::SubtractionResult => Self::WORKING_VALUE | Self::PRODUCT_ROW,
            StepKind::BringDown => Self::NEXT_DIVIDEND_DIGIT,
        }
    }
}

/// Human-readable snapshot of the active step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStepFocus {
    pub step: StepId,
    pub kind: StepKind,
    /// The working value the step operates on, as display text.
    pub working_text: String,
    pub divisor_text: String,
    pub highlight: FocusHighlight,
}

/// Collapses repeated identical focus snapshots.
///
/// `observe` returns the new focus only when it differs from the last
/// one seen (by identity or displayed values), so callers can forward
/// its `Some` results directly as notifications.
#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    last: Option<ActiveStepFocus>,
}

impl FocusTracker {
    /// A tracker that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `focus`; `Some` exactly when it changed.
    pub fn observe(&mut self, focus: Option<&ActiveStepFocus>) -> Option<ActiveStepFocus> {
        if self.last.as_ref() == focus {
            return None;
        }
        self.last = focus.cloned();
        self.last.clone()
    }

    /// The most recent focus observed.
    pub fn current(&self) -> Option<&ActiveStepFocus> {
        self.last.as_ref()
    }
}
