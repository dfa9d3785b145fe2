#![forbid(unsafe_code)]

//! Pure transition functions: keystrokes, pastes, backspace, timers.
//!
//! All functions take the current [`TypingState`] by reference and return
//! a [`Transition`] holding a fresh snapshot plus any deferred
//! [`Effect`]s. Gating rules:
//!
//! - only the step at the reveal cursor accepts input;
//! - bring-down steps are never directly editable;
//! - a retry-locked step refuses input until its timer elapses;
//! - commitment is permanent and the reveal cursor never decreases.

use crate::effect::{
    BRING_DOWN_SLIDE, ERROR_PULSE, Effect, LOCK_PULSE, RETRY_LOCK, TimerKey, TimerKind,
};
use crate::state::TypingState;
use longhand_core::{Outcome, Step, StepId, StepKind, Validation, hint_for, validate_step};
use tracing::{debug, trace};

/// Result of one transition.
#[derive(Debug, Clone)]
#[must_use]
pub struct Transition {
    /// The next snapshot.
    pub state: TypingState,
    /// Validator outcome, present when a commit or a rejected attempt
    /// occurred (never for partial correct digits or ignored input).
    pub validation: Option<Validation>,
    /// The step that just committed and is showing its lock-in pulse.
    pub locked_step_id: Option<StepId>,
    /// Whether the reveal cursor advanced.
    pub did_advance: bool,
    /// Whether this transition committed the final step.
    pub did_complete: bool,
    /// Deferred commands for the host to execute.
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &TypingState) -> Self {
        Self {
            state: state.clone(),
            validation: None,
            locked_step_id: None,
            did_advance: false,
            did_complete: false,
            effects: Vec::new(),
        }
    }
}

/// Effects needed to start driving `state`, before any input arrives.
///
/// When the sequence opens with bring-down steps (leading dividend digits
/// smaller than the divisor) there is no preceding subtraction commit to
/// schedule the first slide, so the host requests it here.
pub fn bootstrap(steps: &[Step], state: &TypingState) -> Vec<Effect> {
    match state.current_step(steps) {
        Some(step) if step.kind == StepKind::BringDown => {
            vec![Effect::schedule(
                TimerKey::new(state.problem(), step.id),
                TimerKind::BringDownSlide,
                BRING_DOWN_SLIDE,
            )]
        }
        _ => Vec::new(),
    }
}

/// Apply a keystroke (single digit) or paste (digit run) to a step.
///
/// Non-digit or empty input is rejected at this boundary and never
/// reaches the validator. Input addressed to anything other than the
/// single active step is ignored. For a paste, only the longest prefix
/// exactly matching the expected digits from the current cursor commits;
/// zero matched digits counts as an incorrect attempt.
pub fn apply_input(steps: &[Step], state: &TypingState, step_id: StepId, raw: &str) -> Transition {
    let Some(step) = steps.iter().find(|s| s.id == step_id) else {
        return Transition::unchanged(state);
    };
    if step.sequence_index != state.revealed_step_count() || !step.kind.is_editable() {
        trace!(step = step_id.raw(), "input ignored: step not active");
        return Transition::unchanged(state);
    }
    if state.is_retry_locked(step_id) {
        trace!(step = step_id.raw(), "input ignored: retry locked");
        return Transition::unchanged(state);
    }
    // Input boundary: digits only, never empty.
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        trace!(step = step_id.raw(), "input rejected: malformed");
        return Transition::unchanged(state);
    }

    let expected = step.expected_digits();
    let cursor = state.cursor(step_id);
    let matched = raw
        .bytes()
        .enumerate()
        .take_while(|&(i, b)| {
            cursor + i < expected.len() && b - b'0' == expected[cursor + i]
        })
        .count();

    if matched == 0 {
        return reject_attempt(state, step);
    }

    let mut next = state.clone();
    next.drafts_mut()
        .entry(step_id)
        .or_default()
        .push_str(&raw[..matched]);

    if next.cursor(step_id) == expected.len() {
        commit_step(steps, next, step)
    } else {
        trace!(
            step = step_id.raw(),
            cursor = next.cursor(step_id),
            "digit accepted"
        );
        Transition {
            state: next,
            validation: None,
            locked_step_id: None,
            did_advance: false,
            did_complete: false,
            effects: Vec::new(),
        }
    }
}

/// Remove the last drafted digit of the active step, if any.
pub fn apply_backspace(steps: &[Step], state: &TypingState, step_id: StepId) -> Transition {
    let Some(step) = steps.iter().find(|s| s.id == step_id) else {
        return Transition::unchanged(state);
    };
    if step.sequence_index != state.revealed_step_count()
        || !step.kind.is_editable()
        || state.is_retry_locked(step_id)
        || state.cursor(step_id) == 0
    {
        return Transition::unchanged(state);
    }
    let mut next = state.clone();
    if let Some(draft) = next.drafts_mut().get_mut(&step_id) {
        draft.pop();
        if draft.is_empty() {
            next.drafts_mut().remove(&step_id);
        }
    }
    Transition {
        state: next,
        validation: None,
        locked_step_id: None,
        did_advance: false,
        did_complete: false,
        effects: Vec::new(),
    }
}

/// Feed an elapsed timer back into the machine.
///
/// A key whose problem identity does not match the live snapshot is from
/// a discarded problem and is ignored outright - it can never commit a
/// step in the new problem.
pub fn apply_timer(
    steps: &[Step],
    state: &TypingState,
    key: TimerKey,
    kind: TimerKind,
) -> Transition {
    if key.problem != state.problem() {
        debug!(
            timer_problem = key.problem.raw(),
            live_problem = state.problem().raw(),
            "stale timer ignored"
        );
        return Transition::unchanged(state);
    }
    match kind {
        TimerKind::LockPulse => {
            let mut next = state.clone();
            next.lock_pulsed_mut().remove(&key.step);
            Transition {
                state: next,
                ..Transition::unchanged(state)
            }
        }
        TimerKind::ErrorPulse => {
            let mut next = state.clone();
            next.error_pulsed_mut().remove(&key.step);
            Transition {
                state: next,
                ..Transition::unchanged(state)
            }
        }
        TimerKind::RetryUnlock => {
            let mut next = state.clone();
            next.retry_locked_mut().remove(&key.step);
            trace!(step = key.step.raw(), "retry lock released");
            Transition {
                state: next,
                ..Transition::unchanged(state)
            }
        }
        TimerKind::BringDownSlide => {
            let Some(step) = steps.iter().find(|s| s.id == key.step) else {
                return Transition::unchanged(state);
            };
            if step.kind != StepKind::BringDown
                || step.sequence_index != state.revealed_step_count()
            {
                return Transition::unchanged(state);
            }
            commit_step(steps, state.clone(), step)
        }
    }
}

/// Wrong digit or fully-unmatched paste: discard the input, lock the
/// step for retry, flash the error pulse, report the validator hint.
fn reject_attempt(state: &TypingState, step: &Step) -> Transition {
    debug!(step = step.id.raw(), kind = ?step.kind, "incorrect attempt");
    let mut next = state.clone();
    next.retry_locked_mut().insert(step.id);
    next.error_pulsed_mut().insert(step.id);
    let key = TimerKey::new(state.problem(), step.id);
    Transition {
        state: next,
        validation: Some(Validation {
            outcome: Outcome::Incorrect,
            hint: Some(hint_for(step.kind).to_owned()),
        }),
        locked_step_id: None,
        did_advance: false,
        did_complete: false,
        effects: vec![
            Effect::schedule(key, TimerKind::ErrorPulse, ERROR_PULSE),
            Effect::schedule(key, TimerKind::RetryUnlock, RETRY_LOCK),
        ],
    }
}

/// Commit a fully-entered (or auto-advancing bring-down) step: record the
/// full value, pulse the lock, advance the reveal cursor, and schedule
/// the next bring-down slide if one follows.
fn commit_step(steps: &[Step], mut next: TypingState, step: &Step) -> Transition {
    let text = step.expected_text();
    next.drafts_mut().insert(step.id, text.clone());
    next.lock_pulsed_mut().insert(step.id);
    next.advance();
    debug!(
        step = step.id.raw(),
        kind = ?step.kind,
        revealed = next.revealed_step_count(),
        "step committed"
    );

    let key = TimerKey::new(next.problem(), step.id);
    let mut effects = vec![Effect::schedule(key, TimerKind::LockPulse, LOCK_PULSE)];
    if let Some(follow) = next.current_step(steps)
        && follow.kind == StepKind::BringDown
    {
        effects.push(Effect::schedule(
            TimerKey::new(next.problem(), follow.id),
            TimerKind::BringDownSlide,
            BRING_DOWN_SLIDE,
        ));
    }

    let did_complete = next.is_complete();
    Transition {
        validation: Some(validate_step(step, &text)),
        locked_step_id: Some(step.id),
        did_advance: true,
        did_complete,
        effects,
        state: next,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use longhand_core::{Problem, ProblemId, StepIdGen, compute_steps};

    fn setup(dividend: u64, divisor: u64) -> (Vec<Step>, TypingState) {
        let problem = Problem::new(dividend, divisor).unwrap();
        let mut ids = StepIdGen::new();
        let steps = compute_steps(&problem, &mut ids);
        let state = TypingState::new(ProblemId::new(1), steps.len());
        (steps, state)
    }

    #[test]
    fn correct_single_digit_commits() {
        let (steps, state) = setup(84, 4);
        let t = apply_input(&steps, &state, steps[0].id, "2");
        assert!(t.did_advance);
        assert_eq!(t.locked_step_id, Some(steps[0].id));
        assert!(t.validation.unwrap().is_correct());
        assert_eq!(t.state.revealed_step_count(), 1);
        assert!(t.state.is_lock_pulsed(steps[0].id));
    }

    #[test]
    fn wrong_digit_is_discarded_and_retry_locks() {
        let (steps, state) = setup(84, 4);
        let t = apply_input(&steps, &state, steps[0].id, "9");
        assert!(!t.did_advance);
        assert_eq!(t.state.revealed_step_count(), 0);
        assert_eq!(t.state.cursor(steps[0].id), 0);
        assert!(t.state.is_retry_locked(steps[0].id));
        assert!(t.state.is_error_pulsed(steps[0].id));
        let v = t.validation.unwrap();
        assert_eq!(v.outcome, Outcome::Incorrect);
        assert!(!v.hint.unwrap().is_empty());
        assert_eq!(t.effects.len(), 2);
    }

    #[test]
    fn retry_locked_step_refuses_even_correct_input() {
        let (steps, state) = setup(84, 4);
        let locked = apply_input(&steps, &state, steps[0].id, "9").state;
        let t = apply_input(&steps, &locked, steps[0].id, "2");
        assert!(!t.did_advance);
        assert!(t.validation.is_none());
        assert_eq!(t.state, locked);
    }

    #[test]
    fn retry_unlock_timer_restores_input() {
        let (steps, state) = setup(84, 4);
        let locked = apply_input(&steps, &state, steps[0].id, "9").state;
        let key = TimerKey::new(locked.problem(), steps[0].id);
        let unlocked = apply_timer(&steps, &locked, key, TimerKind::RetryUnlock).state;
        assert!(!unlocked.is_retry_locked(steps[0].id));
        let t = apply_input(&steps, &unlocked, steps[0].id, "2");
        assert!(t.did_advance);
    }

    #[test]
    fn multi_digit_entry_is_digit_indexed() {
        // 96 / 8: quotient 1, multiply 8, subtract 1, bring 6,
        // quotient 2, multiply 16 (two digits).
        let (steps, state) = setup(96, 8);
        let multiply = steps
            .iter()
            .find(|s| s.kind == StepKind::MultiplyResult && s.expected_value == 16)
            .unwrap();
        let state = TypingState::new(state.problem(), steps.len())
            .with_revealed(multiply.sequence_index);
        let t = apply_input(&steps, &state, multiply.id, "1");
        assert!(!t.did_advance);
        assert!(t.validation.is_none());
        assert_eq!(t.state.cursor(multiply.id), 1);
        let t = apply_input(&steps, &t.state, multiply.id, "6");
        assert!(t.did_advance);
        assert!(t.validation.unwrap().is_correct());
    }

    #[test]
    fn wrong_second_digit_keeps_first() {
        let (steps, state) = setup(96, 8);
        let multiply = steps
            .iter()
            .find(|s| s.kind == StepKind::MultiplyResult && s.expected_value == 16)
            .unwrap();
        let state = TypingState::new(state.problem(), steps.len())
            .with_revealed(multiply.sequence_index);
        let partial = apply_input(&steps, &state, multiply.id, "1").state;
        let t = apply_input(&steps, &partial, multiply.id, "9");
        assert_eq!(t.state.cursor(multiply.id), 1);
        assert!(t.state.is_retry_locked(multiply.id));
    }

    #[test]
    fn backspace_removes_last_digit() {
        let (steps, state) = setup(96, 8);
        let multiply = steps
            .iter()
            .find(|s| s.kind == StepKind::MultiplyResult && s.expected_value == 16)
            .unwrap();
        let state = TypingState::new(state.problem(), steps.len())
            .with_revealed(multiply.sequence_index);
        let partial = apply_input(&steps, &state, multiply.id, "1").state;
        let t = apply_backspace(&steps, &partial, multiply.id);
        assert_eq!(t.state.cursor(multiply.id), 0);
        // Backspace on an empty draft is a no-op.
        let t = apply_backspace(&steps, &t.state, multiply.id);
        assert_eq!(t.state.cursor(multiply.id), 0);
    }

    #[test]
    fn paste_commits_longest_matching_prefix() {
        let (steps, state) = setup(96, 8);
        let multiply = steps
            .iter()
            .find(|s| s.kind == StepKind::MultiplyResult && s.expected_value == 16)
            .unwrap();
        let state = TypingState::new(state.problem(), steps.len())
            .with_revealed(multiply.sequence_index);
        // "169": "16" matches and commits; the trailing "9" is dropped.
        let t = apply_input(&steps, &state, multiply.id, "169");
        assert!(t.did_advance);
        assert_eq!(t.state.draft(multiply.id), Some("16"));
    }

    #[test]
    fn paste_with_no_matching_prefix_is_an_incorrect_attempt() {
        let (steps, state) = setup(84, 4);
        let t = apply_input(&steps, &state, steps[0].id, "91");
        assert!(!t.did_advance);
        assert!(t.state.is_retry_locked(steps[0].id));
        assert_eq!(t.validation.unwrap().outcome, Outcome::Incorrect);
    }

    #[test]
    fn malformed_input_never_reaches_the_validator() {
        let (steps, state) = setup(84, 4);
        for raw in ["", "a", "2a", " 2", "²"] {
            let t = apply_input(&steps, &state, steps[0].id, raw);
            assert!(t.validation.is_none(), "raw {raw:?} leaked through");
            assert!(!t.did_advance);
            assert!(!t.state.is_retry_locked(steps[0].id));
        }
    }

    #[test]
    fn input_to_inactive_step_is_ignored() {
        let (steps, state) = setup(84, 4);
        // steps[1] (multiply) is not yet revealed.
        let t = apply_input(&steps, &state, steps[1].id, "8");
        assert!(!t.did_advance);
        assert!(t.validation.is_none());
    }

    #[test]
    fn bring_down_is_never_directly_editable() {
        let (steps, state) = setup(15, 5);
        assert_eq!(steps[0].kind, StepKind::BringDown);
        let t = apply_input(&steps, &state, steps[0].id, "5");
        assert!(!t.did_advance);
        assert!(t.validation.is_none());
    }

    #[test]
    fn subtraction_commit_schedules_bring_down_slide() {
        let (steps, state) = setup(84, 4);
        let state = state.with_revealed(2); // subtraction is active
        let t = apply_input(&steps, &state, steps[2].id, "0");
        assert!(t.did_advance);
        let slide = t
            .effects
            .iter()
            .find(|e| matches!(e, Effect::Schedule { kind: TimerKind::BringDownSlide, .. }));
        match slide {
            Some(Effect::Schedule { key, .. }) => assert_eq!(key.step, steps[3].id),
            _ => panic!("no bring-down slide scheduled"),
        }
    }

    #[test]
    fn bring_down_slide_auto_commits() {
        let (steps, state) = setup(84, 4);
        let state = state.with_revealed(3); // bring-down is current
        let key = TimerKey::new(state.problem(), steps[3].id);
        let t = apply_timer(&steps, &state, key, TimerKind::BringDownSlide);
        assert!(t.did_advance);
        assert_eq!(t.state.revealed_step_count(), 4);
        assert_eq!(t.state.draft(steps[3].id), Some("4"));
        assert!(t.validation.unwrap().is_correct());
    }

    #[test]
    fn opening_bring_down_needs_bootstrap() {
        let (steps, state) = setup(15, 5);
        let effects = bootstrap(&steps, &state);
        assert_eq!(effects.len(), 1);
        match effects[0] {
            Effect::Schedule { key, kind, .. } => {
                assert_eq!(key.step, steps[0].id);
                assert_eq!(kind, TimerKind::BringDownSlide);
            }
            _ => panic!("expected a schedule effect"),
        }
        // No bootstrap needed when the first step is editable.
        let (steps, state) = setup(84, 4);
        assert!(bootstrap(&steps, &state).is_empty());
    }

    #[test]
    fn chained_bring_downs_schedule_each_other() {
        // 1005 / 50 opens with two consecutive bring-downs.
        let (steps, state) = setup(1005, 50);
        let first = TimerKey::new(state.problem(), steps[0].id);
        let t = apply_timer(&steps, &state, first, TimerKind::BringDownSlide);
        assert!(t.did_advance);
        let next_slide = t.effects.iter().any(|e| {
            matches!(
                e,
                Effect::Schedule { key, kind: TimerKind::BringDownSlide, .. }
                    if key.step == steps[1].id
            )
        });
        assert!(next_slide, "second slide not scheduled");
    }

    #[test]
    fn final_commit_reports_completion() {
        let (steps, state) = setup(84, 4);
        let last = steps.last().unwrap();
        let state = state.with_revealed(steps.len() - 1);
        let t = apply_input(&steps, &state, last.id, "0");
        assert!(t.did_complete);
        assert!(t.state.is_complete());
    }

    #[test]
    fn stale_timer_from_discarded_problem_never_commits() {
        let (steps, _) = setup(84, 4);
        // New problem, fresh state; a timer keyed to the old problem fires.
        let fresh = TypingState::new(ProblemId::new(2), steps.len()).with_revealed(3);
        let stale = TimerKey::new(ProblemId::new(1), steps[3].id);
        let t = apply_timer(&steps, &fresh, stale, TimerKind::BringDownSlide);
        assert!(!t.did_advance);
        assert_eq!(t.state.revealed_step_count(), 3);
    }

    #[test]
    fn transitions_never_mutate_the_input_snapshot() {
        let (steps, state) = setup(84, 4);
        let before = state.clone();
        let _ = apply_input(&steps, &state, steps[0].id, "2");
        let _ = apply_input(&steps, &state, steps[0].id, "9");
        assert_eq!(state, before);
    }

    #[test]
    fn lock_and_error_pulse_timers_clear_flags() {
        let (steps, state) = setup(84, 4);
        let t = apply_input(&steps, &state, steps[0].id, "2");
        let key = TimerKey::new(state.problem(), steps[0].id);
        let cleared = apply_timer(&steps, &t.state, key, TimerKind::LockPulse).state;
        assert!(!cleared.is_lock_pulsed(steps[0].id));

        let t = apply_input(&steps, &state, steps[0].id, "9");
        let cleared = apply_timer(&steps, &t.state, key, TimerKind::ErrorPulse).state;
        assert!(!cleared.is_error_pulsed(steps[0].id));
        // The retry lock outlives the error pulse.
        assert!(cleared.is_retry_locked(steps[0].id));
    }
}
