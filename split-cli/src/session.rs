//! Session state and deferred-calculation reconciliation.
//!
//! Three triggers can request a calculation: a form submission (immediate),
//! loading a history entry, and decoding a shared query string. The latter
//! two set a pending input that replays through the same validation as
//! manual entry, so the displayed form fields are synchronized with the
//! loaded values before anything is computed. The query path fires at most
//! once per session.

use split_core::models::{CalculationInput, CalculationResult, HistoryEntry};
use split_core::share;
use split_core::validate::{RawCalculationInput, ValidationErrors, validate};
use split_core::compute;

/// All mutable per-session state, passed explicitly; no globals.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Current form-field values, as typed or as loaded for replay.
    pub form: RawCalculationInput,

    /// Session-wide round-up flag. Overridden by the stored flag when a
    /// history entry is loaded, and by `roundUp` when a share is decoded.
    pub round_up: bool,

    /// Result of the most recent computation.
    pub result: CalculationResult,

    /// Whether any computation has been performed this session.
    pub calculation_performed: bool,

    pending: Option<RawCalculationInput>,
    query_load_done: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the current form and computes immediately.
    ///
    /// On success the caller receives the validated input alongside the
    /// result so it can decide whether to record the calculation. Field
    /// errors leave the previous result untouched.
    pub fn submit(&mut self) -> Result<(CalculationInput, CalculationResult), ValidationErrors> {
        let input = validate(&self.form)?;
        let result = compute(&input, self.round_up);
        self.result = result.clone();
        self.calculation_performed = true;
        Ok((input, result))
    }

    /// Queues a replay of a stored calculation.
    ///
    /// The form is synchronized with the stored input first, and the entry's
    /// saved rounding flag replaces the session flag.
    pub fn load_history_entry(
        &mut self,
        entry: &HistoryEntry,
    ) {
        let raw = RawCalculationInput::from_input(&entry.input);
        self.form = raw.clone();
        self.round_up = entry.round_up_at_save;
        self.pending = Some(raw);
    }

    /// Queues a replay from a shared query string.
    ///
    /// Fires at most once per session; later calls are ignored, as are
    /// queries carrying no recognized field. Returns whether a replay was
    /// queued.
    pub fn load_from_query(
        &mut self,
        query: &str,
    ) -> bool {
        if self.query_load_done {
            return false;
        }
        let Some(decoded) = share::decode(query) else {
            return false;
        };

        self.form = decoded.raw.clone();
        if let Some(flag) = decoded.round_up {
            self.round_up = flag;
        }
        self.pending = Some(decoded.raw);
        self.query_load_done = true;
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Runs the queued replay, if any.
    ///
    /// The pending input re-enters the same schema validation as manual
    /// entry. Success computes a result; failure resets the whole form to
    /// defaults with rounding off. The pending slot is cleared either way.
    pub fn process_pending(
        &mut self,
    ) -> Option<Result<(CalculationInput, CalculationResult), ValidationErrors>> {
        let pending = self.pending.take()?;

        match validate(&pending) {
            Ok(input) => {
                let result = compute(&input, self.round_up);
                self.result = result.clone();
                self.calculation_performed = true;
                Some(Ok((input, result)))
            }
            Err(errors) => {
                self.reset();
                Some(Err(errors))
            }
        }
    }

    /// Returns the form, rounding flag, and results to their defaults.
    /// The one-shot query guard survives a reset.
    pub fn reset(&mut self) {
        self.form = RawCalculationInput::default();
        self.round_up = false;
        self.result = CalculationResult::default();
        self.calculation_performed = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn filled_session() -> SessionState {
        let mut session = SessionState::new();
        session.form.bill_amount = "100".to_string();
        session.form.tip_percentage = "20".to_string();
        session.form.number_of_people = "4".to_string();
        session
    }

    #[test]
    fn submit_computes_and_marks_performed() {
        let mut session = filled_session();

        let (input, result) = session.submit().unwrap();

        assert_eq!(input.bill_amount, Some(dec!(100)));
        assert_eq!(result.total_per_person, dec!(30.00));
        assert!(session.calculation_performed);
        assert_eq!(session.result, result);
    }

    #[test]
    fn submit_with_invalid_form_keeps_previous_result() {
        let mut session = filled_session();
        session.submit().unwrap();
        let previous = session.result.clone();

        session.form.bill_amount = "not a number".to_string();
        let errors = session.submit().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(session.result, previous);
    }

    #[test]
    fn history_load_queues_a_pending_replay_with_saved_flag() {
        let input = CalculationInput {
            bill_amount: Some(dec!(50)),
            tax_amount: Some(dec!(5)),
            tip_percentage: dec!(15),
            number_of_people: 3,
            ..CalculationInput::default()
        };
        let result = compute(&input, true);
        let entry = HistoryEntry::new(input, &result, true);

        let mut session = SessionState::new();
        session.load_history_entry(&entry);

        assert!(session.has_pending());
        assert!(session.round_up);
        assert_eq!(session.form.bill_amount, "50");

        let (_, replayed) = session.process_pending().unwrap().unwrap();
        assert_eq!(replayed.total_per_person, dec!(21));
        assert!(!session.has_pending());
    }

    #[test]
    fn query_load_fires_only_once_per_session() {
        let mut session = SessionState::new();

        assert!(session.load_from_query("bill=40&people=2"));
        session.process_pending().unwrap().unwrap();

        assert!(!session.load_from_query("bill=999&people=9"));
        assert!(!session.has_pending());
        assert_eq!(session.form.bill_amount, "40");
    }

    #[test]
    fn query_without_recognized_fields_queues_nothing() {
        let mut session = SessionState::new();

        assert!(!session.load_from_query("utm_source=mail"));
        assert!(!session.has_pending());
    }

    #[test]
    fn query_round_up_flag_overrides_session_flag() {
        let mut session = SessionState::new();

        session.load_from_query("bill=10&roundUp=true");

        assert!(session.round_up);
    }

    #[test]
    fn invalid_pending_input_resets_form_and_rounding() {
        let mut session = SessionState::new();
        session.round_up = true;
        session.load_from_query("bill=abc&people=0");

        let errors = session.process_pending().unwrap().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(session.form, RawCalculationInput::default());
        assert!(!session.round_up);
        assert!(!session.calculation_performed);
        assert!(!session.has_pending());
    }

    #[test]
    fn reset_restores_defaults_but_keeps_query_guard() {
        let mut session = filled_session();
        session.round_up = true;
        session.submit().unwrap();
        session.load_from_query("bill=40");
        session.process_pending();

        session.reset();

        assert_eq!(session.form, RawCalculationInput::default());
        assert!(!session.round_up);
        assert_eq!(session.result, CalculationResult::default());
        // The one-shot query decode must not re-fire after a reset.
        assert!(!session.load_from_query("bill=999"));
    }

    #[test]
    fn process_pending_without_pending_is_a_no_op() {
        let mut session = SessionState::new();

        assert!(session.process_pending().is_none());
    }
}
