//! Per-session context: form, history and the outcome of the last action.
//!
//! Every user interaction is an [`Event`] handled synchronously by
//! [`Session::handle`]. Nothing here is global; each session owns its own
//! history, which is dropped with the session.

use crate::chart::BandChart;
use crate::engine::compute_measurement;
use crate::form::FormState;
use crate::history::HistoryStore;
use crate::{BmiReading, Config, HistoryEntry, Result, UnitSystem};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Placeholder shown instead of an empty history table
pub const EMPTY_HISTORY_MESSAGE: &str = "No calculations yet";

/// Status shown after the history is cleared
pub const HISTORY_CLEARED_MESSAGE: &str = "History cleared!";

/// A user interaction
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    SelectUnits(UnitSystem),
    SetWeight(f64),
    SetHeight(f64),
    Submit,
    Reset,
    ClearHistory,
}

/// Result of handling an event
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    FormUpdated,
    Calculated(BmiReading),
    /// Calculation was refused; holds the inline error text
    Failed(String),
    Reset,
    HistoryCleared,
}

impl Outcome {
    /// Status text for the user, if this outcome has one
    pub fn status(&self) -> Option<String> {
        match self {
            Outcome::Calculated(reading) => Some(reading.to_string()),
            Outcome::Failed(message) => Some(message.clone()),
            Outcome::HistoryCleared => Some(HISTORY_CLEARED_MESSAGE.to_string()),
            Outcome::FormUpdated | Outcome::Reset => None,
        }
    }
}

/// Everything a front end needs to draw the page after an event
#[derive(Clone, Debug, PartialEq)]
pub struct SessionView {
    pub status: Option<String>,
    pub chart: BandChart,
    /// History rows oldest first; empty means show [`EMPTY_HISTORY_MESSAGE`]
    pub history: Vec<HistoryEntry>,
}

impl SessionView {
    /// Placeholder text when there is no history to tabulate
    pub fn history_placeholder(&self) -> Option<&'static str> {
        self.history.is_empty().then_some(EMPTY_HISTORY_MESSAGE)
    }
}

/// One user's interactive session
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    form: FormState,
    history: HistoryStore,
    last_outcome: Option<Outcome>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            form: FormState::new(config.form.default_units, &config.form),
            history: HistoryStore::new(),
            last_outcome: None,
        };
        tracing::info!(session = %session.id, "Session started");
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }

    /// Apply one event
    ///
    /// Out-of-range input is returned as an error and leaves the session
    /// unchanged. A zero height is not an error here: it yields
    /// [`Outcome::Failed`] so the message can be shown inline.
    pub fn handle(&mut self, event: Event) -> Result<Outcome> {
        let span = tracing::info_span!("session", id = %self.id);
        let _guard = span.enter();

        let outcome = match event {
            Event::SelectUnits(units) => {
                self.form.select_units(units);
                tracing::info!("Selected {} units", units);
                Outcome::FormUpdated
            }
            Event::SetWeight(value) => {
                self.form.set_weight(value)?;
                Outcome::FormUpdated
            }
            Event::SetHeight(value) => {
                self.form.set_height(value)?;
                Outcome::FormUpdated
            }
            Event::Submit => self.submit(),
            Event::Reset => {
                self.form.reset();
                tracing::info!("Form reset");
                Outcome::Reset
            }
            Event::ClearHistory => {
                self.history.clear();
                tracing::info!("History cleared");
                Outcome::HistoryCleared
            }
        };

        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    fn submit(&mut self) -> Outcome {
        let measurement = self.form.measurement();
        match compute_measurement(&measurement) {
            Ok(reading) => {
                self.history.append(HistoryEntry::new(reading, Utc::now()));
                tracing::info!(
                    bmi = reading.bmi,
                    category = %reading.category,
                    "Calculated BMI"
                );
                Outcome::Calculated(reading)
            }
            Err(e) => {
                tracing::warn!("Calculation refused: {}", e);
                Outcome::Failed(e.user_message())
            }
        }
    }

    /// Derived view of the current state
    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.last_outcome.as_ref().and_then(Outcome::status),
            chart: BandChart::from_history(&self.history),
            history: self.history.entries().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputRange;
    use crate::{BmiCategory, Error};

    fn create_test_session() -> Session {
        Session::new(&Config::default())
    }

    #[test]
    fn test_new_session_view() {
        let session = create_test_session();
        let view = session.view();
        assert_eq!(view.status, None);
        assert_eq!(view.chart.marker, None);
        assert_eq!(view.history_placeholder(), Some("No calculations yet"));
    }

    #[test]
    fn test_submit_defaults_metric() {
        let mut session = create_test_session();
        let outcome = session.handle(Event::Submit).unwrap();
        assert_eq!(
            outcome,
            Outcome::Calculated(BmiReading {
                bmi: 24.2,
                category: BmiCategory::NormalWeight
            })
        );

        let view = session.view();
        assert_eq!(
            view.status.as_deref(),
            Some("Your BMI: 24.2 | Category: Normal Weight")
        );
        assert_eq!(view.chart.marker, Some(24.2));
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history_placeholder(), None);
    }

    #[test]
    fn test_submit_imperial() {
        let mut session = create_test_session();
        session.handle(Event::SelectUnits(UnitSystem::Imperial)).unwrap();
        let outcome = session.handle(Event::Submit).unwrap();
        match outcome {
            Outcome::Calculated(reading) => {
                assert_eq!(reading.bmi, 24.2);
                assert_eq!(reading.category, BmiCategory::NormalWeight);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_history_accumulates_in_order() {
        let mut session = create_test_session();
        for weight in [50.0, 70.0, 95.0] {
            session.handle(Event::SetWeight(weight)).unwrap();
            session.handle(Event::Submit).unwrap();
        }

        let categories: Vec<_> = session
            .history()
            .entries()
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            categories,
            vec![
                BmiCategory::Underweight,
                BmiCategory::NormalWeight,
                BmiCategory::Obese
            ]
        );
        assert_eq!(session.history().latest().unwrap().bmi, 32.9);
    }

    #[test]
    fn test_reset_keeps_history() {
        let mut session = create_test_session();
        session.handle(Event::SetWeight(90.0)).unwrap();
        session.handle(Event::Submit).unwrap();

        let outcome = session.handle(Event::Reset).unwrap();
        assert_eq!(outcome, Outcome::Reset);
        assert_eq!(session.form().weight(), 70.0);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.view().status, None);
    }

    #[test]
    fn test_clear_history() {
        let mut session = create_test_session();
        session.handle(Event::Submit).unwrap();
        session.handle(Event::Submit).unwrap();

        let outcome = session.handle(Event::ClearHistory).unwrap();
        assert_eq!(outcome, Outcome::HistoryCleared);
        assert!(session.history().latest().is_none());

        let view = session.view();
        assert_eq!(view.status.as_deref(), Some("History cleared!"));
        assert_eq!(view.chart.marker, None);

        // Clearing again is harmless
        session.handle(Event::ClearHistory).unwrap();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_out_of_range_input_is_error() {
        let mut session = create_test_session();
        let result = session.handle(Event::SetWeight(5.0));
        assert!(matches!(result, Err(Error::OutOfRange { .. })));
        assert_eq!(session.form().weight(), 70.0);
        assert!(session.last_outcome().is_none());
    }

    #[test]
    fn test_zero_height_reports_inline_error() {
        let mut config = Config::default();
        config.form.metric.height = InputRange {
            min: 0.0,
            max: 3.0,
            default: 1.7,
            step: 0.01,
        };
        let mut session = Session::new(&config);
        session.handle(Event::SetHeight(0.0)).unwrap();

        let outcome = session.handle(Event::Submit).unwrap();
        assert_eq!(
            outcome,
            Outcome::Failed("Error: Height cannot be zero".into())
        );
        assert!(session.history().is_empty());
        assert_eq!(
            session.view().status.as_deref(),
            Some("Error: Height cannot be zero")
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = create_test_session();
        let b = create_test_session();
        a.handle(Event::Submit).unwrap();
        assert_eq!(a.history().len(), 1);
        assert!(b.history().is_empty());
        assert_ne!(a.id(), b.id());
    }
}
