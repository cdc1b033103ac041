use chrono::Duration;
use tracing::{debug, warn};

use quiz_core::{
    AdvanceOutcome, Clock, Phase, Question, QuizError, QuizResults, QuizSession, ReviewRow,
    format_elapsed, review_rows,
};

use crate::error::LoadError;

/// Where the question batch is in its one-shot load.
///
/// `Failed` is terminal: nothing retries automatically and the view keeps
/// showing its loading state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Failed,
    Ready(QuizSession),
}

/// Identifies one load request so late results can be matched or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Owns the single quiz session for one mounted view.
///
/// Transitions use the controller's clock for timestamps. Load results are
/// applied only when they carry the latest ticket and the controller has not
/// been torn down.
#[derive(Debug, Clone)]
pub struct QuizController {
    clock: Clock,
    passing_ratio: f64,
    state: LoadState,
    generation: u64,
    torn_down: bool,
}

impl QuizController {
    #[must_use]
    pub fn new(clock: Clock, passing_ratio: f64) -> Self {
        Self {
            clock,
            passing_ratio,
            state: LoadState::Loading,
            generation: 0,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            LoadState::Ready(session) => Some(session),
            LoadState::Loading | LoadState::Failed => None,
        }
    }

    /// True when a non-empty batch is ready to be played.
    #[must_use]
    pub fn has_questions(&self) -> bool {
        self.session().is_some_and(|session| session.total() > 0)
    }

    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.session().map(QuizSession::phase)
    }

    #[must_use]
    pub fn passing_ratio(&self) -> f64 {
        self.passing_ratio
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Move a fixed clock forward; used by previews and tests.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Mark the start of a load and return its ticket.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a finished load. Returns `false` when the result was discarded.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, LoadError>,
    ) -> bool {
        if self.torn_down {
            debug!("discarding question batch for torn down quiz");
            return false;
        }
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "discarding stale question batch");
            return false;
        }

        self.state = match result {
            Ok(questions) => LoadState::Ready(QuizSession::new(questions)),
            Err(err) => {
                warn!(error = %err, "quiz stays unloaded");
                LoadState::Failed
            }
        };
        true
    }

    /// Stop accepting load results; the view is going away.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }

    /// # Errors
    ///
    /// Returns `QuizError::NoQuestions` when nothing is loaded, otherwise see `QuizSession::start`.
    pub fn start(&mut self) -> Result<(), QuizError> {
        let now = self.clock.now();
        self.session_mut()?.start(now)?;
        debug!("quiz started");
        Ok(())
    }

    /// # Errors
    ///
    /// See `QuizSession::select_answer`.
    pub fn select_answer(&mut self, answer: &str) -> Result<(), QuizError> {
        self.session_mut()?.select_answer(answer)
    }

    /// # Errors
    ///
    /// See `QuizSession::select_option`.
    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        self.session_mut()?.select_option(index)
    }

    /// # Errors
    ///
    /// See `QuizSession::advance`.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        let now = self.clock.now();
        let outcome = self.session_mut()?.advance(now)?;
        debug!(
            was_correct = outcome.was_correct,
            finished = outcome.finished,
            "advanced past question"
        );
        Ok(outcome)
    }

    /// # Errors
    ///
    /// See `QuizSession::review`.
    pub fn review(&mut self) -> Result<(), QuizError> {
        self.session_mut()?.review()
    }

    /// Reset the attempt; the loaded batch is reused, not re-fetched.
    ///
    /// # Errors
    ///
    /// See `QuizSession::retry`.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        self.session_mut()?.retry()?;
        debug!("quiz reset for retry");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` until the last question has been answered.
    pub fn results(&self) -> Result<QuizResults, QuizError> {
        let session = self.session().ok_or(QuizError::NotFinished)?;
        QuizResults::from_session(session, self.passing_ratio)
    }

    #[must_use]
    pub fn review_rows(&self) -> Vec<ReviewRow> {
        self.session().map(review_rows).unwrap_or_default()
    }

    /// Elapsed time formatted as `m:ss`, once the quiz has started.
    #[must_use]
    pub fn elapsed_label(&self) -> Option<String> {
        self.session()?
            .elapsed_at(self.clock.now())
            .map(format_elapsed)
    }

    fn session_mut(&mut self) -> Result<&mut QuizSession, QuizError> {
        match &mut self.state {
            LoadState::Ready(session) => Ok(session),
            LoadState::Loading | LoadState::Failed => Err(QuizError::NoQuestions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    fn paris() -> Question {
        Question::new(
            "Capital of France?",
            ["Paris", "Lyon", "Nice", "Dijon"].map(String::from).to_vec(),
            "Paris",
        )
        .unwrap()
    }

    fn loaded(questions: Vec<Question>) -> QuizController {
        let mut controller = QuizController::new(fixed_clock(), 0.7);
        let ticket = controller.begin_load();
        assert!(controller.apply_load(ticket, Ok(questions)));
        controller
    }

    #[test]
    fn failed_load_leaves_quiz_unstartable() {
        let mut controller = QuizController::new(fixed_clock(), 0.7);
        let ticket = controller.begin_load();

        assert!(controller.apply_load(ticket, Err(LoadError::Api { code: 2 })));
        assert_eq!(controller.state(), &LoadState::Failed);
        assert!(!controller.has_questions());
        assert_eq!(controller.start(), Err(QuizError::NoQuestions));
        assert_eq!(controller.phase(), None);
        assert!(controller.review_rows().is_empty());
    }

    #[test]
    fn empty_batch_is_ready_but_unstartable() {
        let mut controller = loaded(Vec::new());
        assert!(!controller.has_questions());
        assert_eq!(controller.start(), Err(QuizError::NoQuestions));
    }

    #[test]
    fn late_result_after_teardown_is_discarded() {
        let mut controller = QuizController::new(fixed_clock(), 0.7);
        let ticket = controller.begin_load();
        controller.teardown();

        assert!(!controller.apply_load(ticket, Ok(vec![paris()])));
        assert_eq!(controller.state(), &LoadState::Loading);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut controller = QuizController::new(fixed_clock(), 0.7);
        let first = controller.begin_load();
        let second = controller.begin_load();

        assert!(!controller.apply_load(first, Ok(vec![paris()])));
        assert!(controller.apply_load(second, Ok(vec![paris(), paris()])));
        assert_eq!(controller.session().map(QuizSession::total), Some(2));
    }

    #[test]
    fn full_run_reports_time_and_pass() {
        let mut controller = loaded(vec![paris()]);
        assert_eq!(controller.elapsed_label(), None);

        controller.start().unwrap();
        controller.advance_clock(Duration::seconds(65));
        assert_eq!(controller.elapsed_label().as_deref(), Some("1:05"));

        controller.select_answer("Paris").unwrap();
        let outcome = controller.advance().unwrap();
        assert!(outcome.finished);

        controller.advance_clock(Duration::seconds(30));
        assert_eq!(controller.elapsed_label().as_deref(), Some("1:05"));

        let results = controller.results().unwrap();
        assert_eq!(results.correct, 1);
        assert!(results.passed);
        assert_eq!(results.elapsed_label(), "1:05");

        controller.review().unwrap();
        assert_eq!(controller.review_rows().len(), 1);

        controller.retry().unwrap();
        assert_eq!(controller.phase(), Some(Phase::NotStarted));
        assert!(controller.results().is_err());
        assert_eq!(controller.session().map(QuizSession::total), Some(1));
    }
}
