use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::Question;

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Coarse-grained mode of a quiz attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Finished,
    Reviewing,
}

/// Outcome of moving past the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub was_correct: bool,
    pub finished: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Full mutable state of one quiz attempt.
///
/// Questions are fixed at construction. Every transition takes `&mut self` and
/// either applies completely or returns a `QuizError` without touching state.
/// Timestamps are passed in by the caller so time stays deterministic in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<Question>,
    phase: Phase,
    current_index: usize,
    selected_answer: Option<String>,
    answer_history: Vec<String>,
    correct_count: usize,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create a session in `NotStarted`. An empty batch is allowed but cannot be started.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            phase: Phase::NotStarted,
            current_index: 0,
            selected_answer: None,
            answer_history: Vec::new(),
            correct_count: 0,
            started_at: None,
            ended_at: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    /// True once an option has been picked for the current question.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.selected_answer.is_some()
    }

    /// One entry per answered question, aligned with `questions()`.
    #[must_use]
    pub fn answer_history(&self) -> &[String] {
        &self.answer_history
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.phase == Phase::NotStarted && !self.questions.is_empty()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::InProgress && self.is_answered()
    }

    /// The question being answered, only while `InProgress`.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::InProgress {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Elapsed time as of `now`: running while in progress, frozen once finished.
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        let started_at = self.started_at?;
        match self.phase {
            Phase::NotStarted => None,
            Phase::InProgress => Some(now - started_at),
            Phase::Finished | Phase::Reviewing => self.ended_at.map(|ended| ended - started_at),
        }
    }

    /// Begin answering from the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless the session is `NotStarted`.
    /// Returns `QuizError::NoQuestions` when the batch is empty.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), QuizError> {
        self.expect_phase("start", &[Phase::NotStarted])?;
        if self.questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }

        self.started_at = Some(now);
        self.current_index = 0;
        self.phase = Phase::InProgress;
        Ok(())
    }

    /// Pick an option for the current question by its text.
    ///
    /// Selecting again before advancing replaces both the selection and the
    /// history entry for this question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless `InProgress`.
    /// Returns `QuizError::UnknownOption` if `answer` is not an option of the current question.
    pub fn select_answer(&mut self, answer: &str) -> Result<(), QuizError> {
        self.expect_phase("select an answer", &[Phase::InProgress])?;
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(QuizError::NoQuestions)?;
        if !question.has_option(answer) {
            return Err(QuizError::UnknownOption {
                answer: answer.to_string(),
            });
        }

        self.selected_answer = Some(answer.to_string());
        match self.answer_history.get_mut(self.current_index) {
            Some(slot) => answer.clone_into(slot),
            None => self.answer_history.push(answer.to_string()),
        }
        Ok(())
    }

    /// Pick an option for the current question by position.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::OptionOutOfRange` for an index past the option list,
    /// plus everything `select_answer` returns.
    pub fn select_option(&mut self, index: usize) -> Result<(), QuizError> {
        self.expect_phase("select an answer", &[Phase::InProgress])?;
        let options = self
            .questions
            .get(self.current_index)
            .map(Question::options)
            .ok_or(QuizError::NoQuestions)?;
        let answer = options
            .get(index)
            .cloned()
            .ok_or(QuizError::OptionOutOfRange {
                index,
                len: options.len(),
            })?;
        self.select_answer(&answer)
    }

    /// Score the current selection and move on, finishing after the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless `InProgress`.
    /// Returns `QuizError::NoAnswerSelected` if nothing has been selected.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, QuizError> {
        self.expect_phase("advance", &[Phase::InProgress])?;
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(QuizError::NoQuestions)?;
        let selected = self
            .selected_answer
            .take()
            .ok_or(QuizError::NoAnswerSelected)?;

        let was_correct = question.is_correct(&selected);
        if was_correct {
            self.correct_count += 1;
        }

        let finished = self.is_last_question();
        if finished {
            self.ended_at = Some(now);
            self.phase = Phase::Finished;
        } else {
            self.current_index += 1;
        }

        Ok(AdvanceOutcome {
            was_correct,
            finished,
        })
    }

    /// Switch from the results screen to the read-only review screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless `Finished`.
    pub fn review(&mut self) -> Result<(), QuizError> {
        self.expect_phase("review", &[Phase::Finished])?;
        self.phase = Phase::Reviewing;
        Ok(())
    }

    /// Reset to `NotStarted`, keeping the loaded questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless `Finished` or `Reviewing`.
    pub fn retry(&mut self) -> Result<(), QuizError> {
        self.expect_phase("retry", &[Phase::Finished, Phase::Reviewing])?;
        let questions = std::mem::take(&mut self.questions);
        *self = Self::new(questions);
        Ok(())
    }

    fn expect_phase(&self, action: &'static str, allowed: &[Phase]) -> Result<(), QuizError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
