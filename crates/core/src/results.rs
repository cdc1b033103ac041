use chrono::Duration;

use crate::error::QuizError;
use crate::model::{Phase, QuizSession};
use crate::time::format_elapsed;

/// Minimum number of correct answers needed to pass.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn passing_score(total: usize, passing_ratio: f64) -> usize {
    (total as f64 * passing_ratio).floor() as usize
}

/// Final score of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub correct: usize,
    pub total: usize,
    pub passing_score: usize,
    pub passed: bool,
    pub elapsed: Duration,
}

impl QuizResults {
    /// Derive results from a session in `Finished` or `Reviewing`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotFinished` if the session has not finished or is
    /// missing either timestamp.
    pub fn from_session(session: &QuizSession, passing_ratio: f64) -> Result<Self, QuizError> {
        if !matches!(session.phase(), Phase::Finished | Phase::Reviewing) {
            return Err(QuizError::NotFinished);
        }
        let (Some(started_at), Some(ended_at)) = (session.started_at(), session.ended_at()) else {
            return Err(QuizError::NotFinished);
        };

        let total = session.total();
        let correct = session.correct_count();
        let passing_score = passing_score(total, passing_ratio);

        Ok(Self {
            correct,
            total,
            passing_score,
            passed: correct >= passing_score,
            elapsed: ended_at - started_at,
        })
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed.num_milliseconds()
    }

    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed)
    }
}
