use thiserror::Error;

use crate::model::Phase;

/// Precondition violations raised by the quiz state machine.
///
/// These indicate a caller bug (a control that should have been disabled) and
/// never leave the session in a partially updated state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions loaded")]
    NoQuestions,

    #[error("cannot {action} while {phase:?}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("no answer selected for the current question")]
    NoAnswerSelected,

    #[error("{answer:?} is not an option of the current question")]
    UnknownOption { answer: String },

    #[error("option index {index} out of range (len {len})")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("quiz has not finished")]
    NotFinished,
}
