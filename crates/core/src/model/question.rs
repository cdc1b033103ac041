use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("correct answer {answer:?} is not one of the options")]
    MissingCorrectAnswer { answer: String },
}

/// A single multiple-choice trivia question.
///
/// Options keep the order they were given at construction; the loader shuffles
/// them once and nothing reorders them afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: String,
    category: Option<String>,
    difficulty: Option<String>,
}

impl Question {
    /// Build a question from already-ordered options.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the prompt is blank.
    /// Returns `QuestionError::MissingCorrectAnswer` if `correct_answer` is not in `options`.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if !options.iter().any(|option| *option == correct_answer) {
            return Err(QuestionError::MissingCorrectAnswer {
                answer: correct_answer,
            });
        }

        Ok(Self {
            text,
            options,
            correct_answer,
            category: None,
            difficulty: None,
        })
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Option<String>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    /// Exact text comparison; duplicate option text is indistinguishable.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    #[must_use]
    pub fn has_option(&self, answer: &str) -> bool {
        self.options.iter().any(|option| option == answer)
    }
}
