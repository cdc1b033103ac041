//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::QuestionError;

/// Reasons a question batch could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question source returned response code {code}")]
    Api { code: u32 },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed question {index}: {source}")]
    Question {
        index: usize,
        #[source]
        source: QuestionError,
    },
}
