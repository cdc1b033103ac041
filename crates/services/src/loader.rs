use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{error, info};

use quiz_core::{Question, QuestionError};

use crate::error::LoadError;
use crate::source::{QuestionSource, RawQuestion};

/// Turn a raw trivia item into a `Question` with shuffled options.
///
/// Options are the incorrect answers followed by the correct one, shuffled once.
///
/// # Errors
///
/// Returns `QuestionError` if the item has no usable text.
pub fn normalize<R: Rng + ?Sized>(raw: RawQuestion, rng: &mut R) -> Result<Question, QuestionError> {
    let RawQuestion {
        question,
        correct_answer,
        incorrect_answers,
        category,
        difficulty,
    } = raw;

    let mut options = incorrect_answers;
    options.push(correct_answer.clone());
    options.shuffle(rng);

    Ok(Question::new(question, options, correct_answer)?
        .with_category(category)
        .with_difficulty(difficulty))
}

/// Fetches one batch from a `QuestionSource` and normalizes it.
///
/// The shuffle source is injectable so tests can seed it.
pub struct QuestionLoader {
    source: Arc<dyn QuestionSource>,
    rng: Mutex<Box<dyn RngCore + Send>>,
    batch_size: usize,
}

impl QuestionLoader {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, batch_size: usize) -> Self {
        Self::with_rng(source, batch_size, StdRng::from_os_rng())
    }

    #[must_use]
    pub fn with_rng(
        source: Arc<dyn QuestionSource>,
        batch_size: usize,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        Self {
            source,
            rng: Mutex::new(Box::new(rng)),
            batch_size,
        }
    }

    #[must_use]
    pub fn with_seed(source: Arc<dyn QuestionSource>, batch_size: usize, seed: u64) -> Self {
        Self::with_rng(source, batch_size, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Issue exactly one request and normalize every item.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the request fails or any item is malformed.
    pub async fn load(&self) -> Result<Vec<Question>, LoadError> {
        info!(batch_size = self.batch_size, "loading question batch");
        let raw = match self.source.fetch(self.batch_size).await {
            Ok(raw) => raw,
            Err(err) => {
                error!(error = %err, "question batch request failed");
                return Err(err);
            }
        };

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                normalize(item, rng.as_mut())
                    .map_err(|source| LoadError::Question { index, source })
            })
            .collect::<Result<Vec<_>, _>>();
        drop(rng);

        match &questions {
            Ok(batch) => info!(count = batch.len(), "question batch loaded"),
            Err(err) => error!(error = %err, "question batch was malformed"),
        }
        questions
    }
}

impl fmt::Debug for QuestionLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionLoader")
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}
