use std::sync::Arc;

use tracing::info;

use quiz_core::{Clock, Question, QuizConfig};

use crate::error::LoadError;
use crate::loader::QuestionLoader;
use crate::source::{OpenTdbSource, QuestionSource};

use super::controller::QuizController;

/// Wires configuration, clock and question loading for the quiz view.
#[derive(Clone, Debug)]
pub struct QuizLoopService {
    clock: Clock,
    config: QuizConfig,
    loader: Arc<QuestionLoader>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, config: QuizConfig, loader: Arc<QuestionLoader>) -> Self {
        Self {
            clock,
            config,
            loader,
        }
    }

    /// Build a service that loads from `config.source_url()` over HTTP.
    #[must_use]
    pub fn from_config(clock: Clock, config: QuizConfig) -> Self {
        let source: Arc<dyn QuestionSource> = Arc::new(OpenTdbSource::new(config.source_url()));
        Self::with_source(clock, config, source)
    }

    #[must_use]
    pub fn with_source(clock: Clock, config: QuizConfig, source: Arc<dyn QuestionSource>) -> Self {
        let loader = Arc::new(QuestionLoader::new(source, config.batch_size()));
        Self::new(clock, config, loader)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// A fresh controller in its loading state.
    #[must_use]
    pub fn new_controller(&self) -> QuizController {
        QuizController::new(self.clock, self.config.passing_ratio())
    }

    /// Fetch and normalize one batch.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on request failure or malformed data; the loader has
    /// already logged it.
    pub async fn load_questions(&self) -> Result<Vec<Question>, LoadError> {
        self.loader.load().await
    }

    /// Load one batch into `controller`, honoring its ticket on return.
    ///
    /// Returns `false` when the controller discarded the result.
    pub async fn load_into(&self, controller: &mut QuizController) -> bool {
        let ticket = controller.begin_load();
        let result = self.load_questions().await;
        let applied = controller.apply_load(ticket, result);
        if applied {
            info!(has_questions = controller.has_questions(), "quiz ready");
        }
        applied
    }
}
