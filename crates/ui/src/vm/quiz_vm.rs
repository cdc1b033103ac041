use tracing::warn;

use quiz_core::{Phase, Question, QuizError, option_styles};
use services::{LoadError, LoadTicket, QuizController};

use crate::views::ViewError;
use crate::vm::markup::sanitize_text;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Start,
    Select(usize),
    Advance,
    Review,
    Retry,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub text_html: String,
    pub class: &'static str,
    pub checked: bool,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number_label: String,
    pub text_html: String,
    pub meta_label: Option<String>,
    pub options: Vec<OptionVm>,
    pub can_advance: bool,
    pub next_label: &'static str,
    pub elapsed_label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub time_label: String,
    pub score_label: String,
    pub passed: bool,
    pub status_message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewOptionVm {
    pub text_html: String,
    pub class: &'static str,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub index: usize,
    pub text_html: String,
    pub options: Vec<ReviewOptionVm>,
}

/// Everything the quiz view needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreen {
    Loading,
    Ready { total: usize },
    Question(QuestionVm),
    Results(ResultsVm),
    Review(Vec<ReviewRowVm>),
}

pub const PASSED_MESSAGE: &str = "Congratulations, you passed the quiz!";
pub const FAILED_MESSAGE: &str = "Sorry, you failed the quiz.";

pub struct QuizVm {
    controller: QuizController,
}

impl QuizVm {
    #[must_use]
    pub fn new(controller: QuizController) -> Self {
        Self { controller }
    }

    #[must_use]
    pub fn controller(&self) -> &QuizController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut QuizController {
        &mut self.controller
    }

    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.controller.phase()
    }

    /// The elapsed-time ticker should run only while answering.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.phase() == Some(Phase::InProgress)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.controller.begin_load()
    }

    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Question>, LoadError>,
    ) -> bool {
        self.controller.apply_load(ticket, result)
    }

    pub fn teardown(&mut self) {
        self.controller.teardown();
    }

    /// # Errors
    ///
    /// Returns `ViewError::InvalidAction` when the intent is not allowed in the current phase.
    pub fn dispatch(&mut self, intent: QuizIntent) -> Result<(), ViewError> {
        let result = match intent {
            QuizIntent::Start => self.controller.start(),
            QuizIntent::Select(index) => self.controller.select_option(index),
            QuizIntent::Advance => self.controller.advance().map(|_| ()),
            QuizIntent::Review => self.controller.review(),
            QuizIntent::Retry => self.controller.retry(),
        };
        result.map_err(|err: QuizError| {
            warn!(?intent, error = %err, "quiz intent rejected");
            ViewError::InvalidAction
        })
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let Some(session) = self.controller.session() else {
            return QuizScreen::Loading;
        };
        if session.total() == 0 {
            return QuizScreen::Loading;
        }

        match session.phase() {
            Phase::NotStarted => QuizScreen::Ready {
                total: session.total(),
            },
            Phase::InProgress => self
                .question_screen()
                .unwrap_or(QuizScreen::Loading),
            Phase::Finished => self
                .results_screen()
                .unwrap_or(QuizScreen::Loading),
            Phase::Reviewing => QuizScreen::Review(self.review_screen()),
        }
    }

    fn question_screen(&self) -> Option<QuizScreen> {
        let session = self.controller.session()?;
        let question = session.current_question()?;
        let selected = session.selected_answer();
        let is_answered = session.is_answered();

        let options = question
            .options()
            .iter()
            .zip(option_styles(question, selected, is_answered))
            .enumerate()
            .map(|(index, (text, style))| OptionVm {
                index,
                text_html: sanitize_text(text),
                class: style.css_class(),
                checked: selected == Some(text.as_str()),
                disabled: is_answered,
            })
            .collect();

        let meta_label = match (question.category(), question.difficulty()) {
            (Some(category), Some(difficulty)) => Some(format!("{category} · {difficulty}")),
            (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
            (None, None) => None,
        };

        Some(QuizScreen::Question(QuestionVm {
            number_label: format!(
                "Question {} of {}",
                session.current_index() + 1,
                session.total()
            ),
            text_html: sanitize_text(question.text()),
            meta_label,
            options,
            can_advance: session.can_advance(),
            next_label: if session.is_last_question() {
                "Finish Quiz"
            } else {
                "Next Question"
            },
            elapsed_label: self.controller.elapsed_label(),
        }))
    }

    fn results_screen(&self) -> Option<QuizScreen> {
        let results = self.controller.results().ok()?;
        Some(QuizScreen::Results(ResultsVm {
            time_label: results.elapsed_label(),
            score_label: format!("{} / {}", results.correct, results.total),
            passed: results.passed,
            status_message: if results.passed {
                PASSED_MESSAGE
            } else {
                FAILED_MESSAGE
            },
        }))
    }

    fn review_screen(&self) -> Vec<ReviewRowVm> {
        self.controller
            .review_rows()
            .into_iter()
            .map(|row| ReviewRowVm {
                index: row.index,
                text_html: sanitize_text(&row.text),
                options: row
                    .options
                    .iter()
                    .map(|option| ReviewOptionVm {
                        text_html: sanitize_text(&option.text),
                        class: if option.is_correct {
                            "quiz-review-option-correct"
                        } else {
                            "quiz-review-option-incorrect"
                        },
                        checked: option.is_selected,
                    })
                    .collect(),
            })
            .collect()
    }
}
