use crate::model::{Question, QuizSession};

/// Visual classification of one option on the answering screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionStyle {
    /// Picked but not yet locked in.
    Selected,
    /// Picked and right.
    Correct,
    /// Picked and wrong.
    Incorrect,
    /// Not picked, but the right answer after a wrong pick.
    CorrectUnselected,
    Neutral,
}

impl OptionStyle {
    /// CSS class names for this style.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            OptionStyle::Selected => "selected",
            OptionStyle::Correct => "selected correct",
            OptionStyle::Incorrect => "selected incorrect",
            OptionStyle::CorrectUnselected => "correct-answer",
            OptionStyle::Neutral => "",
        }
    }
}

/// Classify `option` given the current selection.
#[must_use]
pub fn classify_option(
    question: &Question,
    option: &str,
    selected: Option<&str>,
    is_answered: bool,
) -> OptionStyle {
    let Some(selected) = selected else {
        return OptionStyle::Neutral;
    };
    let is_selected = option == selected;
    if !is_answered {
        return if is_selected {
            OptionStyle::Selected
        } else {
            OptionStyle::Neutral
        };
    }

    let picked_correct = question.is_correct(selected);
    match (is_selected, picked_correct) {
        (true, true) => OptionStyle::Correct,
        (true, false) => OptionStyle::Incorrect,
        (false, false) if question.is_correct(option) => OptionStyle::CorrectUnselected,
        _ => OptionStyle::Neutral,
    }
}

/// Styles for every option of `question`, in display order.
#[must_use]
pub fn option_styles(
    question: &Question,
    selected: Option<&str>,
    is_answered: bool,
) -> Vec<OptionStyle> {
    question
        .options()
        .iter()
        .map(|option| classify_option(question, option, selected, is_answered))
        .collect()
}

/// One option on the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOption {
    pub text: String,
    pub is_correct: bool,
    pub is_selected: bool,
}

/// One question on the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub index: usize,
    pub text: String,
    pub options: Vec<ReviewOption>,
    pub selected: Option<String>,
    pub answered_correctly: bool,
}

/// Build review rows for every question.
///
/// A missing history entry is treated as "no selection".
#[must_use]
pub fn review_rows(session: &QuizSession) -> Vec<ReviewRow> {
    session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = session.answer_history().get(index).cloned();
            let options = question
                .options()
                .iter()
                .map(|option| ReviewOption {
                    text: option.clone(),
                    is_correct: question.is_correct(option),
                    is_selected: selected.as_deref() == Some(option.as_str()),
                })
                .collect();
            let answered_correctly = selected
                .as_deref()
                .is_some_and(|answer| question.is_correct(answer));

            ReviewRow {
                index,
                text: question.text().to_string(),
                options,
                selected,
                answered_correctly,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn paris() -> Question {
        Question::new(
            "Capital of France?",
            ["Paris", "Lyon", "Nice"].map(String::from).to_vec(),
            "Paris",
        )
        .unwrap()
    }

    #[test]
    fn nothing_selected_is_neutral() {
        let styles = option_styles(&paris(), None, false);
        assert_eq!(styles, vec![OptionStyle::Neutral; 3]);
    }

    #[test]
    fn wrong_pick_reveals_correct_answer() {
        let styles = option_styles(&paris(), Some("Lyon"), true);
        assert_eq!(
            styles,
            vec![
                OptionStyle::CorrectUnselected,
                OptionStyle::Incorrect,
                OptionStyle::Neutral
            ]
        );
    }

    #[test]
    fn right_pick_leaves_others_neutral() {
        let styles = option_styles(&paris(), Some("Paris"), true);
        assert_eq!(
            styles,
            vec![OptionStyle::Correct, OptionStyle::Neutral, OptionStyle::Neutral]
        );
    }

    #[test]
    fn unanswered_selection_is_plain_selected() {
        assert_eq!(
            classify_option(&paris(), "Nice", Some("Nice"), false),
            OptionStyle::Selected
        );
        assert_eq!(OptionStyle::Selected.css_class(), "selected");
    }

    #[test]
    fn review_rows_mark_correct_and_selected() {
        let mut session = QuizSession::new(vec![paris(), paris()]);
        session.start(fixed_now()).unwrap();
        session.select_answer("Nice").unwrap();
        session.advance(fixed_now()).unwrap();
        session.select_answer("Paris").unwrap();
        session.advance(fixed_now()).unwrap();
        session.review().unwrap();

        let rows = review_rows(&session);
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.selected.as_deref(), Some("Nice"));
        assert!(!first.answered_correctly);
        assert!(first.options[0].is_correct && !first.options[0].is_selected);
        assert!(first.options[2].is_selected && !first.options[2].is_correct);

        assert!(rows[1].answered_correctly);
    }

    #[test]
    fn missing_history_means_no_selection() {
        let session = QuizSession::new(vec![paris()]);
        let rows = review_rows(&session);
        assert_eq!(rows[0].selected, None);
        assert!(rows[0].options.iter().all(|option| !option.is_selected));
        assert!(!rows[0].answered_correctly);
    }
}
