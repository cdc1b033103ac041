use std::sync::Arc;

use super::test_harness::{
    FailingSource, StaticSource, raw_question, render_screen, setup_view_harness,
};
use crate::vm::{
    OptionVm, PASSED_MESSAGE, QuestionVm, QuizScreen, ResultsVm, ReviewOptionVm, ReviewRowVm,
};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_offers_start_after_load() {
    let source = Arc::new(StaticSource((0..5).map(raw_question).collect()));
    let mut harness = setup_view_harness(source);
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("5 questions are ready."), "missing intro in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_stays_loading_when_fetch_fails() {
    let mut harness = setup_view_harness(Arc::new(FailingSource));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading state in {html}");
    assert!(!html.contains("Start Quiz"), "unexpected start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_stays_loading_for_empty_batch() {
    let mut harness = setup_view_harness(Arc::new(StaticSource(Vec::new())));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading state in {html}");
}

#[test]
fn question_screen_renders_options_and_progress() {
    let html = render_screen(QuizScreen::Question(QuestionVm {
        number_label: "Question 2 of 5".into(),
        text_html: "Capital of France?".into(),
        meta_label: Some("Geography".into()),
        options: vec![
            OptionVm {
                index: 0,
                text_html: "Paris".into(),
                class: "selected correct",
                checked: true,
                disabled: true,
            },
            OptionVm {
                index: 1,
                text_html: "Lyon".into(),
                class: "",
                checked: false,
                disabled: true,
            },
        ],
        can_advance: true,
        next_label: "Next Question",
        elapsed_label: Some("0:42".into()),
    }));

    assert!(html.contains("Question 2 of 5"), "missing progress in {html}");
    assert!(html.contains("Time Elapsed: 0:42"), "missing elapsed in {html}");
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(html.contains("selected correct"), "missing option class in {html}");
    assert!(html.contains("Lyon"), "missing option in {html}");
    assert!(html.contains("Next Question"), "missing next button in {html}");
}

#[test]
fn results_screen_renders_score_and_actions() {
    let html = render_screen(QuizScreen::Results(ResultsVm {
        time_label: "2:05".into(),
        score_label: "3 / 5".into(),
        passed: true,
        status_message: PASSED_MESSAGE,
    }));

    assert!(html.contains("Time Taken: 2:05"), "missing time in {html}");
    assert!(html.contains("Your Score: 3 / 5"), "missing score in {html}");
    assert!(html.contains(PASSED_MESSAGE), "missing status in {html}");
    assert!(html.contains("Review Answers"), "missing review button in {html}");
    assert!(html.contains("Retry Quiz"), "missing retry button in {html}");
}

#[test]
fn review_screen_marks_correct_options() {
    let html = render_screen(QuizScreen::Review(vec![ReviewRowVm {
        index: 0,
        text_html: "Capital of France?".into(),
        options: vec![
            ReviewOptionVm {
                text_html: "Paris".into(),
                class: "quiz-review-option-correct",
                checked: false,
            },
            ReviewOptionVm {
                text_html: "Lyon".into(),
                class: "quiz-review-option-incorrect",
                checked: true,
            },
        ],
    }]));

    assert!(html.contains("Review Answers"), "missing title in {html}");
    assert!(html.contains("quiz-review-option-correct"), "missing correct class in {html}");
    assert!(html.contains("question-0"), "missing radio group in {html}");
    assert!(html.contains("Retry Quiz"), "missing retry in {html}");
}

#[test]
fn loading_screen_renders_placeholder() {
    let html = render_screen(QuizScreen::Loading);
    assert!(html.contains("Loading..."), "missing loading in {html}");
}
