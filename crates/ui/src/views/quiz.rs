use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use tracing::debug;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{QuestionVm, QuizIntent, QuizScreen, QuizVm, ResultsVm, ReviewRowVm};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let mut vm = {
        let quiz_loop = quiz_loop.clone();
        use_signal(move || QuizVm::new(quiz_loop.new_controller()))
    };
    let mut error = use_signal(|| None::<ViewError>);
    let tick = use_signal(|| 0_u64);
    let mut ticker = use_signal(|| None::<Task>);

    // Exactly one fetch per mount; the task dies with the component.
    let _load = use_resource(move || {
        let quiz_loop = quiz_loop.clone();
        let mut vm = vm;
        async move {
            let ticket = vm.write().begin_load();
            let result = quiz_loop.load_questions().await;
            vm.write().apply_load(ticket, result);
        }
    });

    use_drop(move || {
        let mut vm = vm;
        if let Ok(mut guard) = vm.try_write() {
            guard.teardown();
        }
    });

    // Elapsed ticker runs only while answering.
    use_effect(move || {
        let ticking = vm.read().is_ticking();
        let running = ticker.peek().is_some();
        if ticking && !running {
            debug!("starting elapsed ticker");
            let task = spawn(async move {
                let mut tick = tick;
                loop {
                    tokio::time::sleep(TICK_INTERVAL).await;
                    let next = *tick.peek() + 1;
                    tick.set(next);
                }
            });
            ticker.set(Some(task));
        } else if !ticking && running {
            let task = ticker.write().take();
            if let Some(task) = task {
                debug!("stopping elapsed ticker");
                task.cancel();
            }
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let result = vm.write().dispatch(intent);
        error.set(result.err());
    });

    // Re-render on every tick so the elapsed label moves.
    let _ = tick();
    let screen = vm.read().screen();

    rsx! {
        div { class: "quiz-container",
            h2 { class: "quiz-title", "Quiz" }
            if let Some(err) = error() {
                p { class: "quiz-error", "{err.message()}" }
            }
            QuizScreenView { screen, on_intent: dispatch }
        }
    }
}

#[component]
pub fn QuizScreenView(screen: QuizScreen, on_intent: EventHandler<QuizIntent>) -> Element {
    match screen {
        QuizScreen::Loading => rsx! {
            div { class: "quiz-loading", "Loading..." }
        },
        QuizScreen::Ready { total } => rsx! {
            p { class: "quiz-intro", "{total} questions are ready." }
            button {
                class: "quiz-start-button",
                onclick: move |_| on_intent.call(QuizIntent::Start),
                "Start Quiz"
            }
        },
        QuizScreen::Question(question) => rsx! {
            QuestionPanel { question, on_intent }
        },
        QuizScreen::Results(results) => rsx! {
            ResultsPanel { results, on_intent }
        },
        QuizScreen::Review(rows) => rsx! {
            ReviewPanel { rows, on_intent }
        },
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let can_advance = question.can_advance;

    rsx! {
        if let Some(elapsed) = question.elapsed_label.as_ref() {
            p { class: "quiz-time-elapsed", "Time Elapsed: {elapsed}" }
        }
        h3 { class: "quiz-question-number", "{question.number_label}" }
        if let Some(meta) = question.meta_label.as_ref() {
            p { class: "quiz-question-meta", "{meta}" }
        }
        p { class: "quiz-question", dangerous_inner_html: "{question.text_html}" }
        ul { class: "quiz-options",
            for option in question.options.iter() {
                li { key: "{option.index}",
                    label { class: "{option.class}",
                        input {
                            r#type: "radio",
                            name: "answer",
                            value: "{option.index}",
                            checked: option.checked,
                            disabled: option.disabled,
                            onchange: {
                                let index = option.index;
                                move |_| on_intent.call(QuizIntent::Select(index))
                            },
                        }
                        span { dangerous_inner_html: "{option.text_html}" }
                    }
                }
            }
        }
        button {
            class: "quiz-next-button",
            disabled: !can_advance,
            onclick: move |_| on_intent.call(QuizIntent::Advance),
            "{question.next_label}"
        }
    }
}

#[component]
fn ResultsPanel(results: ResultsVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "quiz-results",
            h2 { "Quiz Results" }
            p { class: "quiz-time", "Time Taken: {results.time_label}" }
            p { class: "quiz-score", "Your Score: {results.score_label}" }
            p { class: "quiz-pass-status", "{results.status_message}" }
            button {
                class: "quiz-review-button",
                onclick: move |_| on_intent.call(QuizIntent::Review),
                "Review Answers"
            }
            button {
                class: "quiz-retry-button",
                onclick: move |_| on_intent.call(QuizIntent::Retry),
                "Retry Quiz"
            }
        }
    }
}

#[component]
fn ReviewPanel(rows: Vec<ReviewRowVm>, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        h2 { class: "quiz-review-title", "Review Answers" }
        for row in rows.iter() {
            div { key: "{row.index}", class: "quiz-review-question",
                p { class: "quiz-review-question-text", dangerous_inner_html: "{row.text_html}" }
                ul { class: "quiz-review-options",
                    for (position, option) in row.options.iter().enumerate() {
                        li { key: "{position}", class: "{option.class}",
                            label {
                                input {
                                    r#type: "radio",
                                    name: "question-{row.index}",
                                    checked: option.checked,
                                    disabled: true,
                                }
                                span { dangerous_inner_html: "{option.text_html}" }
                            }
                        }
                    }
                }
            }
        }
        button {
            class: "quiz-retry-button",
            onclick: move |_| on_intent.call(QuizIntent::Retry),
            "Retry Quiz"
        }
    }
}
