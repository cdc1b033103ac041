use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::QuizConfig;
use quiz_core::time::fixed_clock;
use services::{LoadError, QuestionLoader, QuestionSource, QuizLoopService, RawQuestion};

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizScreenView, QuizView};
use crate::vm::QuizScreen;

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

pub struct StaticSource(pub Vec<RawQuestion>);

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch(&self, amount: usize) -> Result<Vec<RawQuestion>, LoadError> {
        Ok(self.0.iter().take(amount).cloned().collect())
    }
}

pub struct FailingSource;

#[async_trait]
impl QuestionSource for FailingSource {
    async fn fetch(&self, _amount: usize) -> Result<Vec<RawQuestion>, LoadError> {
        Err(LoadError::Api { code: 1 })
    }
}

pub fn raw_question(i: usize) -> RawQuestion {
    RawQuestion {
        question: format!("Question {i}?"),
        correct_answer: format!("right {i}"),
        incorrect_answers: vec![format!("wrong {i}")],
        category: None,
        difficulty: None,
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizViewHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { QuizView {} }
}

#[component]
fn ScreenHarness(screen: QuizScreen) -> Element {
    rsx! {
        QuizScreenView { screen, on_intent: move |_| {} }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..3 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(source: Arc<dyn QuestionSource>) -> ViewHarness {
    let config = QuizConfig::default();
    let loader = Arc::new(QuestionLoader::with_seed(source, config.batch_size(), 5));
    let quiz_loop = Arc::new(QuizLoopService::new(fixed_clock(), config, loader));
    let app = Arc::new(TestApp { quiz_loop });

    let dom = VirtualDom::new_with_props(QuizViewHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}

pub fn render_screen(screen: QuizScreen) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { screen });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}
