use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::ConfigError;
use quiz_core::QuizConfig;
use quiz_core::config::{parse_batch_size, parse_passing_ratio};
use services::{Clock, QuizLoopService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--batch-size <n>] [--passing-ratio <0..1>] [--source-url <url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --batch-size 5");
    eprintln!("  --passing-ratio 0.7");
    eprintln!("  --source-url https://opentdb.com/api.php");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BATCH_SIZE, QUIZ_PASSING_RATIO, QUIZ_SOURCE_URL, RUST_LOG");
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(QuizConfig),
    Help,
}

/// Apply command-line flags on top of `base`; flags win over the environment.
fn parse_args(
    base: QuizConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Command, ArgsError> {
    let mut config = base;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--batch-size" => {
                let value = require_value(args, "--batch-size")?;
                config = config.with_batch_size(parse_batch_size("--batch-size", &value)?)?;
            }
            "--passing-ratio" => {
                let value = require_value(args, "--passing-ratio")?;
                config =
                    config.with_passing_ratio(parse_passing_ratio("--passing-ratio", &value)?)?;
            }
            "--source-url" => {
                let value = require_value(args, "--source-url")?;
                config = config.with_source_url(value)?;
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(Command::Run(config))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let base = QuizConfig::from_env()?;
    let mut argv = std::env::args().skip(1);
    let config = match parse_args(base, &mut argv).inspect_err(|_| print_usage())? {
        Command::Run(config) => config,
        Command::Help => {
            print_usage();
            return Ok(());
        }
    };

    init_tracing();
    info!(
        batch_size = config.batch_size(),
        passing_ratio = config.passing_ratio(),
        source_url = config.source_url(),
        "launching quiz"
    );

    let quiz_loop = Arc::new(QuizLoopService::from_config(Clock::System, config));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
    let context = build_app_context(&app);

    // On macOS, tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
