#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod results;
pub mod review;
pub mod time;

pub use config::{ConfigError, QuizConfig};
pub use error::QuizError;
pub use model::{AdvanceOutcome, Phase, Question, QuestionError, QuizSession};
pub use results::{QuizResults, passing_score};
pub use review::{OptionStyle, ReviewOption, ReviewRow, classify_option, option_styles, review_rows};
pub use time::{Clock, format_elapsed, format_elapsed_ms};
