#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod quiz;
pub mod source;

pub use quiz_core::Clock;

pub use error::LoadError;
pub use loader::{QuestionLoader, normalize};
pub use quiz::{LoadState, LoadTicket, QuizController, QuizLoopService};
pub use source::{OpenTdbSource, QuestionSource, RawQuestion};
