mod question;
mod session;

pub use question::{Question, QuestionError};
pub use session::{AdvanceOutcome, Phase, QuizSession};
