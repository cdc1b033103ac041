mod controller;
mod workflow;

// Public API of the quiz subsystem.
pub use controller::{LoadState, LoadTicket, QuizController};
pub use workflow::QuizLoopService;
